//! Times Table - A multiplication quiz for the browser
//!
//! Core modules:
//! - `quiz`: Pure game logic (levels, questions, scoring, timer, session state machine)
//! - `settings`: Host-supplied configuration
//! - `error`: Error types

pub mod error;
pub mod quiz;
pub mod settings;

pub use error::{QuizError, SettingsError};
pub use quiz::{DifficultyLevel, GamePhase, GameSession, Summary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Base points for a correct answer
    pub const BASE_POINTS: u64 = 10;
    /// Bonus points per step of the current streak
    pub const STREAK_BONUS: u64 = 2;

    /// One scheduling unit for post-answer delays (ms)
    pub const DELAY_UNIT_MS: u32 = 1000;
    /// Delay before the next question after a correct answer
    pub const CORRECT_DELAY_UNITS: u32 = 1;
    /// Delay after a wrong answer, long enough to read the correct answer
    pub const INCORRECT_DELAY_UNITS: u32 = 2;

    /// Session timer tick interval (ms)
    pub const TICK_INTERVAL_MS: u32 = 1000;
    /// Upper bound for configurable delays and intervals (ms)
    pub const MAX_INTERVAL_MS: u32 = 60_000;

    /// Accuracy thresholds (percent) for the results celebration
    pub const OUTSTANDING_ACCURACY: u32 = 90;
    pub const GREAT_ACCURACY: u32 = 75;
    pub const GOOD_ACCURACY: u32 = 50;
}
