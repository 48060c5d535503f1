//! Quiz core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No DOM, timers, or clocks; the host drives ticks and delays
//! - Seeded RNG only
//! - Every deferred callback carries the session it was issued for

pub mod level;
pub mod question;
pub mod scoring;
pub mod session;
pub mod summary;
pub mod timer;

pub use level::{DifficultyLevel, LevelRange};
pub use question::Question;
pub use scoring::{Evaluation, Feedback, FeedbackKind, SessionStats, Verdict, evaluate, parse_answer};
pub use session::{GamePhase, GameSession, NextQuestionTicket, SessionId, SessionSnapshot, SubmitOutcome};
pub use summary::{Celebration, Summary, accuracy};
pub use timer::{SessionTimer, format_duration};
