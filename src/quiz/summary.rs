//! End-of-session results

use serde::Serialize;

use super::level::DifficultyLevel;
use super::scoring::SessionStats;
use super::timer::format_duration;
use crate::consts::*;

/// Percentage of correct answers, rounded half up. Zero when nothing was answered.
pub fn accuracy(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u64::from(correct), u64::from(total));
    // round(correct / total * 100) without floats
    ((correct * 200 + total) / (2 * total)) as u32
}

/// Celebration tier picked from accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Celebration {
    Outstanding,
    Great,
    Good,
    KeepPracticing,
}

impl Celebration {
    pub fn for_accuracy(accuracy: u32) -> Self {
        if accuracy >= OUTSTANDING_ACCURACY {
            Celebration::Outstanding
        } else if accuracy >= GREAT_ACCURACY {
            Celebration::Great
        } else if accuracy >= GOOD_ACCURACY {
            Celebration::Good
        } else {
            Celebration::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Celebration::Outstanding => "🏆 Outstanding! You're a multiplication master!",
            Celebration::Great => "⭐ Great job! Keep up the good work!",
            Celebration::Good => "👍 Good effort! Practice makes perfect!",
            Celebration::KeepPracticing => "💪 Keep practicing! You'll get better!",
        }
    }
}

/// Results screen data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub level: DifficultyLevel,
    pub final_score: u64,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Percent, 0-100
    pub accuracy: u32,
    pub seconds_played: u32,
    pub time_played: String,
    pub celebration: Celebration,
}

impl Summary {
    pub fn new(level: DifficultyLevel, stats: &SessionStats, seconds_played: u32) -> Self {
        let accuracy = accuracy(stats.correct_answers, stats.total_questions);
        Self {
            level,
            final_score: stats.score,
            total_questions: stats.total_questions,
            correct_answers: stats.correct_answers,
            accuracy,
            seconds_played,
            time_played: format_duration(seconds_played),
            celebration: Celebration::for_accuracy(accuracy),
        }
    }
}
