//! Difficulty levels and their operand ranges

use serde::{Deserialize, Serialize};

/// Inclusive operand range for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u32,
    pub max: u32,
}

impl LevelRange {
    /// Check if a value lies within the range (inclusive)
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyLevel {
    /// Every level, easiest first
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
        DifficultyLevel::Expert,
    ];

    /// Operand range for this level
    pub fn range(&self) -> LevelRange {
        let (min, max) = match self {
            DifficultyLevel::Easy => (1, 5),
            DifficultyLevel::Medium => (1, 10),
            DifficultyLevel::Hard => (1, 12),
            DifficultyLevel::Expert => (1, 15),
        };
        LevelRange { min, max }
    }

    /// Identifier used in markup (`data-level`) and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Expert => "expert",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
            DifficultyLevel::Expert => "Expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Some(DifficultyLevel::Easy),
            "medium" | "med" | "2" => Some(DifficultyLevel::Medium),
            "hard" | "3" => Some(DifficultyLevel::Hard),
            "expert" | "4" => Some(DifficultyLevel::Expert),
            _ => None,
        }
    }
}
