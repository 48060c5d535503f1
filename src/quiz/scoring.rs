//! Answer evaluation, scoring and streaks

use serde::Serialize;

use super::question::Question;
use crate::consts::*;
use crate::error::QuizError;

/// Counters for one play-through
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Total points (never decreases within a session)
    pub score: u64,
    /// Consecutive correct answers since the last miss
    pub streak: u32,
    /// Answers that parsed as numbers
    pub total_questions: u32,
    pub correct_answers: u32,
}

/// Outcome of a numeric answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Result of evaluating one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub points_awarded: u64,
    /// Suggested wait before the next question, in delay units
    pub delay_units: u32,
    pub message: String,
}

impl Evaluation {
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }
}

/// Classification shown next to the feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
    /// Answer was not a number; nothing was counted
    Invalid,
}

impl FeedbackKind {
    /// CSS class applied to the feedback element
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackKind::Correct => "correct",
            FeedbackKind::Incorrect => "incorrect",
            FeedbackKind::Invalid => "invalid",
        }
    }
}

/// Feedback line for the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn invalid() -> Self {
        Self {
            kind: FeedbackKind::Invalid,
            message: "Please enter a number!".to_string(),
        }
    }
}

impl From<&Evaluation> for Feedback {
    fn from(eval: &Evaluation) -> Self {
        let kind = match eval.verdict {
            Verdict::Correct => FeedbackKind::Correct,
            Verdict::Incorrect => FeedbackKind::Incorrect,
        };
        Self {
            kind,
            message: eval.message.clone(),
        }
    }
}

/// Read the integer at the start of the answer text.
///
/// Surrounding whitespace is ignored, an optional sign is accepted and anything
/// after the leading digits is dropped (`"12abc"` reads as 12). Text without a
/// leading digit is invalid. Digit runs too long for `i64` saturate.
pub fn parse_answer(raw: &str) -> Result<i64, QuizError> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return Err(QuizError::InvalidInput {
            input: raw.to_string(),
        });
    }

    // Only overflow can fail here
    let magnitude = rest[..digit_count].parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Evaluate an answer against the active question and update the counters.
///
/// Invalid input returns an error and leaves `stats` untouched.
pub fn evaluate(
    raw: &str,
    question: &Question,
    stats: &mut SessionStats,
) -> Result<Evaluation, QuizError> {
    let value = parse_answer(raw)?;
    stats.total_questions += 1;

    if value == i64::from(question.answer()) {
        stats.correct_answers += 1;
        stats.streak += 1;
        // Bonus uses the streak after this answer
        let points = BASE_POINTS + u64::from(stats.streak) * STREAK_BONUS;
        stats.score += points;
        Ok(Evaluation {
            verdict: Verdict::Correct,
            points_awarded: points,
            delay_units: CORRECT_DELAY_UNITS,
            message: format!("🎉 Correct! +{} points", points),
        })
    } else {
        stats.streak = 0;
        Ok(Evaluation {
            verdict: Verdict::Incorrect,
            points_awarded: 0,
            delay_units: INCORRECT_DELAY_UNITS,
            message: format!("❌ Wrong! The answer is {}", question.answer()),
        })
    }
}
