//! Game session state machine
//!
//! Idle -> Active -> Finished, driven by discrete host events. The session owns
//! every piece of mutable quiz state; rendering only reads [`SessionSnapshot`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::level::DifficultyLevel;
use super::question::Question;
use super::scoring::{Evaluation, Feedback, SessionStats, evaluate};
use super::summary::Summary;
use super::timer::{SessionTimer, format_duration};
use crate::settings::Settings;

/// Current phase of the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Level selection, no session running
    Idle,
    /// Accepting answers, timer running
    Active,
    /// Results shown, timer stopped
    Finished,
}

/// Identity of one play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(u64);

impl SessionId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Deferred "show the next question" task.
///
/// Only the most recently issued ticket of the current session is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextQuestionTicket {
    pub session: SessionId,
    /// Index of the question this ticket replaces
    pub question_index: u32,
    /// How long the host should wait before calling [`GameSession::advance`]
    pub delay_ms: u32,
}

/// Result of submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not active, or still waiting on the next question
    Ignored,
    /// Text was not a number; resubmit
    Invalid(Feedback),
    /// Answer counted; schedule `ticket`
    Answered {
        evaluation: Evaluation,
        ticket: NextQuestionTicket,
    },
}

/// Render-ready view of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub level: DifficultyLevel,
    pub session: SessionId,
    pub num1: Option<u32>,
    pub num2: Option<u32>,
    pub feedback: Option<Feedback>,
    pub score: u64,
    pub streak: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub elapsed: String,
    /// Answer box should be locked until the next question arrives
    pub awaiting_next: bool,
    pub summary: Option<Summary>,
}

/// One quiz, reused across play-throughs
#[derive(Debug, Clone)]
pub struct GameSession {
    seed: u64,
    rng: Pcg32,
    delay_unit_ms: u32,
    phase: GamePhase,
    level: DifficultyLevel,
    session: SessionId,
    stats: SessionStats,
    timer: SessionTimer,
    question: Option<Question>,
    question_index: u32,
    feedback: Option<Feedback>,
    pending: Option<NextQuestionTicket>,
    summary: Option<Summary>,
}

impl GameSession {
    /// Create an idle session with the given RNG seed
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            delay_unit_ms: settings.delay_unit_ms,
            phase: GamePhase::Idle,
            level: settings.default_level,
            session: SessionId(0),
            stats: SessionStats::default(),
            timer: SessionTimer::new(),
            question: None,
            question_index: 0,
            feedback: None,
            pending: None,
            summary: None,
        }
    }

    /// Idle -> Active. Ignored in any other phase.
    pub fn select_level(&mut self, level: DifficultyLevel) -> Option<SessionId> {
        if self.phase != GamePhase::Idle {
            log::debug!("Level selection ignored in {:?}", self.phase);
            return None;
        }
        Some(self.start(level))
    }

    /// Finished -> Active with the same level
    pub fn play_again(&mut self) -> Option<SessionId> {
        if self.phase != GamePhase::Finished {
            log::debug!("Play again ignored in {:?}", self.phase);
            return None;
        }
        Some(self.start(self.level))
    }

    /// Finished -> Idle, back to level selection
    pub fn change_level(&mut self) -> bool {
        if self.phase != GamePhase::Finished {
            log::debug!("Change level ignored in {:?}", self.phase);
            return false;
        }
        self.reset();
        self.phase = GamePhase::Idle;
        log::info!("Returned to level selection");
        true
    }

    /// Active -> Finished. Returns the results, or None if no session was active.
    pub fn quit(&mut self) -> Option<Summary> {
        if self.phase != GamePhase::Active {
            log::debug!("Quit ignored in {:?}", self.phase);
            return None;
        }
        if self.timer.stop() {
            log::debug!("Timer stopped at {}s", self.timer.elapsed_seconds());
        }
        self.pending = None;
        self.phase = GamePhase::Finished;

        let summary = Summary::new(self.level, &self.stats, self.timer.elapsed_seconds());
        log::info!(
            "Session {} finished: score {}, {}/{} correct ({}%) in {}",
            self.session.0,
            summary.final_score,
            summary.correct_answers,
            summary.total_questions,
            summary.accuracy,
            summary.time_played
        );
        self.summary = Some(summary.clone());
        Some(summary)
    }

    /// Submit raw answer text for the active question
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if self.phase != GamePhase::Active || self.pending.is_some() {
            log::debug!("Answer ignored (phase {:?}, pending {})", self.phase, self.pending.is_some());
            return SubmitOutcome::Ignored;
        }
        let Some(question) = self.question else {
            return SubmitOutcome::Ignored;
        };

        match evaluate(raw, &question, &mut self.stats) {
            Err(err) => {
                log::debug!("{}", err);
                let feedback = Feedback::invalid();
                self.feedback = Some(feedback.clone());
                SubmitOutcome::Invalid(feedback)
            }
            Ok(evaluation) => {
                debug_assert!(self.stats.correct_answers <= self.stats.total_questions);
                let ticket = NextQuestionTicket {
                    session: self.session,
                    question_index: self.question_index,
                    delay_ms: evaluation.delay_units.saturating_mul(self.delay_unit_ms),
                };
                self.feedback = Some(Feedback::from(&evaluation));
                self.pending = Some(ticket);
                SubmitOutcome::Answered { evaluation, ticket }
            }
        }
    }

    /// Fire a next-question ticket. Stale tickets are dropped.
    pub fn advance(&mut self, ticket: NextQuestionTicket) -> bool {
        if self.phase != GamePhase::Active || self.pending != Some(ticket) {
            log::debug!("Dropped stale next-question ticket {:?}", ticket);
            return false;
        }
        self.pending = None;
        self.next_question();
        true
    }

    /// One timer second for `session`. Ticks for other sessions are dropped.
    pub fn tick(&mut self, session: SessionId) -> bool {
        if self.phase != GamePhase::Active || session != self.session {
            log::debug!("Dropped stale tick for session {}", session.0);
            return false;
        }
        self.timer.tick();
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            level: self.level,
            session: self.session,
            num1: self.question.map(|q| q.num1()),
            num2: self.question.map(|q| q.num2()),
            feedback: self.feedback.clone(),
            score: self.stats.score,
            streak: self.stats.streak,
            total_questions: self.stats.total_questions,
            correct_answers: self.stats.correct_answers,
            elapsed: format_duration(self.timer.elapsed_seconds()),
            awaiting_next: self.pending.is_some(),
            summary: self.summary.clone(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> DifficultyLevel {
        self.level
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    /// Ticket the host should currently have scheduled, if any
    pub fn pending_ticket(&self) -> Option<NextQuestionTicket> {
        self.pending
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    fn start(&mut self, level: DifficultyLevel) -> SessionId {
        self.reset();
        self.level = level;
        self.session = SessionId(self.session.0 + 1);
        self.phase = GamePhase::Active;
        if self.timer.start() {
            log::debug!("Timer started for session {}", self.session.0);
        }
        self.next_question();
        log::info!("Session {} started at {} level", self.session.0, level.name());
        self.session
    }

    fn reset(&mut self) {
        self.stats = SessionStats::default();
        self.timer = SessionTimer::new();
        self.question = None;
        self.question_index = 0;
        self.feedback = None;
        self.pending = None;
        self.summary = None;
    }

    fn next_question(&mut self) {
        let question = Question::generate(self.level, &mut self.rng);
        if self.question.is_some() {
            self.question_index += 1;
        }
        self.question = Some(question);
        self.feedback = None;
    }
}
