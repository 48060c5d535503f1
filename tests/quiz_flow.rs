//! End-to-end play-throughs driven the way a host drives the session

use times_table::quiz::{
    Celebration, DifficultyLevel, FeedbackKind, GamePhase, GameSession, SubmitOutcome,
};
use times_table::Settings;

fn answer(session: &GameSession, correct: bool) -> String {
    let product = session.question().expect("active question").answer();
    let value = if correct { product } else { product + 1 };
    value.to_string()
}

/// Submit, then fire the ticket as the host would once the delay elapses
fn play(session: &mut GameSession, correct: bool) {
    let raw = answer(session, correct);
    match session.submit(&raw) {
        SubmitOutcome::Answered { ticket, .. } => assert!(session.advance(ticket)),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_full_session_with_timer() {
    let mut session = GameSession::new(2024, &Settings::default());
    let id = session.select_level(DifficultyLevel::Medium).unwrap();

    for correct in [true, true, true, false, true, true, true, true, false, true] {
        play(&mut session, correct);
        session.tick(id);
        let stats = session.stats();
        assert!(stats.correct_answers <= stats.total_questions);
    }

    // Non-numeric answer mid-session
    let before = session.stats().clone();
    assert!(matches!(session.submit("??"), SubmitOutcome::Invalid(f) if f.kind == FeedbackKind::Invalid));
    assert_eq!(session.stats(), &before);

    for _ in 0..55 {
        session.tick(id);
    }

    let summary = session.quit().unwrap();
    assert_eq!(summary.total_questions, 10);
    assert_eq!(summary.correct_answers, 8);
    assert_eq!(summary.accuracy, 80);
    assert_eq!(summary.celebration, Celebration::Great);
    assert_eq!(summary.time_played, "1m 5s");
    // Streaks: 1,2,3 then miss, then 1..4 then miss, then 1
    let expected: u64 = [1, 2, 3, 1, 2, 3, 4, 1].iter().map(|s| 10 + 2 * s).sum();
    assert_eq!(summary.final_score, expected);
}

#[test]
fn test_quit_during_feedback_delay() {
    let mut session = GameSession::new(5, &Settings::default());
    session.select_level(DifficultyLevel::Easy);

    let raw = answer(&session, false);
    let SubmitOutcome::Answered { ticket, .. } = session.submit(&raw) else {
        panic!("expected an answered outcome");
    };
    session.quit().unwrap();

    // Host timeout fires late, after the results screen is up
    assert!(!session.advance(ticket));
    assert_eq!(session.phase(), GamePhase::Finished);
    assert!(session.pending_ticket().is_none());

    // Fresh session is not touched by the old ticket either
    session.change_level();
    session.select_level(DifficultyLevel::Hard);
    let question = *session.question().unwrap();
    assert!(!session.advance(ticket));
    assert_eq!(session.question(), Some(&question));
}
