//! The rewarded-ad gate delivers its outcome over a channel after a
//! playback delay, and the session's continue guards decide what that
//! outcome means.

use std::time::Duration;

use tokio::sync::mpsc;

use quizbird::app::SimulatedAdGate;
use quizbird::config::QuizConfig;
use quizbird::content::{Grade, Level, Question};
use quizbird::session::{AdGate, AdOutcome, QuizSession, SessionPhase};

fn one_question_grade() -> Grade {
    Grade {
        grade: 1,
        levels: vec![Level {
            level_number: 1,
            questions: vec![Question {
                prompt: "2 + 2".to_string(),
                answers: vec!["3".into(), "4".into(), "5".into(), "6".into()],
                right_answer: "4".to_string(),
            }],
        }],
    }
}

#[tokio::test]
async fn test_watched_outcome_arrives_on_channel() {
    let mut gate = SimulatedAdGate::new().with_delay(Duration::from_millis(10));
    let (tx, mut rx) = mpsc::channel(1);

    gate.request_rewarded_ad(tx);
    let outcome = rx.recv().await.expect("gate must deliver an outcome");
    assert_eq!(outcome, AdOutcome::Watched);
}

#[tokio::test]
async fn test_failed_outcome_declines_the_continue() {
    let mut gate = SimulatedAdGate::new()
        .with_delay(Duration::from_millis(10))
        .with_fail_every(1);
    let (tx, mut rx) = mpsc::channel(1);

    let mut session =
        QuizSession::with_seed(one_question_grade(), QuizConfig::new(), 9);
    assert!(session.load_level(1));

    // Pick a wrong answer to reach the continue prompt.
    let wrong = {
        let q = session.current_question().unwrap();
        q.answers.iter().position(|a| *a != q.right_answer).unwrap()
    };
    session.submit_answer(wrong);
    assert_eq!(session.phase(), SessionPhase::ContinuePrompt);

    gate.request_rewarded_ad(tx);
    let outcome = rx.recv().await.unwrap();
    assert_eq!(outcome, AdOutcome::Failed);

    // The app loop reacts to a failed ad by declining.
    session.decline_continue();
    assert_eq!(session.phase(), SessionPhase::LevelComplete);
    assert!(!session.level_cleared());
}
