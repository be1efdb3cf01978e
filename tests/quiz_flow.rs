//! End-to-end quiz session flows driven through the public API,
//! with the timer and the deferred question advance ticked manually.

use std::time::Duration;

use quizbird::config::QuizConfig;
use quizbird::content::{Grade, Level, Question};
use quizbird::session::{QuizSession, SessionEvent, SessionPhase};

fn question(prompt: &str, answers: [&str; 4], right: &str) -> Question {
    Question {
        prompt: prompt.to_string(),
        answers: answers.iter().map(|s| s.to_string()).collect(),
        right_answer: right.to_string(),
    }
}

fn arithmetic_grade() -> Grade {
    Grade {
        grade: 1,
        levels: vec![Level {
            level_number: 1,
            questions: vec![
                question("2 + 2", ["3", "4", "5", "6"], "4"),
                question("3 x 3", ["6", "9", "12", "3"], "9"),
                question("10 - 7", ["2", "3", "4", "7"], "3"),
            ],
        }],
    }
}

fn config() -> QuizConfig {
    QuizConfig::new()
        .with_questions_per_level(3)
        .with_time_per_question(Duration::from_secs(10))
        .with_points_per_correct(10)
        .with_answer_reveal_delay(Duration::from_millis(1500))
}

fn session() -> QuizSession {
    let mut s = QuizSession::with_seed(arithmetic_grade(), config(), 42);
    assert!(s.load_level(1));
    s
}

/// Index of the right answer for whatever question is currently served
fn correct_index(s: &QuizSession) -> usize {
    let q = s.current_question().expect("a question should be active");
    q.answers
        .iter()
        .position(|a| *a == q.right_answer)
        .expect("right answer must be among the candidates")
}

fn wrong_index(s: &QuizSession) -> usize {
    let q = s.current_question().expect("a question should be active");
    q.answers
        .iter()
        .position(|a| *a != q.right_answer)
        .expect("at least one candidate must be wrong")
}

/// Tick through the answer-reveal delay so the next question loads
fn tick_past_reveal(s: &mut QuizSession) {
    s.advance_timer(Duration::from_millis(1500));
}

#[test]
fn test_perfect_run() {
    let mut s = session();

    for _ in 0..3 {
        assert_eq!(s.phase(), SessionPhase::QuestionActive);
        let index = correct_index(&s);
        s.submit_answer(index);
        tick_past_reveal(&mut s);
    }

    assert_eq!(s.phase(), SessionPhase::LevelComplete);
    assert!(s.level_cleared());

    let result = s.last_result().expect("completed level must have a result");
    assert_eq!(result.total_questions, 3);
    assert_eq!(result.correct_answers, 3);
    assert_eq!(result.wrong_answers, 0);
    assert_eq!(result.score, 30);
    assert_eq!(result.accuracy_percentage, 100.0);
    assert_eq!(result.grade, "A+");
    assert_eq!(result.stars, 5);
}

#[test]
fn test_loss_continue_and_finish() {
    let mut s = session();

    // First question wrong: the one continue is offered.
    let index = wrong_index(&s);
    s.submit_answer(index);
    assert_eq!(s.phase(), SessionPhase::ContinuePrompt);

    s.resume_after_continue();
    assert_eq!(s.phase(), SessionPhase::QuestionActive);
    assert_eq!(s.question_number(), 2);

    // Finish the remaining questions correctly.
    for _ in 0..2 {
        let index = correct_index(&s);
        s.submit_answer(index);
        tick_past_reveal(&mut s);
    }

    assert_eq!(s.phase(), SessionPhase::LevelComplete);
    // The attempt reached the end, so it counts as cleared even with a
    // continue spent.
    assert!(s.level_cleared());

    let result = s.last_result().unwrap();
    assert_eq!(result.total_questions, 3);
    assert_eq!(result.correct_answers, 2);
    assert_eq!(result.wrong_answers, 1);
    assert_eq!(result.score, 20);
    assert!((result.accuracy_percentage - 66.7).abs() < 0.1);
}

#[test]
fn test_decline_ends_with_partial_result() {
    let mut s = session();

    s.submit_answer(wrong_index(&s));
    s.decline_continue();

    assert_eq!(s.phase(), SessionPhase::LevelComplete);
    assert!(!s.level_cleared());

    let result = s.last_result().unwrap();
    assert_eq!(result.total_questions, 1);
    assert_eq!(result.correct_answers, 0);
    assert_eq!(result.wrong_answers, 1);
    assert_eq!(result.accuracy_percentage, 0.0);
}

#[test]
fn test_timeout_counts_as_wrong_answer() {
    let mut s = session();

    s.advance_timer(Duration::from_secs(10));
    assert_eq!(s.phase(), SessionPhase::ContinuePrompt);
    assert_eq!(s.wrong_answers(), 1);

    let events = s.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::TimerExpired)));
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::ContinueOffered)));
}

#[test]
fn test_event_stream_for_a_full_level() {
    let mut s = session();
    let mut events = Vec::new();

    events.extend(s.take_events());
    for _ in 0..3 {
        let index = correct_index(&s);
        s.submit_answer(index);
        events.extend(s.take_events());
        tick_past_reveal(&mut s);
        events.extend(s.take_events());
    }

    // One load per question, one judgement per answer, one completion.
    let loads = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::QuestionLoaded { .. }))
        .count();
    let judged = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::AnswerJudged { correct: true, .. }))
        .count();
    assert_eq!(loads, 3);
    assert_eq!(judged, 3);
    assert!(matches!(
        events.last(),
        Some(SessionEvent::LevelCompleted(_))
    ));
}

#[test]
fn test_second_level_attempt_starts_clean() {
    let mut s = session();

    s.submit_answer(wrong_index(&s));
    s.resume_after_continue();
    s.submit_answer(correct_index(&s));
    tick_past_reveal(&mut s);

    // Abandon midway, then reload: all per-level state resets.
    s.abort();
    assert!(s.load_level(1));
    assert_eq!(s.question_number(), 1);
    assert_eq!(s.score(), 0);
    assert_eq!(s.wrong_answers(), 0);
    assert!(!s.continue_used());
}
