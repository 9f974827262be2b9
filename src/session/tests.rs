use serde_json::json;
use std::fs;
use tempfile::TempDir;

use super::pool::SessionPool;
use super::*;
use crate::bank::QuestionBank;

fn physics_bank(num_questions: usize) -> (TempDir, QuestionBank) {
    let dir = TempDir::new().unwrap();
    let questions: Vec<serde_json::Value> = (1..=num_questions)
        .map(|i| {
            json!({
                "id": format!("phy-{}", i),
                "topic": "Forces",
                "question": format!("Example question {}", i),
                "answer": format!("example answer {}", i),
            })
        })
        .collect();
    fs::write(
        dir.path().join("Physics.json"),
        serde_json::to_string(&questions).unwrap(),
    )
    .unwrap();
    let bank = QuestionBank::open(dir.path());
    (dir, bank)
}

fn answer_current_correctly(session: &mut QuizSession) -> Answered {
    let answer = session
        .current_question()
        .expect("Session has no current question")
        .correct_answer();
    session.submit_answer(&answer).unwrap()
}

#[test]
fn start_selects_up_to_requested_count() {
    let (_dir, bank) = physics_bank(3);

    let session = QuizSession::start(&bank, "Physics", 2).unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(session.progress(), (0, 2));
    assert!(!session.is_complete());

    let session = QuizSession::start(&bank, "Physics", 10).unwrap();
    assert_eq!(session.len(), 3);
}

#[test]
fn start_fails_for_unknown_topic() {
    let (_dir, bank) = physics_bank(3);
    match QuizSession::start(&bank, "Chemistry", 3) {
        Err(SessionError::NoQuestions(topic)) => assert_eq!(topic, "Chemistry"),
        other => panic!("Unexpected result: {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn submit_advances_index_by_exactly_one() {
    let (_dir, bank) = physics_bank(3);
    let mut session = QuizSession::start(&bank, "Physics", 3).unwrap();

    let outcome = answer_current_correctly(&mut session);
    assert!(outcome.correct);
    assert!(!outcome.complete);
    assert_eq!(session.progress(), (1, 3));
    assert_eq!(session.score(), 1);

    let outcome = session.submit_answer("definitely wrong").unwrap();
    assert!(!outcome.correct);
    assert_eq!(session.progress(), (2, 3));
    assert_eq!(session.score(), 1);
}

#[test]
fn completes_after_exactly_n_submissions_regardless_of_correctness() {
    let (_dir, bank) = physics_bank(4);
    let mut session = QuizSession::start(&bank, "Physics", 4).unwrap();

    for i in 0..4 {
        assert!(!session.is_complete());
        let outcome = session.submit_answer("definitely wrong").unwrap();
        assert_eq!(outcome.complete, i == 3);
    }
    assert!(session.is_complete());
    assert!(session.current_question().is_none());
}

#[test]
fn submission_after_completion_is_rejected_without_state_change() {
    let (_dir, bank) = physics_bank(1);
    let mut session = QuizSession::start(&bank, "Physics", 1).unwrap();
    answer_current_correctly(&mut session);

    match session.submit_answer("anything") {
        Err(SessionError::AlreadyComplete) => (),
        other => panic!("Unexpected result: {:?}", other),
    }
    assert_eq!(session.progress(), (1, 1));
    assert_eq!(session.score(), 1);
}

#[test]
fn physics_scenario_two_correct_one_incorrect() {
    let (_dir, bank) = physics_bank(3);
    let mut session = QuizSession::start(&bank, "Physics", 3).unwrap();
    assert_eq!(session.len(), 3);
    assert_eq!(session.progress(), (0, 3));

    answer_current_correctly(&mut session);
    answer_current_correctly(&mut session);
    let outcome = session.submit_answer("definitely wrong").unwrap();

    assert!(outcome.complete);
    assert_eq!(session.score(), 2);
    assert_eq!(session.progress(), (3, 3));
    assert!(session.is_complete());
}

#[test]
fn pool_hands_out_resumable_sessions() {
    let (_dir, bank) = physics_bank(2);
    let pool = SessionPool::default();

    let id = pool.insert(QuizSession::start(&bank, "Physics", 2).unwrap());
    let other = pool.insert(QuizSession::start(&bank, "Physics", 2).unwrap());
    assert_ne!(id, other);

    {
        let handle = pool.get(id).unwrap();
        let mut session = handle.lock();
        session.submit_answer("definitely wrong").unwrap();
    }

    let handle = pool.get(id).unwrap();
    assert_eq!(handle.lock().progress(), (1, 2));

    assert!(pool.remove(id).is_some());
    assert!(pool.get(id).is_none());
}
