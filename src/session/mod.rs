use rand::seq::SliceRandom;
use thiserror::Error;

use crate::bank::{Question, QuestionBank};

pub mod pool;
#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no questions available for topic '{0}'")]
    NoQuestions(String),
    #[error("the quiz is already complete")]
    AlreadyComplete,
}

/// Outcome of marking one submitted answer.
#[derive(Clone, Debug)]
pub struct Answered {
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub complete: bool,
}

/// One in-progress quiz attempt. The question order is fixed at start;
/// `index` only ever moves forward, one step per submission.
#[derive(Debug)]
pub struct QuizSession {
    topic: String,
    questions: Vec<Question>,
    index: usize,
    correct: usize,
}

impl QuizSession {
    /// Draws up to `count` questions for `topic` as a uniform random sample
    /// without replacement.
    pub fn start(
        bank: &QuestionBank,
        topic: &str,
        count: usize,
    ) -> Result<QuizSession, SessionError> {
        let available = bank.questions(topic);
        if available.is_empty() {
            return Err(SessionError::NoQuestions(topic.to_owned()));
        }
        let mut rng = rand::thread_rng();
        let questions: Vec<Question> = available
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect();
        Ok(QuizSession {
            topic: topic.to_owned(),
            questions,
            index: 0,
            correct: 0,
        })
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Marks `answer` against the current question and advances. Rejected
    /// without any state change once the session is complete.
    pub fn submit_answer(&mut self, answer: &str) -> Result<Answered, SessionError> {
        let question = self
            .questions
            .get(self.index)
            .ok_or(SessionError::AlreadyComplete)?;

        let correct = question.is_answer_correct(answer);
        let outcome = Answered {
            correct,
            correct_answer: question.correct_answer(),
            explanation: question.explanation.clone(),
            complete: self.index + 1 == self.questions.len(),
        };

        if correct {
            self.correct += 1;
        }
        self.index += 1;

        Ok(outcome)
    }

    pub fn is_complete(&self) -> bool {
        self.index == self.questions.len()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn score(&self) -> usize {
        self.correct
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// (answered so far, total).
    pub fn progress(&self) -> (usize, usize) {
        (self.index, self.questions.len())
    }
}
