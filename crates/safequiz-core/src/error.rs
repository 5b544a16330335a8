//! Question bank error types.
//!
//! A bank that violates one of these invariants is rejected once, when it is
//! assembled, so the session never has to re-check it per question.

use thiserror::Error;

/// Structural problems that make a question bank unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// The bank contains no questions at all.
    #[error("question bank is empty")]
    Empty,

    /// A question has no options to choose from.
    #[error("question {question_id} has no options")]
    NoOptions { question_id: u32 },

    /// A question does not have exactly one correct option.
    #[error("question {question_id} has {count} correct options, expected exactly 1")]
    CorrectCount { question_id: u32, count: usize },

    /// Two questions share the same identifier.
    #[error("duplicate question id: {0}")]
    DuplicateId(u32),

    /// A question prompt is blank.
    #[error("question {question_id} has an empty prompt")]
    EmptyPrompt { question_id: u32 },
}

impl BankError {
    /// The question the error refers to, if it is question-specific.
    pub fn question_id(&self) -> Option<u32> {
        match self {
            BankError::Empty => None,
            BankError::NoOptions { question_id }
            | BankError::CorrectCount { question_id, .. }
            | BankError::EmptyPrompt { question_id } => Some(*question_id),
            BankError::DuplicateId(id) => Some(*id),
        }
    }
}
