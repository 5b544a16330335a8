//! Validated, immutable question banks.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::error::BankError;
use crate::model::Question;
use crate::parser;

/// TOML source of the bank shipped inside the binary.
pub const BUILTIN_BANK: &str = include_str!("../data/govbr.toml");

/// A list of questions that has passed every structural check.
///
/// The only way to obtain one is through [`QuestionBank::new`], so code
/// holding a bank can rely on each question having options and exactly one
/// correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    id: String,
    name: String,
    description: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Assemble a bank, rejecting it if any invariant is violated.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, BankError> {
        check_invariants(&questions)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            questions,
        })
    }

    /// Build an anonymous bank straight from questions (handy in tests).
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, BankError> {
        Self::new("custom", "Custom", "", questions)
    }

    /// The bank compiled into the binary.
    pub fn builtin() -> Result<Self> {
        parser::parse_bank_str(BUILTIN_BANK, Path::new("<builtin>"))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; kept for the usual pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Best attainable total: the top option of every question.
    ///
    /// Saturates at `u32::MAX`, like [`Score`](crate::model::Score).
    pub fn max_score(&self) -> u32 {
        self.questions
            .iter()
            .map(Question::max_points)
            .fold(0, u32::saturating_add)
    }

    /// Worst attainable total: the lowest option of every question.
    pub fn min_score(&self) -> u32 {
        self.questions
            .iter()
            .map(Question::min_points)
            .fold(0, u32::saturating_add)
    }
}

fn check_invariants(questions: &[Question]) -> Result<(), BankError> {
    if questions.is_empty() {
        return Err(BankError::Empty);
    }

    let mut seen_ids = HashSet::new();
    for q in questions {
        if !seen_ids.insert(q.id) {
            return Err(BankError::DuplicateId(q.id));
        }
        if q.prompt.trim().is_empty() {
            return Err(BankError::EmptyPrompt { question_id: q.id });
        }
        if q.options.is_empty() {
            return Err(BankError::NoOptions { question_id: q.id });
        }
        let count = q.options.iter().filter(|o| o.correct).count();
        if count != 1 {
            return Err(BankError::CorrectCount {
                question_id: q.id,
                count,
            });
        }
    }

    Ok(())
}
