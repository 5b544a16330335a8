//! Core data model types for safequiz.
//!
//! Questions and their options are plain immutable records. The running
//! score is the only value that changes while a session is in progress.

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// One selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Text shown to the user.
    pub text: String,
    /// Points awarded when this option is confirmed.
    pub points: u32,
    /// Whether this is the right answer.
    #[serde(default)]
    pub correct: bool,
    /// Shown after the answer is confirmed, right or wrong.
    #[serde(default)]
    pub explanation: String,
}

impl AnswerOption {
    pub fn new(
        text: impl Into<String>,
        points: u32,
        correct: bool,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            points,
            correct,
            explanation: explanation.into(),
        }
    }
}

/// A multiple-choice question.
///
/// Options are stored in definition order; presentation order is decided
/// per render by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within a bank.
    pub id: u32,
    /// The question text.
    pub prompt: String,
    /// Options in definition order.
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(id: u32, prompt: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options,
        }
    }

    /// The option marked correct. Banks guarantee there is exactly one.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.correct)
    }

    /// Highest point value among the options.
    pub fn max_points(&self) -> u32 {
        self.options.iter().map(|o| o.points).max().unwrap_or(0)
    }

    /// Lowest point value among the options.
    pub fn min_points(&self) -> u32 {
        self.options.iter().map(|o| o.points).min().unwrap_or(0)
    }
}

/// Running total of points for a session.
///
/// Only ever grows: the sole mutation is adding the points of a confirmed
/// option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Add points, saturating rather than wrapping.
    pub fn add_points(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }
}

impl AddAssign<u32> for Score {
    fn add_assign(&mut self, points: u32) {
        self.add_points(points);
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        i64::from(score.0)
    }
}
