//! Quiz session state machine.
//!
//! A session walks a [`QuestionBank`] strictly forward:
//!
//! ```text
//! AwaitingStart --start--> PresentingQuestion --select--> AwaitingConfirmation
//!                               ^                              |  ^ select
//!                               |                              v  |
//!                               +----next---- FeedbackShown <--confirm
//!                                                  |
//!                                                  +--next (last)--> Finished
//! ```
//!
//! [`Session::plan`] is the pure transition function: it maps the current
//! state and an event to the next state plus a score delta, or to the reason
//! the event is ignored. [`Session::handle`] applies the planned step.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::model::{AnswerOption, Question, Score};
use crate::shuffle::shuffled_positions;
use crate::tier::{classify, TierResult};

/// A user-triggered input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "position", rename_all = "snake_case")]
pub enum QuizEvent {
    /// Leave the welcome screen.
    Start,
    /// Pick the option at this position of the presented (shuffled) list.
    Select(usize),
    /// Lock in the current selection.
    Confirm,
    /// Move past the feedback.
    Next,
}

/// Where the session is. `index` is the 0-based question index and
/// `selected` a position in the presented option order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    AwaitingStart,
    PresentingQuestion { index: usize },
    AwaitingConfirmation { index: usize, selected: usize },
    FeedbackShown { index: usize, selected: usize },
    Finished,
}

impl SessionState {
    /// The question being shown, if any.
    pub fn question_index(self) -> Option<usize> {
        match self {
            SessionState::PresentingQuestion { index }
            | SessionState::AwaitingConfirmation { index, .. }
            | SessionState::FeedbackShown { index, .. } => Some(index),
            SessionState::AwaitingStart | SessionState::Finished => None,
        }
    }
}

/// A planned transition: the state to enter and the points it awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: SessionState,
    pub score_delta: u32,
}

impl Step {
    fn to(next: SessionState) -> Self {
        Self {
            next,
            score_delta: 0,
        }
    }
}

/// Why an event left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotStarted,
    AlreadyStarted,
    NoSelection,
    OutOfRange { position: usize, len: usize },
    NotConfirmed,
    OptionsLocked,
    Finished,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NotStarted => write!(f, "the quiz has not started yet"),
            IgnoreReason::AlreadyStarted => write!(f, "the quiz is already running"),
            IgnoreReason::NoSelection => write!(f, "no option selected"),
            IgnoreReason::OutOfRange { position, len } => {
                write!(f, "option {} does not exist (1-{len})", position + 1)
            }
            IgnoreReason::NotConfirmed => write!(f, "confirm an answer first"),
            IgnoreReason::OptionsLocked => write!(f, "the answer is already locked in"),
            IgnoreReason::Finished => write!(f, "the quiz is over"),
        }
    }
}

/// Outcome of feeding one event to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied(Step),
    Ignored(IgnoreReason),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }
}

/// What the presentation surface shows for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView<'a> {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub question_id: u32,
    pub prompt: &'a str,
    /// Option texts in presentation order.
    pub options: Vec<&'a str>,
    pub selected: Option<usize>,
    pub locked: bool,
    pub confirm_enabled: bool,
    pub next_enabled: bool,
}

/// Result of a confirmed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub explanation: String,
    pub points: u32,
}

/// One confirmed answer, kept for the final recap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question_id: u32,
    pub chosen: String,
    pub points: u32,
    pub correct: bool,
}

/// Final screen contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub bank_id: String,
    pub score: Score,
    pub max_score: u32,
    pub question_count: usize,
    pub correct_count: usize,
    #[serde(flatten)]
    pub result: TierResult,
    pub answers: Vec<AnsweredQuestion>,
}

/// One run of the quiz, from the start signal to the final summary.
///
/// Restarting means dropping the session and building a new one; nothing
/// leads out of [`SessionState::Finished`].
pub struct Session<'a, R = StdRng> {
    bank: &'a QuestionBank,
    rng: R,
    shuffle: bool,
    state: SessionState,
    /// Presentation position -> definition index, for the current question.
    order: Vec<usize>,
    score: Score,
    answers: Vec<AnsweredQuestion>,
    summary: Option<Summary>,
}

impl<'a> Session<'a, StdRng> {
    /// A session whose shuffle is reproducible when `seed` is given.
    pub fn seeded(bank: &'a QuestionBank, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(bank, rng)
    }
}

impl<'a, R: Rng> Session<'a, R> {
    pub fn new(bank: &'a QuestionBank, rng: R) -> Self {
        Self {
            bank,
            rng,
            shuffle: true,
            state: SessionState::AwaitingStart,
            order: Vec::new(),
            score: Score::default(),
            answers: Vec::with_capacity(bank.len()),
            summary: None,
        }
    }

    /// Present options in definition order instead of shuffling them.
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Decide what `event` would do, without changing anything.
    pub fn plan(&self, event: QuizEvent) -> Result<Step, IgnoreReason> {
        use SessionState::*;

        match (self.state, event) {
            (Finished, _) => Err(IgnoreReason::Finished),
            (AwaitingStart, QuizEvent::Start) => Ok(Step::to(PresentingQuestion { index: 0 })),
            (AwaitingStart, _) => Err(IgnoreReason::NotStarted),
            (_, QuizEvent::Start) => Err(IgnoreReason::AlreadyStarted),

            (
                PresentingQuestion { index } | AwaitingConfirmation { index, .. },
                QuizEvent::Select(position),
            ) => {
                let len = self.order.len();
                if position >= len {
                    return Err(IgnoreReason::OutOfRange { position, len });
                }
                Ok(Step::to(AwaitingConfirmation {
                    index,
                    selected: position,
                }))
            }
            (PresentingQuestion { .. }, QuizEvent::Confirm) => Err(IgnoreReason::NoSelection),
            (AwaitingConfirmation { index, selected }, QuizEvent::Confirm) => {
                let points = self.option_at(index, selected).map_or(0, |o| o.points);
                Ok(Step {
                    next: FeedbackShown { index, selected },
                    score_delta: points,
                })
            }
            (PresentingQuestion { .. } | AwaitingConfirmation { .. }, QuizEvent::Next) => {
                Err(IgnoreReason::NotConfirmed)
            }

            (FeedbackShown { .. }, QuizEvent::Select(_) | QuizEvent::Confirm) => {
                Err(IgnoreReason::OptionsLocked)
            }
            (FeedbackShown { index, .. }, QuizEvent::Next) => {
                let next = index + 1;
                if next >= self.bank.len() {
                    Ok(Step::to(Finished))
                } else {
                    Ok(Step::to(PresentingQuestion { index: next }))
                }
            }
        }
    }

    /// Feed one event into the session.
    pub fn handle(&mut self, event: QuizEvent) -> Transition {
        match self.plan(event) {
            Ok(step) => {
                tracing::debug!(?event, from = ?self.state, to = ?step.next, delta = step.score_delta, "transition");
                self.apply(step);
                Transition::Applied(step)
            }
            Err(reason) => {
                tracing::debug!(?event, state = ?self.state, %reason, "event ignored");
                Transition::Ignored(reason)
            }
        }
    }

    fn apply(&mut self, step: Step) {
        match step.next {
            SessionState::PresentingQuestion { index } => self.present(index),
            SessionState::FeedbackShown { index, selected } => {
                self.score += step.score_delta;
                if let (Some(question), Some(option)) =
                    (self.bank.get(index), self.option_at(index, selected))
                {
                    self.answers.push(AnsweredQuestion {
                        question_id: question.id,
                        chosen: option.text.clone(),
                        points: option.points,
                        correct: option.correct,
                    });
                }
            }
            SessionState::Finished => {
                let summary = self.build_summary();
                tracing::info!(
                    bank = %summary.bank_id,
                    score = %summary.score,
                    tier = %summary.result.tier,
                    "quiz finished"
                );
                self.summary = Some(summary);
                self.order.clear();
            }
            SessionState::AwaitingStart | SessionState::AwaitingConfirmation { .. } => {}
        }
        self.state = step.next;
    }

    /// Fresh option order for question `index`, discarding any previous one.
    fn present(&mut self, index: usize) {
        let len = self.bank.get(index).map_or(0, |q| q.options.len());
        self.order = if self.shuffle {
            shuffled_positions(len, &mut self.rng)
        } else {
            (0..len).collect()
        };
    }

    fn current_question(&self) -> Option<&'a Question> {
        self.state.question_index().and_then(|i| self.bank.get(i))
    }

    fn option_at(&self, index: usize, position: usize) -> Option<&'a AnswerOption> {
        let question = self.bank.get(index)?;
        question.options.get(*self.order.get(position)?)
    }

    /// The presented option at `position` for the current question.
    pub fn presented_option(&self, position: usize) -> Option<&'a AnswerOption> {
        let index = self.state.question_index()?;
        self.option_at(index, position)
    }

    /// View of the current question, or `None` before start and after finish.
    pub fn question_view(&self) -> Option<QuestionView<'a>> {
        let question = self.current_question()?;
        let (selected, locked) = match self.state {
            SessionState::AwaitingConfirmation { selected, .. } => (Some(selected), false),
            SessionState::FeedbackShown { selected, .. } => (Some(selected), true),
            _ => (None, false),
        };

        Some(QuestionView {
            number: self.state.question_index().map_or(0, |i| i + 1),
            total: self.bank.len(),
            question_id: question.id,
            prompt: &question.prompt,
            options: self
                .order
                .iter()
                .filter_map(|&i| question.options.get(i))
                .map(|o| o.text.as_str())
                .collect(),
            selected,
            locked,
            confirm_enabled: matches!(self.state, SessionState::AwaitingConfirmation { .. }),
            next_enabled: locked,
        })
    }

    /// Feedback for the confirmed answer, while it is on screen.
    pub fn feedback(&self) -> Option<Feedback> {
        let SessionState::FeedbackShown { index, selected } = self.state else {
            return None;
        };
        let option = self.option_at(index, selected)?;
        Some(Feedback {
            correct: option.correct,
            explanation: option.explanation.clone(),
            points: option.points,
        })
    }

    fn build_summary(&self) -> Summary {
        Summary {
            bank_id: self.bank.id().to_string(),
            score: self.score,
            max_score: self.bank.max_score(),
            question_count: self.bank.len(),
            correct_count: self.answers.iter().filter(|a| a.correct).count(),
            result: classify(i64::from(self.score)),
            answers: self.answers.clone(),
        }
    }
}
