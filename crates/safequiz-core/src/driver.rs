//! Drives a session from an event source to a presentation surface.

use std::collections::VecDeque;

use rand::Rng;

use crate::session::{
    Feedback, IgnoreReason, QuestionView, QuizEvent, Session, SessionState, Summary, Transition,
};

/// Where user events come from.
pub trait EventSource {
    /// The next event, or `None` once input is exhausted.
    fn next_event(&mut self) -> Option<QuizEvent>;
}

/// The presentation surface.
pub trait Presenter {
    /// A question was entered (options freshly shuffled).
    fn on_question(&mut self, view: &QuestionView<'_>);
    /// The selection changed.
    fn on_selection(&mut self, view: &QuestionView<'_>);
    /// An answer was locked in.
    fn on_feedback(&mut self, view: &QuestionView<'_>, feedback: &Feedback);
    /// The last question was passed.
    fn on_finished(&mut self, summary: &Summary);
    /// An event had no effect.
    fn on_ignored(&mut self, event: QuizEvent, reason: &IgnoreReason);
}

/// Presenter that shows nothing.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn on_question(&mut self, _: &QuestionView<'_>) {}
    fn on_selection(&mut self, _: &QuestionView<'_>) {}
    fn on_feedback(&mut self, _: &QuestionView<'_>, _: &Feedback) {}
    fn on_finished(&mut self, _: &Summary) {}
    fn on_ignored(&mut self, _: QuizEvent, _: &IgnoreReason) {}
}

/// A pre-recorded list of events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    events: VecDeque<QuizEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = QuizEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Option<QuizEvent> {
        self.events.pop_front()
    }
}

/// Pump events into `session` until it finishes or `source` runs dry.
///
/// Returns the final summary when the session reached `Finished`.
pub fn run_quiz<R: Rng>(
    session: &mut Session<'_, R>,
    source: &mut dyn EventSource,
    presenter: &mut dyn Presenter,
) -> Option<Summary> {
    while !session.is_finished() {
        let Some(event) = source.next_event() else {
            tracing::debug!(state = ?session.state(), "event source exhausted");
            break;
        };

        match session.handle(event) {
            Transition::Ignored(reason) => presenter.on_ignored(event, &reason),
            Transition::Applied(step) => match step.next {
                SessionState::PresentingQuestion { .. } => {
                    if let Some(view) = session.question_view() {
                        presenter.on_question(&view);
                    }
                }
                SessionState::AwaitingConfirmation { .. } => {
                    if let Some(view) = session.question_view() {
                        presenter.on_selection(&view);
                    }
                }
                SessionState::FeedbackShown { .. } => {
                    if let (Some(view), Some(feedback)) =
                        (session.question_view(), session.feedback())
                    {
                        presenter.on_feedback(&view, &feedback);
                    }
                }
                SessionState::Finished => {
                    if let Some(summary) = session.summary() {
                        presenter.on_finished(summary);
                    }
                }
                SessionState::AwaitingStart => {}
            },
        }
    }

    session.summary().cloned()
}
