//! Frontends collect answers from a user, one question at a time.

use interview_types::{AnswerValue, Question};

use crate::engine::InterviewEngine;
use crate::validation::validate_answer;

/// What the user did when asked a question.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Submit this value as the answer.
    Answer(AnswerValue),
    /// Return to the previous question.
    Back,
    /// Stop the interview.
    Quit,
}

/// Trait for frontend implementations that present questions to a user.
///
/// Frontends only ask; the driver ([`run_interview`]) owns navigation,
/// validation and answer storage.
pub trait Frontend {
    /// The error type for this frontend.
    type Error: Into<anyhow::Error>;

    /// Present `question` and wait for the user's step.
    ///
    /// # Arguments
    /// * `question` - The question to ask
    /// * `current` - The value currently stored for the question's variable, if any
    /// * `can_go_back` - Whether [`Step::Back`] will have an effect
    fn ask(
        &mut self,
        question: &Question,
        current: Option<&AnswerValue>,
        can_go_back: bool,
    ) -> Result<Step, Self::Error>;

    /// Report a validation failure for the value just submitted.
    fn show_error(&mut self, question: &Question, message: &str);
}

/// Error type for [`run_interview`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The user quit before the interview was completed.
    #[error("Interview cancelled by user")]
    Cancelled,

    /// Frontend-specific failure (I/O, terminal errors, etc.)
    #[error("Frontend error: {0}")]
    Frontend(#[from] anyhow::Error),
}

impl RunError {
    /// Create a frontend error from any error type.
    pub fn frontend(err: impl Into<anyhow::Error>) -> Self {
        Self::Frontend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Run `engine` to completion, asking questions through `frontend`.
///
/// Returns immediately if the engine is already completed.
///
/// Submitted answers are validated first; a rejected answer is reported via
/// [`Frontend::show_error`] and the question is asked again. Accepted answers
/// are stored under the question's variable before advancing.
pub fn run_interview<F: Frontend>(
    engine: &mut InterviewEngine,
    frontend: &mut F,
) -> Result<(), RunError> {
    loop {
        if engine.is_completed() {
            return Ok(());
        }
        let Some(question) = engine.current_question().cloned() else {
            return Ok(());
        };

        let current = engine.answer(&question.variable).cloned();
        let step = frontend
            .ask(&question, current.as_ref(), engine.can_go_back())
            .map_err(RunError::frontend)?;

        match step {
            Step::Answer(value) => {
                if let Err(message) = validate_answer(&question, &value) {
                    log::info!("Answer to {} rejected: {message}", question.id);
                    frontend.show_error(&question, &message);
                    continue;
                }
                engine.set_answer(question.variable.clone(), value);
                engine.next_question();
            }
            Step::Back => engine.previous_question(),
            Step::Quit => return Err(RunError::Cancelled),
        }
    }
}
