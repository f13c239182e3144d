//! Scripted frontend for running interviews without user interaction.
//!
//! `ScriptedFrontend` replays a queue of [`Step`]s. Every question asked and
//! every validation error shown is recorded, so tests can assert on the path
//! an interview took.
//!
//! # Example
//!
//! ```rust,ignore
//! use interview::{InterviewEngine, ScriptedFrontend, run_interview};
//!
//! let mut frontend = ScriptedFrontend::new()
//!     .with_answer(20)
//!     .with_answer(true);
//! run_interview(&mut engine, &mut frontend)?;
//! assert_eq!(frontend.asked(), ["q1", "q2"]);
//! ```

use std::collections::VecDeque;

use interview_types::{AnswerValue, Question};

use crate::frontend::{Frontend, Step};

/// A frontend that replays pre-configured steps.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrontend {
    steps: VecDeque<Step>,
    asked: Vec<String>,
    errors: Vec<(String, String)>,
}

/// Error type for ScriptedFrontend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("No scripted step left for question {0}")]
    Exhausted(String),
}

impl ScriptedFrontend {
    /// Create a frontend with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a step.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push_back(step);
        self
    }

    /// Queue an answer.
    pub fn with_answer(self, value: impl Into<AnswerValue>) -> Self {
        self.with_step(Step::Answer(value.into()))
    }

    /// Queue a step back.
    pub fn with_back(self) -> Self {
        self.with_step(Step::Back)
    }

    /// Queue a quit.
    pub fn with_quit(self) -> Self {
        self.with_step(Step::Quit)
    }

    /// Ids of the questions asked, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Validation errors shown, as `(question id, message)` pairs.
    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }

    /// Number of steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Frontend for ScriptedFrontend {
    type Error = ScriptError;

    fn ask(
        &mut self,
        question: &Question,
        _current: Option<&AnswerValue>,
        _can_go_back: bool,
    ) -> Result<Step, Self::Error> {
        self.asked.push(question.id.clone());
        self.steps
            .pop_front()
            .ok_or_else(|| ScriptError::Exhausted(question.id.clone()))
    }

    fn show_error(&mut self, question: &Question, message: &str) {
        self.errors.push((question.id.clone(), message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Definition, InterviewEngine, QuestionType, RunError, run_interview};

    fn engine() -> InterviewEngine {
        let definition = Definition::new(vec![
            Question::new("q1", "name", QuestionType::Text, "Name?").required(),
            Question::new("q2", "age", QuestionType::Integer, "Age?"),
        ])
        .unwrap();
        InterviewEngine::new(definition).unwrap()
    }

    #[test]
    fn replays_answers() {
        let mut engine = engine();
        let mut frontend = ScriptedFrontend::new().with_answer("Ada").with_answer(36);
        run_interview(&mut engine, &mut frontend).unwrap();
        assert!(engine.is_completed());
        assert_eq!(frontend.asked(), ["q1", "q2"]);
        assert_eq!(engine.answer("age"), Some(&AnswerValue::Number(36.0)));
    }

    #[test]
    fn rejected_answer_is_asked_again() {
        let mut engine = engine();
        let mut frontend = ScriptedFrontend::new()
            .with_answer("")
            .with_answer("Ada")
            .with_answer(1);
        run_interview(&mut engine, &mut frontend).unwrap();
        assert_eq!(frontend.asked(), ["q1", "q1", "q2"]);
        assert_eq!(
            frontend.errors(),
            [("q1".to_string(), "This field is required".to_string())]
        );
    }

    #[test]
    fn exhausted_script_is_frontend_error() {
        let mut engine = engine();
        let mut frontend = ScriptedFrontend::new().with_answer("Ada");
        let err = run_interview(&mut engine, &mut frontend).unwrap_err();
        assert!(matches!(err, RunError::Frontend(_)));
        assert!(err.to_string().contains("q2"));
    }

    #[test]
    fn quit_cancels() {
        let mut engine = engine();
        let mut frontend = ScriptedFrontend::new().with_quit();
        let err = run_interview(&mut engine, &mut frontend).unwrap_err();
        assert!(err.is_cancelled());
        assert!(!engine.is_completed());
    }

    #[test]
    fn back_revisits_previous_question() {
        let mut engine = engine();
        let mut frontend = ScriptedFrontend::new()
            .with_answer("Ada")
            .with_back()
            .with_answer("Grace")
            .with_answer(40);
        run_interview(&mut engine, &mut frontend).unwrap();
        assert_eq!(frontend.asked(), ["q1", "q2", "q1", "q2"]);
        assert_eq!(engine.answer("name"), Some(&AnswerValue::from("Grace")));
        assert_eq!(frontend.remaining(), 0);
    }

    #[test]
    fn completed_state_asks_nothing() {
        let mut engine = engine();
        engine.initialize(Some(crate::StateSnapshot {
            completed: Some(true),
            ..Default::default()
        }));
        let mut frontend = ScriptedFrontend::new().with_answer("Ada");
        run_interview(&mut engine, &mut frontend).unwrap();
        assert!(frontend.asked().is_empty());
        assert_eq!(frontend.remaining(), 1);
    }
}
