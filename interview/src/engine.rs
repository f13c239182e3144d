//! The interview state machine.

use std::fmt;

use interview_types::{
    AnswerValue, Answers, Definition, DefinitionError, InterviewState, Question, StateSnapshot,
};

use crate::computed::refresh_computed;
use crate::expression::{self, EvalMode};

/// Construction options for [`InterviewEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Emit a `debug` log record for every transition, selection step and
    /// expression evaluation.
    pub debug: bool,
}

impl EngineOptions {
    /// Enable or disable debug tracing.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Handle returned by [`InterviewEngine::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&InterviewState)>;

/// Drives an interview over a [`Definition`].
///
/// The engine owns the definition and the [`InterviewState`]. Every mutating
/// operation runs to completion and then notifies the registered observers,
/// synchronously and in registration order.
///
/// ```rust,ignore
/// let mut engine = InterviewEngine::new(Definition::from_path("taxes.yml")?)?;
/// while let Some(question) = engine.current_question() {
///     let variable = question.variable.clone();
///     engine.set_answer(variable, read_answer());
///     engine.next_question();
/// }
/// ```
pub struct InterviewEngine {
    definition: Definition,
    state: InterviewState,
    options: EngineOptions,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl InterviewEngine {
    /// Create an engine with default options.
    ///
    /// Fails with [`DefinitionError::NoQuestions`] if the definition has no questions.
    pub fn new(definition: Definition) -> Result<Self, DefinitionError> {
        Self::with_options(definition, EngineOptions::default())
    }

    /// Create an engine with the given options.
    pub fn with_options(
        definition: Definition,
        options: EngineOptions,
    ) -> Result<Self, DefinitionError> {
        if definition.is_empty() {
            return Err(DefinitionError::NoQuestions);
        }
        let engine = Self {
            definition,
            state: InterviewState::new(),
            options,
            observers: Vec::new(),
            next_subscription: 0,
        };
        engine.trace(&format!(
            "engine created: {} questions, {} variables, {} templates",
            engine.definition.len(),
            engine.definition.variables().len(),
            engine.definition.templates().len()
        ));
        Ok(engine)
    }

    /// Replace the state with a fresh one, overwritten by the fields present in `snapshot`.
    ///
    /// Notifies observers once.
    pub fn initialize(&mut self, snapshot: Option<StateSnapshot>) {
        let mut state = InterviewState::new();
        if let Some(snapshot) = snapshot {
            state.merge(snapshot);
            self.trace("initialized from snapshot");
        }
        self.state = state;
        self.notify();
    }

    /// Get the question the interview is positioned at.
    ///
    /// Scans forward from the stored index and returns the first visible
    /// question. The stored index is not moved. If no visible question
    /// remains, the interview is marked completed and `None` is returned.
    pub fn current_question(&mut self) -> Option<&Question> {
        let start = self.state.current_question_index;
        match self.first_visible_from(start) {
            Some(index) => {
                self.trace(&format!(
                    "selected question {} at index {index} (scan started at {start})",
                    self.definition.questions()[index].id
                ));
                self.definition.questions().get(index)
            }
            None => {
                self.state.completed = true;
                self.trace("no visible question remains, interview completed");
                None
            }
        }
    }

    /// Get all questions visible under the current answers, with their indices.
    pub fn visible_questions(&self) -> Vec<(usize, &Question)> {
        self.definition
            .questions()
            .iter()
            .enumerate()
            .filter(|(_, question)| self.is_visible(question))
            .collect()
    }

    /// Store an answer, refresh computed fields and notify observers.
    pub fn set_answer(&mut self, variable: impl Into<String>, value: impl Into<AnswerValue>) {
        let variable = variable.into();
        let value = value.into();
        if self.options.debug {
            let previous = self.state.answers.get(&variable).cloned().unwrap_or_default();
            self.trace(&format!(
                "answer set: {variable} = {value:?} (was {previous:?})"
            ));
        }
        self.state.answers.insert(variable, value);
        refresh_computed(&self.definition, &mut self.state.answers);
        self.notify();
    }

    /// Advance past the current position.
    ///
    /// Does nothing once the interview is completed.
    pub fn next_question(&mut self) {
        if self.state.completed {
            self.trace("cannot advance, interview already completed");
            return;
        }

        let from = self.state.current_question_index;
        self.state.visited_questions.push(from);
        self.state.current_question_index += 1;
        self.trace(&format!(
            "advanced from index {from} to {}",
            self.state.current_question_index
        ));

        if self.current_question().is_none() {
            self.state.completed = true;
        }
        self.notify();
    }

    /// Return to the most recently visited position.
    ///
    /// Does nothing if there is no history. Clears the completed flag; the
    /// restored position is not checked for visibility.
    pub fn previous_question(&mut self) {
        let Some(index) = self.state.visited_questions.pop() else {
            self.trace("cannot go back, no visited questions");
            return;
        };
        let from = self.state.current_question_index;
        self.state.current_question_index = index;
        self.state.completed = false;
        self.trace(&format!("went back from index {from} to {index}"));
        self.notify();
    }

    /// Check if the interview can step back.
    pub fn can_go_back(&self) -> bool {
        !self.state.visited_questions.is_empty()
    }

    /// Progress in percent.
    ///
    /// 100 once completed, otherwise the stored index relative to the total
    /// number of questions, rounded. Hidden questions are not discounted.
    pub fn progress(&self) -> u32 {
        if self.state.completed {
            return 100;
        }
        let total = self.definition.len() as f64;
        (self.state.current_question_index as f64 / total * 100.0).round() as u32
    }

    /// Discard all answers and history.
    pub fn reset(&mut self) {
        let previous_answers = self.state.answers.len();
        self.state = InterviewState::new();
        self.trace(&format!("reset, {previous_answers} answers discarded"));
        self.notify();
    }

    /// Register an observer called with the full state after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&InterviewState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Get the current state.
    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    /// Get the current state in its persisted form.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from(&self.state)
    }

    /// Get the answer map.
    pub fn answers(&self) -> &Answers {
        &self.state.answers
    }

    /// Get the value stored under `variable`.
    pub fn answer(&self, variable: &str) -> Option<&AnswerValue> {
        self.state.answers.get(variable)
    }

    /// Check if the interview is completed.
    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// Get the definition.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// Get the engine options.
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    fn first_visible_from(&self, start: usize) -> Option<usize> {
        let questions = self.definition.questions();
        (start..questions.len()).find(|&index| self.is_visible(&questions[index]))
    }

    fn is_visible(&self, question: &Question) -> bool {
        let Some(condition) = &question.show_if else {
            return true;
        };
        let result = expression::evaluate(condition, &self.state.answers, EvalMode::Boolean);
        self.trace(&format!(
            "question {} condition {condition:?} evaluated to {result:?}",
            question.id
        ));
        result.is_truthy()
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }

    fn trace(&self, message: &str) {
        if self.options.debug {
            log::debug!(
                "{message} [index={}, answers={}, visited={}, completed={}]",
                self.state.current_question_index,
                self.state.answers.len(),
                self.state.visited_questions.len(),
                self.state.completed
            );
        }
    }
}

impl fmt::Debug for InterviewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterviewEngine")
            .field("definition", &self.definition)
            .field("state", &self.state)
            .field("options", &self.options)
            .field("observers", &self.observers.len())
            .finish()
    }
}
