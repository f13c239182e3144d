//! Dialoguer frontend implementation for the Frontend trait.

use dialoguer::{FuzzySelect, Input, MultiSelect, Select, theme::ColorfulTheme};
use interview::{AnswerValue, Frontend, Question, QuestionType, Step, parse_numeric_input};
use thiserror::Error;

/// Label of the extra selection entry that steps back.
pub const BACK_LABEL: &str = "← Back";

/// Text typed into an input prompt to step back.
pub const BACK_INPUT: &str = "<";

/// Error type for the Dialoguer frontend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

/// Map a prompt result: cancellation quits the interview, other errors propagate.
fn step_or_quit<T>(
    result: Result<T, dialoguer::Error>,
    to_step: impl FnOnce(T) -> Step,
) -> Result<Step, DialoguerError> {
    match result {
        Ok(value) => Ok(to_step(value)),
        Err(e) if is_cancelled(&e) => Ok(Step::Quit),
        Err(e) => Err(DialoguerError::Dialoguer(e)),
    }
}

/// Dialoguer frontend for interactive CLI prompts.
///
/// Text, email and numeric questions use a line input; yes/no and radio
/// questions a selection list, dropdowns a fuzzy-searchable list and
/// checkboxes a multi-selection.
#[derive(Debug, Default, Clone)]
pub struct DialoguerFrontend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerFrontend {
    /// Create a new Dialoguer frontend with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a frontend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn ask_input(
        &self,
        question: &Question,
        current: Option<&AnswerValue>,
        can_go_back: bool,
    ) -> Result<Step, DialoguerError> {
        let _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(&question.prompt).allow_empty(true);
        if let Some(value) = current.filter(|value| !value.is_null()) {
            builder = builder.with_initial_text(value.to_string());
        }

        step_or_quit(builder.interact_text(), |text| {
            text_step(question.kind, &text, can_go_back)
        })
    }

    fn ask_yes_no(
        &self,
        question: &Question,
        current: Option<&AnswerValue>,
        can_go_back: bool,
    ) -> Result<Step, DialoguerError> {
        let items = with_back(vec!["Yes", "No"], can_go_back);

        let mut builder: Select;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        let default = match current.and_then(AnswerValue::as_bool) {
            Some(false) => 1,
            _ => 0,
        };
        builder = builder.with_prompt(&question.prompt).items(&items).default(default);

        step_or_quit(builder.interact(), |index| match index {
            0 => Step::Answer(AnswerValue::Bool(true)),
            1 => Step::Answer(AnswerValue::Bool(false)),
            _ => Step::Back,
        })
    }

    fn ask_choice(
        &self,
        question: &Question,
        current: Option<&AnswerValue>,
        can_go_back: bool,
    ) -> Result<Step, DialoguerError> {
        let labels: Vec<&str> = question.options.iter().map(|o| o.label.as_str()).collect();
        let items = with_back(labels, can_go_back);
        let default = current
            .and_then(AnswerValue::as_str)
            .and_then(|value| question.options.iter().position(|o| o.value == value))
            .unwrap_or(0);

        let _theme;
        let result = if question.kind == QuestionType::Dropdown {
            let mut builder: FuzzySelect;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = FuzzySelect::with_theme(&_theme);
            } else {
                builder = FuzzySelect::new();
            }
            builder
                .with_prompt(&question.prompt)
                .items(&items)
                .default(default)
                .interact()
        } else {
            let mut builder: Select;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = Select::with_theme(&_theme);
            } else {
                builder = Select::new();
            }
            builder
                .with_prompt(&question.prompt)
                .items(&items)
                .default(default)
                .interact()
        };

        step_or_quit(result, |index| choice_step(question, index))
    }

    fn ask_checkboxes(
        &self,
        question: &Question,
        current: Option<&AnswerValue>,
        can_go_back: bool,
    ) -> Result<Step, DialoguerError> {
        let labels: Vec<&str> = question.options.iter().map(|o| o.label.as_str()).collect();
        let items = with_back(labels, can_go_back);
        let selected = current.and_then(AnswerValue::as_list).unwrap_or_default();
        let defaults: Vec<bool> = question
            .options
            .iter()
            .map(|o| selected.contains(&o.value))
            .chain(can_go_back.then_some(false))
            .collect();

        let mut builder: MultiSelect;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = MultiSelect::with_theme(&_theme);
        } else {
            builder = MultiSelect::new();
        }
        builder = builder
            .with_prompt(&question.prompt)
            .items(&items)
            .defaults(&defaults);

        step_or_quit(builder.interact(), |indices| checkbox_step(question, &indices))
    }
}

impl Frontend for DialoguerFrontend {
    type Error = DialoguerError;

    fn ask(
        &mut self,
        question: &Question,
        current: Option<&AnswerValue>,
        can_go_back: bool,
    ) -> Result<Step, Self::Error> {
        match question.kind {
            QuestionType::Text
            | QuestionType::Email
            | QuestionType::Integer
            | QuestionType::Number => self.ask_input(question, current, can_go_back),
            QuestionType::YesNo => self.ask_yes_no(question, current, can_go_back),
            QuestionType::Dropdown | QuestionType::Radio => {
                self.ask_choice(question, current, can_go_back)
            }
            QuestionType::Checkboxes => self.ask_checkboxes(question, current, can_go_back),
        }
    }

    fn show_error(&mut self, _question: &Question, message: &str) {
        println!("Error: {message}");
    }
}

fn with_back(mut items: Vec<&str>, can_go_back: bool) -> Vec<&str> {
    if can_go_back {
        items.push(BACK_LABEL);
    }
    items
}

/// Interpret typed text for a question of type `kind`.
///
/// Numeric text is converted with the lenient numeric parse; text that does
/// not parse is passed on unchanged so validation can reject it.
fn text_step(kind: QuestionType, text: &str, can_go_back: bool) -> Step {
    if can_go_back && text.trim() == BACK_INPUT {
        return Step::Back;
    }
    match kind {
        QuestionType::Integer | QuestionType::Number => {
            if text.trim().is_empty() {
                return Step::Answer(AnswerValue::Null);
            }
            let number = parse_numeric_input(kind, text);
            if number.is_nan() {
                Step::Answer(AnswerValue::String(text.to_string()))
            } else {
                Step::Answer(AnswerValue::Number(number))
            }
        }
        _ => Step::Answer(AnswerValue::String(text.to_string())),
    }
}

/// Map a selected index to the option's value, or to a step back.
fn choice_step(question: &Question, index: usize) -> Step {
    match question.options.get(index) {
        Some(option) => Step::Answer(AnswerValue::String(option.value.clone())),
        None => Step::Back,
    }
}

/// Map selected indices to option values. Selecting the back entry steps back.
fn checkbox_step(question: &Question, indices: &[usize]) -> Step {
    if indices.iter().any(|&i| i >= question.options.len()) {
        return Step::Back;
    }
    let values = indices
        .iter()
        .map(|&i| question.options[i].value.clone())
        .collect();
    Step::Answer(AnswerValue::List(values))
}
