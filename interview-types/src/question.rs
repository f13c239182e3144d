use serde::{Deserialize, Serialize};

/// A single question in an interview definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier of this question.
    pub id: String,

    /// The answer-map key this question writes to (need not be unique).
    pub variable: String,

    /// The input type of this question.
    #[serde(rename = "type")]
    pub kind: QuestionType,

    /// The prompt text shown to the user.
    #[serde(rename = "question", default)]
    pub prompt: String,

    /// Whether an answer must be given before advancing.
    #[serde(default)]
    pub required: bool,

    /// Choices for dropdown, radio and checkboxes questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,

    /// Per-question validation constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,

    /// Condition gating the visibility of this question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<String>,

    /// Legacy computed expression written into `variable` after every answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<String>,
}

impl Question {
    /// Create a new question without options, validation or conditions.
    pub fn new(
        id: impl Into<String>,
        variable: impl Into<String>,
        kind: QuestionType,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            variable: variable.into(),
            kind,
            prompt: prompt.into(),
            required: false,
            options: Vec::new(),
            validation: None,
            show_if: None,
            computed: None,
        }
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the visibility condition.
    pub fn with_show_if(mut self, condition: impl Into<String>) -> Self {
        self.show_if = Some(condition.into());
        self
    }

    /// Set the legacy computed expression.
    pub fn with_computed(mut self, expression: impl Into<String>) -> Self {
        self.computed = Some(expression.into());
        self
    }

    /// Add a choice option.
    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(ChoiceOption::new(value, label));
        self
    }

    /// Set the validation constraints.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Get the validation constraints, or an empty set.
    pub fn rules(&self) -> Validation {
        self.validation.clone().unwrap_or_default()
    }
}

/// The input type of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Single-line free text.
    Text,
    /// An email address.
    Email,
    /// A whole number.
    Integer,
    /// A decimal number.
    Number,
    /// A yes/no choice.
    YesNo,
    /// Pick one option from a drop-down list.
    Dropdown,
    /// Pick one option from a radio group.
    Radio,
    /// Pick any number of options.
    Checkboxes,
}

impl QuestionType {
    /// Check if this type requires `options`.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio | Self::Checkboxes)
    }

    /// The name used in definition documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::YesNo => "yesno",
            Self::Dropdown => "dropdown",
            Self::Radio => "radio",
            Self::Checkboxes => "checkboxes",
        }
    }
}

/// A selectable option of a dropdown, radio or checkboxes question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// The value stored in the answer map.
    pub value: String,

    /// The text shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Create a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Validation constraints of a question. Every constraint is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    /// Minimum text length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum text length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Regular expression the text must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Message shown when `pattern` does not match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,

    /// Minimum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Maximum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Minimum number of selected checkboxes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_select: Option<usize>,

    /// Maximum number of selected checkboxes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_select: Option<usize>,
}
