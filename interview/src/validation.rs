//! Per-question answer validation.
//!
//! [`validate_answer`] checks a candidate value against the question's type,
//! its `required` flag and its [`Validation`](interview_types::Validation)
//! rules. Failures carry the message shown to the user. Length and selection
//! limits of zero are treated as absent.

use std::sync::OnceLock;

use interview_types::{AnswerValue, Question, QuestionType, format_number};
use regex::Regex;

use crate::coerce;

const REQUIRED: &str = "This field is required";
const SELECT_AN_OPTION: &str = "Please select an option";

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Validate `value` as an answer to `question`.
pub fn validate_answer(question: &Question, value: &AnswerValue) -> Result<(), String> {
    match question.kind {
        QuestionType::Text => validate_text(question, value),
        QuestionType::Email => validate_email(question, value),
        QuestionType::Integer => validate_numeric(question, value, NumberKind::Integer),
        QuestionType::Number => validate_numeric(question, value, NumberKind::Decimal),
        QuestionType::YesNo => {
            if question.required && value.is_null() {
                Err(SELECT_AN_OPTION.to_string())
            } else {
                Ok(())
            }
        }
        QuestionType::Dropdown | QuestionType::Radio => {
            if question.required && !value.is_truthy() {
                Err(SELECT_AN_OPTION.to_string())
            } else {
                Ok(())
            }
        }
        QuestionType::Checkboxes => validate_checkboxes(question, value),
    }
}

/// Parse free-form numeric input the way the numeric validators do.
///
/// Integers take the longest leading run of digits (`"12abc"` is 12), decimals
/// the longest leading decimal literal. Unparseable input is `NaN`.
pub fn parse_numeric_input(kind: QuestionType, input: &str) -> f64 {
    match kind {
        QuestionType::Integer => coerce::parse_int_prefix(input),
        _ => coerce::parse_float_prefix(input),
    }
}

fn validate_text(question: &Question, value: &AnswerValue) -> Result<(), String> {
    let text = value.to_string();
    if question.required && coerce::trim(&text).is_empty() {
        return Err(REQUIRED.to_string());
    }

    let rules = question.rules();
    let length = text.chars().count();
    if let Some(min) = rules.min_length.filter(|&n| n > 0)
        && length < min
    {
        return Err(format!("Minimum length is {min} characters"));
    }
    if let Some(max) = rules.max_length.filter(|&n| n > 0)
        && length > max
    {
        return Err(format!("Maximum length is {max} characters"));
    }

    if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
        let matches = match Regex::new(pattern) {
            Ok(regex) => regex.is_match(&text),
            Err(err) => {
                log::warn!("Invalid validation pattern on question {}: {err}", question.id);
                false
            }
        };
        if !matches {
            return Err(rules
                .pattern_message
                .unwrap_or_else(|| "Invalid format".to_string()));
        }
    }

    Ok(())
}

fn validate_email(question: &Question, value: &AnswerValue) -> Result<(), String> {
    let text = value.to_string();
    if question.required && coerce::trim(&text).is_empty() {
        return Err(REQUIRED.to_string());
    }
    let valid = email_pattern().is_some_and(|regex| regex.is_match(&text));
    if !text.is_empty() && !valid {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum NumberKind {
    Integer,
    Decimal,
}

fn validate_numeric(question: &Question, value: &AnswerValue, kind: NumberKind) -> Result<(), String> {
    let blank = match value {
        AnswerValue::Null => true,
        AnswerValue::String(s) => coerce::trim(s).is_empty(),
        _ => false,
    };
    if blank {
        return if question.required {
            Err(REQUIRED.to_string())
        } else {
            Ok(())
        };
    }

    let number = match (value, kind) {
        (AnswerValue::Number(n), NumberKind::Integer) => n.trunc(),
        (AnswerValue::Number(n), NumberKind::Decimal) => *n,
        (other, NumberKind::Integer) => coerce::parse_int_prefix(&other.to_string()),
        (other, NumberKind::Decimal) => coerce::parse_float_prefix(&other.to_string()),
    };
    if number.is_nan() {
        return Err("Please enter a valid number".to_string());
    }

    let rules = question.rules();
    if let Some(min) = rules.min
        && number < min
    {
        return Err(format!("Minimum value is {}", format_number(min)));
    }
    if let Some(max) = rules.max
        && number > max
    {
        return Err(format!("Maximum value is {}", format_number(max)));
    }
    Ok(())
}

fn validate_checkboxes(question: &Question, value: &AnswerValue) -> Result<(), String> {
    let selected = value.as_list().map_or(0, <[String]>::len);
    if question.required && selected == 0 {
        return Err("Please select at least one option".to_string());
    }

    let rules = question.rules();
    if let Some(min) = rules.min_select.filter(|&n| n > 0)
        && selected < min
    {
        return Err(format!("Please select at least {min} options"));
    }
    if let Some(max) = rules.max_select.filter(|&n| n > 0)
        && selected > max
    {
        return Err(format!("Please select no more than {max} options"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_types::Validation;

    fn question(kind: QuestionType) -> Question {
        Question::new("q", "v", kind, "?")
    }

    #[test]
    fn required_text() {
        let q = question(QuestionType::Text).required();
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("   ")),
            Err("This field is required".to_string())
        );
        assert_eq!(
            validate_answer(&q, &AnswerValue::Null),
            Err("This field is required".to_string())
        );
        assert!(validate_answer(&q, &AnswerValue::from("ok")).is_ok());
    }

    #[test]
    fn text_length_limits() {
        let q = question(QuestionType::Text).with_validation(Validation {
            min_length: Some(3),
            max_length: Some(5),
            ..Default::default()
        });
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("ab")),
            Err("Minimum length is 3 characters".to_string())
        );
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("abcdef")),
            Err("Maximum length is 5 characters".to_string())
        );
        assert!(validate_answer(&q, &AnswerValue::from("äöü")).is_ok());
    }

    #[test]
    fn zero_limits_are_ignored() {
        let q = question(QuestionType::Text).with_validation(Validation {
            min_length: Some(0),
            max_length: Some(0),
            ..Default::default()
        });
        assert!(validate_answer(&q, &AnswerValue::from("anything")).is_ok());
    }

    #[test]
    fn text_pattern() {
        let q = question(QuestionType::Text).with_validation(Validation {
            pattern: Some("^[A-Z]{2}\\d+$".into()),
            pattern_message: Some("Use a ticket id like AB12".into()),
            ..Default::default()
        });
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("ab12")),
            Err("Use a ticket id like AB12".to_string())
        );
        assert!(validate_answer(&q, &AnswerValue::from("AB12")).is_ok());

        let q = question(QuestionType::Text).with_validation(Validation {
            pattern: Some("\\d".into()),
            ..Default::default()
        });
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("none")),
            Err("Invalid format".to_string())
        );
    }

    #[test]
    fn invalid_pattern_fails_validation() {
        let q = question(QuestionType::Text).with_validation(Validation {
            pattern: Some("([unclosed".into()),
            ..Default::default()
        });
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("x")),
            Err("Invalid format".to_string())
        );
    }

    #[test]
    fn integer_parsing_and_bounds() {
        let q = question(QuestionType::Integer).with_validation(Validation {
            min: Some(0.0),
            max: Some(150.0),
            ..Default::default()
        });
        assert!(validate_answer(&q, &AnswerValue::from("42 years")).is_ok());
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("abc")),
            Err("Please enter a valid number".to_string())
        );
        assert_eq!(
            validate_answer(&q, &AnswerValue::from(-1)),
            Err("Minimum value is 0".to_string())
        );
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("151")),
            Err("Maximum value is 150".to_string())
        );
        assert!(validate_answer(&q, &AnswerValue::from(150.9)).is_ok());
    }

    #[test]
    fn decimal_bounds() {
        let q = question(QuestionType::Number).with_validation(Validation {
            min: Some(0.5),
            ..Default::default()
        });
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("0.25")),
            Err("Minimum value is 0.5".to_string())
        );
        assert!(validate_answer(&q, &AnswerValue::from("1.5kg")).is_ok());
    }

    #[test]
    fn blank_numbers() {
        let required = question(QuestionType::Number).required();
        assert_eq!(
            validate_answer(&required, &AnswerValue::from("")),
            Err("This field is required".to_string())
        );
        let optional = question(QuestionType::Integer);
        assert!(validate_answer(&optional, &AnswerValue::Null).is_ok());
    }

    #[test]
    fn email() {
        let q = question(QuestionType::Email);
        assert!(validate_answer(&q, &AnswerValue::from("")).is_ok());
        assert!(validate_answer(&q, &AnswerValue::from("a@b.co")).is_ok());
        assert_eq!(
            validate_answer(&q, &AnswerValue::from("a@b")),
            Err("Please enter a valid email address".to_string())
        );
        assert_eq!(
            validate_answer(&q.clone().required(), &AnswerValue::from(" ")),
            Err("This field is required".to_string())
        );
    }

    #[test]
    fn choices() {
        let yesno = question(QuestionType::YesNo).required();
        assert_eq!(
            validate_answer(&yesno, &AnswerValue::Null),
            Err("Please select an option".to_string())
        );
        assert!(validate_answer(&yesno, &AnswerValue::Bool(false)).is_ok());

        let radio = question(QuestionType::Radio).required();
        assert_eq!(
            validate_answer(&radio, &AnswerValue::from("")),
            Err("Please select an option".to_string())
        );
        assert!(validate_answer(&radio, &AnswerValue::from("red")).is_ok());
    }

    #[test]
    fn checkbox_selection_limits() {
        let q = question(QuestionType::Checkboxes)
            .required()
            .with_validation(Validation {
                min_select: Some(2),
                max_select: Some(3),
                ..Default::default()
            });
        assert_eq!(
            validate_answer(&q, &AnswerValue::List(vec![])),
            Err("Please select at least one option".to_string())
        );
        assert_eq!(
            validate_answer(&q, &AnswerValue::from(vec!["a"])),
            Err("Please select at least 2 options".to_string())
        );
        assert_eq!(
            validate_answer(&q, &AnswerValue::from(vec!["a", "b", "c", "d"])),
            Err("Please select no more than 3 options".to_string())
        );
        assert!(validate_answer(&q, &AnswerValue::from(vec!["a", "b"])).is_ok());
    }

    #[test]
    fn numeric_input_parsing() {
        assert_eq!(parse_numeric_input(QuestionType::Integer, " 7.9"), 7.0);
        assert_eq!(parse_numeric_input(QuestionType::Number, "7.9"), 7.9);
        assert!(parse_numeric_input(QuestionType::Number, "seven").is_nan());
    }
}
