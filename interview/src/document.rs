//! Template data binding.
//!
//! Flattens a definition and its answers into the JSON object a document
//! template is rendered against.

use chrono::{Local, NaiveDateTime};
use interview_types::{AnswerValue, Answers, Definition};
use serde_json::{Map, Value, json};

/// Placeholder for questions without a truthy answer.
pub const NOT_ANSWERED: &str = "Not answered";

/// Build the template data for `definition` and `answers` at time `now`.
///
/// The object has the keys `metadata`, `current_date` (`M/D/YYYY`),
/// `current_time` (`h:mm:ss AM`) and `questions` (a `{question, answer}` pair
/// per question, in definition order, with selections as comma-joined text). Every answer is then added as a
/// top-level key of its own, replacing a built-in key of the same name.
pub fn template_data(definition: &Definition, answers: &Answers, now: NaiveDateTime) -> Value {
    let questions: Vec<Value> = definition
        .questions()
        .iter()
        .map(|question| {
            let answer = match answers.get(&question.variable) {
                Some(value @ AnswerValue::List(_)) => Value::from(value.to_string()),
                Some(value) if value.is_truthy() => value.to_json(),
                _ => Value::from(NOT_ANSWERED),
            };
            json!({ "question": question.prompt, "answer": answer })
        })
        .collect();

    let metadata = definition
        .metadata()
        .map(|metadata| Value::Object(metadata.clone().into_iter().collect()))
        .unwrap_or_else(|| Value::Object(Map::new()));

    let mut data = Map::new();
    data.insert("metadata".into(), metadata);
    data.insert("current_date".into(), now.format("%-m/%-d/%Y").to_string().into());
    data.insert("current_time".into(), now.format("%-I:%M:%S %p").to_string().into());
    data.insert("questions".into(), Value::Array(questions));
    for (name, value) in answers {
        data.insert(name.clone(), value.to_json());
    }
    Value::Object(data)
}

/// Build the template data stamped with the local time.
pub fn template_data_now(definition: &Definition, answers: &Answers) -> Value {
    template_data(definition, answers, Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use interview_types::{Question, QuestionType};

    fn afternoon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(15, 4, 9)
            .unwrap()
    }

    fn definition() -> Definition {
        Definition::new(vec![
            Question::new("q1", "name", QuestionType::Text, "Your name?"),
            Question::new("q2", "pets", QuestionType::Integer, "How many pets?"),
            Question::new("q3", "colors", QuestionType::Checkboxes, "Colors?"),
        ])
        .unwrap()
        .with_metadata("title", "Intake")
    }

    #[test]
    fn builds_flat_object() {
        let answers: Answers = [
            ("name", AnswerValue::from("Ada")),
            ("pets", AnswerValue::from(0)),
            ("colors", AnswerValue::from(vec!["red", "blue"])),
        ]
        .into_iter()
        .collect();

        let data = template_data(&definition(), &answers, afternoon());
        assert_eq!(data["metadata"], json!({"title": "Intake"}));
        assert_eq!(data["current_date"], "3/7/2024");
        assert_eq!(data["current_time"], "3:04:09 PM");
        assert_eq!(
            data["questions"],
            json!([
                {"question": "Your name?", "answer": "Ada"},
                {"question": "How many pets?", "answer": "Not answered"},
                {"question": "Colors?", "answer": "red,blue"},
            ])
        );
        assert_eq!(data["name"], "Ada");
        assert_eq!(data["pets"], 0);
        assert_eq!(data["colors"], json!(["red", "blue"]));
    }

    #[test]
    fn answers_override_builtin_keys() {
        let answers: Answers = [("current_date", "tomorrow")].into_iter().collect();
        let data = template_data(&definition(), &answers, afternoon());
        assert_eq!(data["current_date"], "tomorrow");
    }

    #[test]
    fn missing_metadata_is_empty_object() {
        let definition =
            Definition::new(vec![Question::new("q", "v", QuestionType::Text, "?")]).unwrap();
        let data = template_data(&definition, &Answers::new(), afternoon());
        assert_eq!(data["metadata"], json!({}));
        assert_eq!(data["questions"][0]["answer"], "Not answered");
    }
}
