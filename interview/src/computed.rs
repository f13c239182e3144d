//! Computed-field resolution.

use interview_types::{AnswerValue, Answers, Definition};

use crate::expression::Expression;

/// Re-evaluate every computed field of `definition` and write the results into `answers`.
///
/// Runs in two phases: first the `variables` declarations in order, then the
/// questions carrying a legacy `computed` expression. Each expression sees the
/// answer map as left by the writes before it, so a variable that reads a
/// question-level computed value sees the value from the previous refresh.
///
/// A failing expression writes null and is logged; it does not stop the
/// remaining computations.
pub fn refresh_computed(definition: &Definition, answers: &mut Answers) {
    for variable in definition.variables() {
        if let Some(expression) = &variable.computed {
            compute_into(&variable.name, expression, answers);
        }
    }

    for question in definition.questions() {
        if let Some(expression) = &question.computed {
            compute_into(&question.variable, expression, answers);
        }
    }
}

fn compute_into(target: &str, expression: &str, answers: &mut Answers) {
    let value = match Expression::parse(expression) {
        Ok(parsed) => parsed.evaluate(answers),
        Err(err) => {
            log::error!("Error computing {target}: {err}");
            AnswerValue::Null
        }
    };
    answers.insert(target, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_types::{Question, QuestionType};

    fn definition() -> Definition {
        Definition::new(vec![
            Question::new("q1", "a", QuestionType::Integer, "A?"),
            Question::new("q2", "b", QuestionType::Integer, "B?"),
        ])
        .unwrap()
    }

    #[test]
    fn sum_of_two_answers() {
        let definition = definition().with_variable("total", "a + b");
        let mut answers: Answers = [("a", 2), ("b", 3)].into_iter().collect();
        refresh_computed(&definition, &mut answers);
        assert_eq!(answers.get("total"), Some(&AnswerValue::Number(5.0)));
    }

    #[test]
    fn overwrites_manual_value() {
        let definition = definition().with_variable("total", "a * 2");
        let mut answers: Answers = [("a", 4)].into_iter().collect();
        answers.insert("total", "typed by hand");
        refresh_computed(&definition, &mut answers);
        assert_eq!(answers.get("total"), Some(&AnswerValue::Number(8.0)));
    }

    #[test]
    fn failure_is_isolated() {
        let definition = definition()
            .with_variable("broken", "a")
            .with_variable("double", "a * 2");
        let mut answers: Answers = [("a", 4)].into_iter().collect();
        refresh_computed(&definition, &mut answers);
        assert_eq!(answers.get("broken"), Some(&AnswerValue::Null));
        assert_eq!(answers.get("double"), Some(&AnswerValue::Number(8.0)));
    }

    #[test]
    fn variables_chain_in_declaration_order() {
        let definition = definition()
            .with_variable("x", "a + 1")
            .with_variable("y", "x * 10");
        let mut answers: Answers = [("a", 1)].into_iter().collect();
        refresh_computed(&definition, &mut answers);
        assert_eq!(answers.get("y"), Some(&AnswerValue::Number(20.0)));
    }

    #[test]
    fn legacy_question_fields_run_after_variables() {
        let mut definition = definition().with_variable("seen", "legacy + 0");
        definition
            .questions
            .push(Question::new("q3", "legacy", QuestionType::Number, "").with_computed("a + 100"));
        let mut answers: Answers = [("a", 1)].into_iter().collect();

        refresh_computed(&definition, &mut answers);
        // First pass: `legacy` did not exist yet when `seen` was computed.
        assert!(answers.get("seen").and_then(AnswerValue::as_number).is_some_and(f64::is_nan));
        assert_eq!(answers.get("legacy"), Some(&AnswerValue::Number(101.0)));

        answers.insert("a", 2);
        refresh_computed(&definition, &mut answers);
        // Second pass: `seen` reads the previous value of `legacy`.
        assert_eq!(answers.get("seen"), Some(&AnswerValue::Number(101.0)));
        assert_eq!(answers.get("legacy"), Some(&AnswerValue::Number(102.0)));
    }
}
