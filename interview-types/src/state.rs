use serde::{Deserialize, Serialize};

use crate::Answers;

/// The mutable state of a running interview.
///
/// `current_question_index` is an index into the definition's question list,
/// not a question id. `visited_questions` is the stack of previously current
/// indices: pushed on every advance, popped on every retreat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewState {
    /// Collected and computed values.
    pub answers: Answers,

    /// Index of the question the interview is positioned at.
    pub current_question_index: usize,

    /// Previously current indices, most recent last.
    pub visited_questions: Vec<usize>,

    /// True once no visible question remains at or after the current index.
    pub completed: bool,
}

impl InterviewState {
    /// Create a fresh state: no answers, index 0, no history, not completed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the fields present in `snapshot`, keeping the others.
    pub fn merge(&mut self, snapshot: StateSnapshot) {
        if let Some(answers) = snapshot.answers {
            self.answers = answers;
        }
        if let Some(index) = snapshot.current_question_index {
            self.current_question_index = index;
        }
        if let Some(visited) = snapshot.visited_questions {
            self.visited_questions = visited;
        }
        if let Some(completed) = snapshot.completed {
            self.completed = completed;
        }
    }
}

/// A persisted or restored interview state.
///
/// Every field is optional so that partial snapshots (for example a share code
/// that carries no `completed` flag) only overwrite what they contain. Unknown
/// keys in the source document are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Answers>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_question_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_questions: Option<Vec<usize>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl StateSnapshot {
    /// Parse a snapshot from its JSON form.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Serialize this snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<InterviewState> for StateSnapshot {
    fn from(state: InterviewState) -> Self {
        Self {
            answers: Some(state.answers),
            current_question_index: Some(state.current_question_index),
            visited_questions: Some(state.visited_questions),
            completed: Some(state.completed),
        }
    }
}

impl From<&InterviewState> for StateSnapshot {
    fn from(state: &InterviewState) -> Self {
        state.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_uses_camel_case_keys() {
        let mut state = InterviewState::new();
        state.answers.insert("age", 20);
        state.current_question_index = 1;
        state.visited_questions.push(0);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "answers": {"age": 20},
                "currentQuestionIndex": 1,
                "visitedQuestions": [0],
                "completed": false
            })
        );
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let mut state = InterviewState::new();
        state.completed = true;
        state.merge(StateSnapshot {
            current_question_index: Some(3),
            ..Default::default()
        });
        assert_eq!(state.current_question_index, 3);
        assert!(state.completed);
        assert!(state.answers.is_empty());
    }

    #[test]
    fn snapshot_ignores_unknown_keys() {
        let snapshot =
            StateSnapshot::from_json(r#"{"currentQuestionIndex": 2, "__proto__": {"x": 1}}"#)
                .unwrap();
        assert_eq!(snapshot.current_question_index, Some(2));
        assert!(snapshot.answers.is_none());
    }

    #[test]
    fn state_round_trips_through_snapshot() {
        let mut state = InterviewState::new();
        state.answers.insert("tags", vec!["a", "b"]);
        state.current_question_index = 4;
        state.visited_questions = vec![0, 2, 3];
        state.completed = true;

        let json = StateSnapshot::from(&state).to_json().unwrap();
        let mut restored = InterviewState::new();
        restored.merge(StateSnapshot::from_json(&json).unwrap());
        assert_eq!(restored, state);
    }
}
