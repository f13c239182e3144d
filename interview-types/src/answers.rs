use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::AnswerValue;

/// The answer map: collected and computed values keyed by variable name.
///
/// Several questions may share a variable; the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<String, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer map.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert (or overwrite) the value stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&AnswerValue> {
        self.values.get(name)
    }

    /// Check if a value exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove the value stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<AnswerValue> {
        self.values.remove(name)
    }

    /// Get an iterator over all name-value pairs, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no stored values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another answer map into this one, overwriting existing names.
    pub fn extend(&mut self, other: Answers) {
        self.values.extend(other.values);
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Answers {
    type Item = (String, AnswerValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a String, &'a AnswerValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut answers = Answers::new();
        answers.insert("name", "Alice");
        answers.insert("age", 30);

        assert_eq!(answers.get("name").and_then(AnswerValue::as_str), Some("Alice"));
        assert_eq!(answers.get("age").and_then(AnswerValue::as_number), Some(30.0));
        assert!(answers.get("missing").is_none());
    }

    #[test]
    fn last_write_wins() {
        let mut answers = Answers::new();
        answers.insert("color", "red");
        answers.insert("color", "blue");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("color"), Some(&AnswerValue::from("blue")));
    }

    #[test]
    fn serializes_as_plain_object() {
        let answers: Answers = [("a", AnswerValue::from(1)), ("b", AnswerValue::from(true))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"a":1,"b":true}"#);
    }
}
