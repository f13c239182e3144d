use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DefinitionError, Question};

/// Free-form definition metadata (title, author, ...), passed through to templates.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// The static description of an interview.
///
/// A definition is loaded once and never mutated afterwards. It holds the
/// ordered questions, the computed-field declarations, the document templates
/// and free-form metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// All questions in interview order.
    #[serde(default)]
    pub questions: Vec<Question>,

    /// Computed-field declarations, evaluated in order after every answer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,

    /// Document templates rendered from the final answers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<Template>,

    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Definition {
    /// Create a new definition with the given questions.
    ///
    /// Fails with [`DefinitionError::NoQuestions`] if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, DefinitionError> {
        Self {
            questions,
            variables: Vec::new(),
            templates: Vec::new(),
            metadata: None,
        }
        .checked()
    }

    /// Parse a definition from a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, DefinitionError> {
        if source.trim().is_empty() {
            return Err(DefinitionError::Empty);
        }
        let definition: Option<Self> = serde_yaml::from_str(source)?;
        definition.ok_or(DefinitionError::NoQuestions)?.checked()
    }

    /// Parse a definition from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, DefinitionError> {
        if source.trim().is_empty() {
            return Err(DefinitionError::Empty);
        }
        let definition: Option<Self> = serde_json::from_str(source)?;
        definition.ok_or(DefinitionError::NoQuestions)?.checked()
    }

    /// Load a definition from a file. `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    fn checked(self) -> Result<Self, DefinitionError> {
        if self.questions.is_empty() {
            Err(DefinitionError::NoQuestions)
        } else {
            Ok(self)
        }
    }

    /// Add a computed-field declaration.
    pub fn with_variable(mut self, name: impl Into<String>, computed: impl Into<String>) -> Self {
        self.variables.push(Variable::new(name, computed));
        self
    }

    /// Add a document template.
    pub fn with_template(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.templates.push(Template::new(name, content));
        self
    }

    /// Set a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get the computed-field declarations.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Get the document templates.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Get the metadata, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Find a question by its id.
    pub fn question_by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Check if the definition has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

/// A computed-field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// The answer-map key the result is written to.
    pub name: String,

    /// The expression to evaluate. Declarations without one are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<String>,
}

impl Variable {
    /// Create a new computed-field declaration.
    pub fn new(name: impl Into<String>, computed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            computed: Some(computed.into()),
        }
    }
}

/// A document template attached to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Display name of the template.
    #[serde(default)]
    pub name: String,

    /// Inline template text, or a path starting with `/`.
    pub content: String,
}

impl Template {
    /// Create a new template.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionType;

    const SAMPLE: &str = r##"
metadata:
  title: Voter check
questions:
  - id: q1
    variable: age
    type: integer
    question: How old are you?
    required: true
  - id: q2
    variable: canVote
    type: yesno
    question: Will you vote?
    show_if: "age >= 18"
variables:
  - name: nextYear
    computed: "age + 1"
templates:
  - name: Summary
    content: "# {{metadata.title}}"
"##;

    #[test]
    fn parses_yaml() {
        let definition = Definition::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(definition.len(), 2);
        assert_eq!(definition.questions()[1].kind, QuestionType::YesNo);
        assert_eq!(definition.variables()[0].computed.as_deref(), Some("age + 1"));
        assert_eq!(definition.templates()[0].name, "Summary");
        assert_eq!(
            definition.metadata().and_then(|m| m.get("title")),
            Some(&serde_json::json!("Voter check"))
        );
        assert_eq!(definition.question_by_id("q2").map(|q| q.variable.as_str()), Some("canVote"));
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(matches!(Definition::from_yaml_str("  \n"), Err(DefinitionError::Empty)));
        assert!(matches!(Definition::from_json_str(""), Err(DefinitionError::Empty)));
    }

    #[test]
    fn missing_questions_is_rejected() {
        let err = Definition::from_yaml_str("metadata:\n  title: x\n").unwrap_err();
        assert!(err.is_no_questions());
        assert_eq!(err.to_string(), "no questions");

        let err = Definition::from_json_str(r#"{"questions": []}"#).unwrap_err();
        assert!(err.is_no_questions());
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let err = Definition::from_yaml_str("questions: [ {id: q1").unwrap_err();
        assert!(matches!(err, DefinitionError::Yaml(_)));
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interview.json");
        std::fs::write(
            &path,
            r#"{"questions":[{"id":"q1","variable":"name","type":"text","question":"Name?"}]}"#,
        )
        .unwrap();
        let definition = Definition::from_path(&path).unwrap();
        assert_eq!(definition.questions()[0].variable, "name");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Definition::from_path("/definitely/not/here.yml").unwrap_err();
        assert!(matches!(err, DefinitionError::Io { .. }));
    }
}
