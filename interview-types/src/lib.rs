//! Core types for the interview crate.
//!
//! This crate provides the foundational types for running interviews:
//! - `Definition` - The immutable interview description (questions, computed fields, templates)
//! - `Question` and `QuestionType` - Individual questions and their input types
//! - `AnswerValue` and `Answers` - Collected and computed values keyed by variable name
//! - `InterviewState` and `StateSnapshot` - Navigation state and its persisted form

mod answer_value;
pub use answer_value::{AnswerValue, format_number};

mod answers;
pub use answers::Answers;

mod question;
pub use question::{ChoiceOption, Question, QuestionType, Validation};

mod definition;
pub use definition::{Definition, Metadata, Template, Variable};

mod state;
pub use state::{InterviewState, StateSnapshot};

mod error;
pub use error::DefinitionError;
