//! # interview
//!
//! Run conditional question-and-answer interviews and collect typed answers.
//! Frontend-agnostic.
//!
//! An interview is described by a [`Definition`]: an ordered list of
//! questions, optional computed fields, document templates and metadata. The
//! [`InterviewEngine`] walks through the questions, skipping those whose
//! `show_if` condition is false, stores answers and keeps computed fields up
//! to date.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use interview::{Definition, InterviewEngine, run_interview};
//!
//! let definition = Definition::from_yaml_str(r#"
//! questions:
//!   - id: q1
//!     variable: age
//!     type: integer
//!     question: How old are you?
//!     required: true
//!   - id: q2
//!     variable: canVote
//!     type: yesno
//!     question: Are you registered to vote?
//!     show_if: "age >= 18"
//! "#)?;
//!
//! let mut engine = InterviewEngine::new(definition)?;
//! run_interview(&mut engine, &mut frontend)?;
//! ```
//!
//! ## Expressions
//!
//! Conditions and computed fields use a deliberately tiny language: one
//! variable, one operator and one literal, e.g. `age >= 18`,
//! `name === 'Bob'` or `price * 1.2`. See [`expression`].
//!
//! ## Frontends
//!
//! Frontends implement [`Frontend`]:
//! - `interview-dialoguer-wizard` - CLI prompts via dialoguer
//! - [`ScriptedFrontend`] - replays queued steps, for tests

// Re-export all types from interview-types
pub use interview_types::*;

mod coerce;

pub mod expression;
pub use expression::{EvalMode, Expression, ExpressionError, Literal, Operator, evaluate, evaluate_condition};

mod computed;
pub use computed::refresh_computed;

mod engine;
pub use engine::{EngineOptions, InterviewEngine, SubscriptionId};

mod validation;
pub use validation::{parse_numeric_input, validate_answer};

pub mod document;
pub use document::{template_data, template_data_now};

pub mod persist;
pub use persist::{FileStore, MemoryStore, PersistError, StateStore, restore_share_code, share_code};

mod frontend;
pub use frontend::{Frontend, RunError, Step, run_interview};

// Scripted frontend for testing interviews without user interaction
mod test_frontend;
pub use test_frontend::{ScriptError, ScriptedFrontend};
