//! # interview-dialoguer-wizard
//!
//! Dialoguer frontend for interview.
//!
//! Questions are presented one at a time in a classic CLI wizard style.
//! Typing `<` into a text prompt, or picking "← Back" from a list, returns to
//! the previous question; Ctrl+C stops the interview.
//!
//! ## Example
//!
//! ```rust,ignore
//! use interview::{Definition, InterviewEngine, run_interview};
//! use interview_dialoguer_wizard::DialoguerFrontend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let definition = Definition::from_path("voter_registration.yml")?;
//!     let mut engine = InterviewEngine::new(definition)?;
//!     let mut frontend = DialoguerFrontend::new();
//!     run_interview(&mut engine, &mut frontend)?;
//!     println!("{:?}", engine.answers());
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{BACK_INPUT, BACK_LABEL, DialoguerError, DialoguerFrontend};
