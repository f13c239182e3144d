//! Sample interview definitions used by demos and tests.
//!
//! Every definition is bundled into the binary, so loading cannot fail on
//! I/O; parse errors still surface as [`DefinitionError`].

use interview::{Definition, DefinitionError};

/// Age question followed by a conditional registration question.
pub const VOTER_REGISTRATION: &str = include_str!("../definitions/voter_registration.yml");

/// Choice questions of every kind plus computed prices.
pub const SANDWICH: &str = include_str!("../definitions/sandwich.yml");

/// A longer application with several conditional follow-ups.
pub const JOB_APPLICATION: &str = include_str!("../definitions/job_application.yml");

/// A small profile in JSON form, with a legacy question-level computed field.
pub const USER_PROFILE: &str = include_str!("../definitions/user_profile.json");

pub fn voter_registration() -> Result<Definition, DefinitionError> {
    Definition::from_yaml_str(VOTER_REGISTRATION)
}

pub fn sandwich() -> Result<Definition, DefinitionError> {
    Definition::from_yaml_str(SANDWICH)
}

pub fn job_application() -> Result<Definition, DefinitionError> {
    Definition::from_yaml_str(JOB_APPLICATION)
}

pub fn user_profile() -> Result<Definition, DefinitionError> {
    Definition::from_json_str(USER_PROFILE)
}

/// Look up a bundled definition by name (`voter_registration`, `sandwich`,
/// `job_application`, `user_profile`).
pub fn by_name(name: &str) -> Option<Result<Definition, DefinitionError>> {
    match name {
        "voter_registration" => Some(voter_registration()),
        "sandwich" => Some(sandwich()),
        "job_application" => Some(job_application()),
        "user_profile" => Some(user_profile()),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 4] = ["voter_registration", "sandwich", "job_application", "user_profile"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_definitions_load() {
        for name in NAMES {
            let definition = by_name(name).unwrap().unwrap();
            assert!(!definition.is_empty(), "{name} has no questions");
        }
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn choice_questions_have_options() {
        for name in NAMES {
            let definition = by_name(name).unwrap().unwrap();
            for question in definition.questions() {
                if question.kind.has_options() {
                    assert!(!question.options.is_empty(), "{name}/{} has no options", question.id);
                }
            }
        }
    }
}
