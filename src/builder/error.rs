//! Build errors for state machine construction.

use thiserror::Error;

/// A single problem found while validating a machine configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("no states declared. Call .states(..) before .build()")]
    NoStates,

    #[error("state '{state}' used in {used_in} was never declared")]
    UndeclaredState { state: String, used_in: &'static str },

    #[error("event '{event}' from state '{from}' registered twice ('{existing}' and '{rejected}')")]
    DuplicateTransition {
        from: String,
        event: String,
        existing: String,
        rejected: String,
    },
}

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every violation found, not just the first.
    #[error("invalid state machine configuration: {}", summarize(.violations))]
    InvalidConfiguration { violations: Vec<ConfigViolation> },
}

impl BuildError {
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::InvalidConfiguration { violations } => violations,
        }
    }
}

fn summarize(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
