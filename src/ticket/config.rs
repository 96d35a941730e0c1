//! Workflow configuration.

use super::model::TicketEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse workflow configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("final approver must not be empty")]
    MissingApprover,
}

/// Knobs for the ticket workflow.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use hookflow::ticket::WorkflowConfig;
///
/// let config = WorkflowConfig::from_json(r#"{ "final_approver": "lead" }"#).unwrap();
/// assert_eq!(config.final_approver, "lead");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// The only actor allowed to fire `ApproveFinal`.
    pub final_approver: String,

    /// Events after which `InProgress` recomputes the ticket priority.
    pub priority_events: Vec<TicketEvent>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            final_approver: "admin".to_string(),
            priority_events: vec![TicketEvent::Reassign, TicketEvent::Resume],
        }
    }
}

impl WorkflowConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.final_approver.trim().is_empty() {
            return Err(ConfigError::MissingApprover);
        }
        Ok(())
    }
}
