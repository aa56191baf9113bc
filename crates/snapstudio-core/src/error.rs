//! Error types for snapstudio-core

use crate::models::WorkflowStatus;
use thiserror::Error;

/// Core error type for snapstudio operations
///
/// The plan registry itself has no runtime error path: tiers and keys are
/// closed enums, so an unknown key cannot be expressed in code. `UnknownPlan`
/// only exists at the text boundary (CLI arguments, request bodies).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Workflow not found: {workflow_id}")]
    WorkflowNotFound { workflow_id: String },

    #[error("Workflow is not active: {workflow_id} (status: {status})")]
    WorkflowNotActive {
        workflow_id: String,
        status: WorkflowStatus,
    },

    #[error("Contact not found: {contact_id}")]
    ContactNotFound { contact_id: String },

    #[error("Unknown plan: {value} (expected one of: demo, agency, enterprise)")]
    UnknownPlan { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::WorkflowNotFound {
            workflow_id: "wf-1".into(),
        };
        assert_eq!(err.to_string(), "Workflow not found: wf-1");

        let err = CoreError::WorkflowNotActive {
            workflow_id: "wf-2".into(),
            status: WorkflowStatus::Paused,
        };
        assert!(err.to_string().contains("status: paused"));
    }
}
