//! Workflow automation records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a workflow
///
/// Only `Active` workflows may be executed or triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Active,
    Paused,
    Draft,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStatus::Active => "active",
            WorkflowStatus::Paused => "paused",
            WorkflowStatus::Draft => "draft",
        };
        f.write_str(s)
    }
}

/// Aggregate engagement metrics for a workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPerformance {
    pub opens: u32,
    pub clicks: u32,
    pub conversions: u32,
}

/// An automation workflow row
///
/// Execution only stamps `last_run` and appends an activity entry; there is
/// no step engine behind `actions`, it is a display count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub status: WorkflowStatus,
    /// Event name that starts this workflow (e.g. "Form Submission")
    pub trigger: String,
    /// Number of configured steps
    pub actions: u32,
    /// Number of contacts currently enrolled
    pub contacts: u32,
    pub last_run: Option<DateTime<Utc>>,
    pub performance: WorkflowPerformance,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// New draft-free workflow with zeroed metrics
    pub fn new(name: impl Into<String>, status: WorkflowStatus, trigger: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            status,
            trigger: trigger.into(),
            actions: 0,
            contacts: 0,
            last_run: None,
            performance: WorkflowPerformance::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == WorkflowStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&WorkflowStatus::Paused).unwrap(),
            "\"paused\""
        );
        let status: WorkflowStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, WorkflowStatus::Active);
    }

    #[test]
    fn test_new_workflow_has_no_runs() {
        let wf = Workflow::new("Lead Nurture Sequence", WorkflowStatus::Active, "Form Submission");
        assert!(wf.last_run.is_none());
        assert!(wf.is_active());
        assert_eq!(wf.contacts, 0);
    }
}
