//! Workflow execute and trigger operations
//!
//! Execution does no automation: it validates the row is active, stamps
//! `last_run`, and appends an activity entry. Triggering fans the same
//! stamp-and-log out over every active workflow registered for the trigger,
//! bumping each one's enrolled-contact count.

use crate::error::CoreError;
use crate::models::{Activity, ActivityKind, ActivityStatus};
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Contact details attached to trigger-fired activity entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMetadata {
    pub contact_name: Option<String>,
    pub contact_initials: Option<String>,
}

/// Result of a successful manual execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReceipt {
    /// Name of the executed workflow
    pub workflow: String,
    pub executed_at: DateTime<Utc>,
}

/// Result of a trigger fan-out
///
/// Zero matches is still a success; the caller learns nothing fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerReceipt {
    pub triggered: usize,
    /// Names of the workflows that fired
    pub workflows: Vec<String>,
}

/// Manually execute one workflow
///
/// Fails if the row is missing or not active. On success the row's
/// `last_run`/`updated_at` are stamped and a success entry lands in the
/// activity log.
pub fn execute_workflow(store: &DataStore, workflow_id: &str) -> Result<ExecutionReceipt, CoreError> {
    let workflow = store
        .get_workflow(workflow_id)
        .ok_or_else(|| CoreError::WorkflowNotFound {
            workflow_id: workflow_id.to_string(),
        })?;

    if !workflow.is_active() {
        return Err(CoreError::WorkflowNotActive {
            workflow_id: workflow_id.to_string(),
            status: workflow.status,
        });
    }

    info!(workflow = %workflow.name, "executing workflow");

    let now = Utc::now();
    store.update_workflow(workflow_id, |row| {
        row.last_run = Some(now);
        row.updated_at = now;
    })?;

    store.record_activity(
        Activity::now(
            ActivityKind::Workflow,
            "Workflow executed",
            format!("{} completed successfully", workflow.name),
        )
        .with_status(ActivityStatus::Success),
    );

    Ok(ExecutionReceipt {
        workflow: workflow.name,
        executed_at: now,
    })
}

/// Fire every active workflow registered for a trigger
///
/// Each match gets one more enrolled contact, a fresh `last_run`, and an
/// activity entry carrying the optional contact metadata.
pub fn trigger_workflows(
    store: &DataStore,
    trigger: &str,
    metadata: Option<TriggerMetadata>,
) -> TriggerReceipt {
    let matches = store.workflows_for_trigger(trigger);
    if matches.is_empty() {
        info!(trigger, "no active workflows for trigger");
        return TriggerReceipt {
            triggered: 0,
            workflows: Vec::new(),
        };
    }

    let metadata = metadata.unwrap_or_default();
    let now = Utc::now();
    let mut fired = Vec::with_capacity(matches.len());

    for workflow in matches {
        info!(workflow = %workflow.name, trigger, "triggering workflow");

        // The row can only vanish if deleted mid-iteration; skip it then.
        if store
            .update_workflow(&workflow.id, |row| {
                row.contacts += 1;
                row.last_run = Some(now);
                row.updated_at = now;
            })
            .is_err()
        {
            continue;
        }

        store.record_activity(
            Activity::now(
                ActivityKind::Workflow,
                "Automation triggered",
                format!("{} started for {}", workflow.name, trigger),
            )
            .with_status(ActivityStatus::Success)
            .with_contact(
                metadata.contact_name.clone(),
                metadata.contact_initials.clone(),
            ),
        );

        fired.push(workflow.name);
    }

    TriggerReceipt {
        triggered: fired.len(),
        workflows: fired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Workflow, WorkflowStatus};

    fn store_with(workflows: Vec<Workflow>) -> DataStore {
        let store = DataStore::new();
        for wf in workflows {
            store.insert_workflow(wf);
        }
        store
    }

    #[test]
    fn test_execute_stamps_last_run_and_logs() {
        let wf = Workflow::new("Lead Nurture Sequence", WorkflowStatus::Active, "Form Submission");
        let id = wf.id.clone();
        let store = store_with(vec![wf]);

        let receipt = execute_workflow(&store, &id).unwrap();
        assert_eq!(receipt.workflow, "Lead Nurture Sequence");

        let row = store.get_workflow(&id).unwrap();
        assert_eq!(row.last_run, Some(receipt.executed_at));
        assert_eq!(row.updated_at, receipt.executed_at);

        let activity = store.recent_activity(1);
        assert_eq!(activity[0].title, "Workflow executed");
        assert_eq!(
            activity[0].description,
            "Lead Nurture Sequence completed successfully"
        );
        assert_eq!(activity[0].status, Some(ActivityStatus::Success));
    }

    #[test]
    fn test_execute_unknown_workflow() {
        let store = DataStore::new();
        let err = execute_workflow(&store, "missing").unwrap_err();
        assert!(matches!(err, CoreError::WorkflowNotFound { .. }));
        assert_eq!(store.activity_count(), 0);
    }

    #[test]
    fn test_execute_rejects_inactive() {
        for status in [WorkflowStatus::Paused, WorkflowStatus::Draft] {
            let wf = Workflow::new("Re-engagement Campaign", status, "30 Days Inactive");
            let id = wf.id.clone();
            let store = store_with(vec![wf]);

            let err = execute_workflow(&store, &id).unwrap_err();
            assert!(matches!(err, CoreError::WorkflowNotActive { .. }));

            // Nothing stamped, nothing logged
            assert!(store.get_workflow(&id).unwrap().last_run.is_none());
            assert_eq!(store.activity_count(), 0);
        }
    }

    #[test]
    fn test_trigger_fans_out_over_matches() {
        let a = Workflow::new("Lead Nurture Sequence", WorkflowStatus::Active, "Form Submission");
        let b = Workflow::new("Welcome Email", WorkflowStatus::Active, "Form Submission");
        let paused = Workflow::new("Old Sequence", WorkflowStatus::Paused, "Form Submission");
        let other = Workflow::new("Appointment Reminder", WorkflowStatus::Active, "Booking Confirmed");
        let a_id = a.id.clone();
        let store = store_with(vec![a, b, paused, other]);

        let receipt = trigger_workflows(
            &store,
            "Form Submission",
            Some(TriggerMetadata {
                contact_name: Some("Sarah Johnson".into()),
                contact_initials: Some("SJ".into()),
            }),
        );

        assert_eq!(receipt.triggered, 2);
        assert!(receipt.workflows.contains(&"Lead Nurture Sequence".to_string()));
        assert!(receipt.workflows.contains(&"Welcome Email".to_string()));

        let row = store.get_workflow(&a_id).unwrap();
        assert_eq!(row.contacts, 1);
        assert!(row.last_run.is_some());

        let activity = store.recent_activity(10);
        assert_eq!(activity.len(), 2);
        assert!(activity.iter().all(|a| a.title == "Automation triggered"));
        assert!(activity
            .iter()
            .all(|a| a.contact_initials.as_deref() == Some("SJ")));
        assert!(activity
            .iter()
            .any(|a| a.description == "Lead Nurture Sequence started for Form Submission"));
    }

    #[test]
    fn test_trigger_no_matches_is_success() {
        let store = DataStore::new();
        let receipt = trigger_workflows(&store, "Unknown Trigger", None);
        assert_eq!(receipt.triggered, 0);
        assert!(receipt.workflows.is_empty());
        assert_eq!(store.activity_count(), 0);
    }

    #[test]
    fn test_trigger_without_metadata_logs_no_contact() {
        let wf = Workflow::new("Lead Nurture Sequence", WorkflowStatus::Active, "Form Submission");
        let store = store_with(vec![wf]);

        trigger_workflows(&store, "Form Submission", None);

        let activity = store.recent_activity(1);
        assert!(activity[0].contact_name.is_none());
        assert!(activity[0].contact_initials.is_none());
    }
}
