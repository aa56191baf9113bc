//! Data store with DashMap + parking_lot::RwLock
//!
//! In-memory stand-in for the hosted database. DashMap gives per-entry
//! locking on the keyed collections; the activity log is append-mostly and
//! lives behind a single RwLock. Every mutation publishes a [`DataEvent`].

use crate::entitlements::{Entitlements, PlanRegistry};
use crate::error::CoreError;
use crate::event::{DataEvent, EventBus};
use crate::models::{Activity, Contact, Conversation, PlanTier, Workflow};
use crate::subscription::Subscription;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Usage counts the entitlement evaluator is fed
///
/// The evaluator never counts anything itself; these are the caller-supplied
/// numbers behind every limit indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounts {
    pub contacts: u64,
    pub conversations: u64,
    pub workflows: u64,
    pub campaigns: u64,
}

/// Central data store for snapstudio
///
/// Thread-safe access to all dashboard data plus the session subscription.
pub struct DataStore {
    contacts: DashMap<String, Contact>,

    conversations: DashMap<String, Conversation>,

    workflows: DashMap<String, Workflow>,

    /// Append-mostly feed, newest entries pushed to the back
    activity_log: RwLock<Vec<Activity>>,

    /// Session plan state; read by every entitlement query
    subscription: Subscription,

    /// Event bus for notifying subscribers
    event_bus: EventBus,
}

impl DataStore {
    /// Create an empty store on the lowest tier
    pub fn new() -> Self {
        Self {
            contacts: DashMap::new(),
            conversations: DashMap::new(),
            workflows: DashMap::new(),
            activity_log: RwLock::new(Vec::new()),
            subscription: Subscription::new(),
            event_bus: EventBus::default_capacity(),
        }
    }

    /// Create a store pre-populated with the demo dataset
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        crate::seed::populate_demo_data(&store);
        store
    }

    // ===================
    // Contacts
    // ===================

    pub fn insert_contact(&self, contact: Contact) {
        let id = contact.id.clone();
        self.contacts.insert(id.clone(), contact);
        self.event_bus.publish(DataEvent::ContactCreated(id));
    }

    pub fn get_contact(&self, id: &str) -> Option<Contact> {
        self.contacts.get(id).map(|entry| entry.value().clone())
    }

    /// All contacts, newest first
    pub fn contacts(&self) -> Vec<Contact> {
        let mut all: Vec<Contact> = self.contacts.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    // ===================
    // Conversations
    // ===================

    pub fn insert_conversation(&self, conversation: Conversation) {
        let id = conversation.id.clone();
        self.conversations.insert(id.clone(), conversation);
        self.event_bus.publish(DataEvent::ConversationUpdated(id));
    }

    /// Most recent conversations by last message time
    pub fn conversations_recent(&self, limit: usize) -> Vec<Conversation> {
        let mut all: Vec<Conversation> = self
            .conversations
            .iter()
            .map(|e| e.value().clone())
            .collect();
        all.sort_by(|a, b| b.last_message_timestamp.cmp(&a.last_message_timestamp));
        all.truncate(limit);
        all
    }

    // ===================
    // Workflows
    // ===================

    pub fn insert_workflow(&self, workflow: Workflow) {
        let id = workflow.id.clone();
        self.workflows.insert(id.clone(), workflow);
        self.event_bus.publish(DataEvent::WorkflowUpdated(id));
    }

    pub fn get_workflow(&self, id: &str) -> Option<Workflow> {
        self.workflows.get(id).map(|entry| entry.value().clone())
    }

    /// All workflows, most recently run first, never-run last
    pub fn workflows_by_last_run(&self) -> Vec<Workflow> {
        let mut all: Vec<Workflow> = self.workflows.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| match (&b.last_run, &a.last_run) {
            (Some(b_run), Some(a_run)) => b_run.cmp(a_run),
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (None, None) => b.created_at.cmp(&a.created_at),
        });
        all
    }

    /// Active workflows registered for a trigger
    pub fn workflows_for_trigger(&self, trigger: &str) -> Vec<Workflow> {
        self.workflows
            .iter()
            .filter(|entry| entry.is_active() && entry.trigger == trigger)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Apply a mutation to one workflow row and publish the update
    pub fn update_workflow<F>(&self, id: &str, mutate: F) -> Result<Workflow, CoreError>
    where
        F: FnOnce(&mut Workflow),
    {
        let updated = {
            let mut entry = self
                .workflows
                .get_mut(id)
                .ok_or_else(|| CoreError::WorkflowNotFound {
                    workflow_id: id.to_string(),
                })?;
            mutate(&mut entry);
            entry.value().clone()
        };
        self.event_bus
            .publish(DataEvent::WorkflowUpdated(id.to_string()));
        Ok(updated)
    }

    // ===================
    // Activity log
    // ===================

    /// Append an entry and notify subscribers
    pub fn record_activity(&self, activity: Activity) -> String {
        let id = activity.id.clone();
        debug!(activity_id = %id, kind = ?activity.kind, "activity recorded");
        self.activity_log.write().push(activity);
        self.event_bus.publish(DataEvent::ActivityLogged(id.clone()));
        id
    }

    /// Most recent activity entries, newest first
    pub fn recent_activity(&self, limit: usize) -> Vec<Activity> {
        let log = self.activity_log.read();
        let mut all: Vec<Activity> = log.clone();
        drop(log);
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        all.truncate(limit);
        all
    }

    pub fn activity_count(&self) -> usize {
        self.activity_log.read().len()
    }

    // ===================
    // Subscription & entitlements
    // ===================

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// Switch the session plan and notify subscribers
    pub fn set_plan(&self, tier: PlanTier) -> PlanTier {
        let previous = self.subscription.set_plan(tier);
        if previous != tier {
            self.event_bus.publish(DataEvent::PlanChanged(tier));
        }
        previous
    }

    /// Evaluation context for the session's current tier
    pub fn entitlements<'a>(&self, registry: &'a PlanRegistry) -> Entitlements<'a> {
        self.subscription.entitlements(registry)
    }

    /// Current usage counts, as fed to limit indicators
    ///
    /// There is no campaign collection; the plan ceiling exists but nothing
    /// counts against it yet.
    pub fn usage(&self) -> UsageCounts {
        UsageCounts {
            contacts: self.contacts.len() as u64,
            conversations: self.conversations.len() as u64,
            workflows: self.workflows.len() as u64,
            campaigns: 0,
        }
    }

    // ===================
    // Events
    // ===================

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityKind, WorkflowStatus};
    use chrono::{Duration, Utc};

    #[test]
    fn test_workflow_ordering_never_run_last() {
        let store = DataStore::new();

        let mut ran_earlier = Workflow::new("Earlier", WorkflowStatus::Active, "t");
        ran_earlier.last_run = Some(Utc::now() - Duration::hours(2));
        let mut ran_recently = Workflow::new("Recent", WorkflowStatus::Active, "t");
        ran_recently.last_run = Some(Utc::now());
        let never_ran = Workflow::new("Never", WorkflowStatus::Draft, "t");

        store.insert_workflow(never_ran);
        store.insert_workflow(ran_earlier);
        store.insert_workflow(ran_recently);

        let ordered = store.workflows_by_last_run();
        let names: Vec<&str> = ordered.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Recent", "Earlier", "Never"]);
    }

    #[test]
    fn test_workflows_for_trigger_filters_status_and_name() {
        let store = DataStore::new();
        store.insert_workflow(Workflow::new("A", WorkflowStatus::Active, "Form Submission"));
        store.insert_workflow(Workflow::new("B", WorkflowStatus::Paused, "Form Submission"));
        store.insert_workflow(Workflow::new("C", WorkflowStatus::Active, "Booking Confirmed"));

        let matches = store.workflows_for_trigger("Form Submission");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "A");
    }

    #[test]
    fn test_update_workflow_unknown_id() {
        let store = DataStore::new();
        let result = store.update_workflow("missing", |wf| wf.contacts += 1);
        assert!(matches!(
            result,
            Err(CoreError::WorkflowNotFound { workflow_id }) if workflow_id == "missing"
        ));
    }

    #[test]
    fn test_recent_activity_newest_first_and_limited() {
        let store = DataStore::new();
        for i in 0..5 {
            let mut entry = Activity::now(ActivityKind::Message, format!("entry {}", i), "d");
            entry.timestamp = Utc::now() - Duration::minutes(5 - i);
            store.record_activity(entry);
        }

        let recent = store.recent_activity(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].title, "entry 4");
        assert!(recent[0].timestamp >= recent[1].timestamp);
        assert_eq!(store.activity_count(), 5);
    }

    #[test]
    fn test_usage_counts_track_collections() {
        let store = DataStore::new();
        assert_eq!(store.usage(), UsageCounts::default());

        store.insert_contact(Contact::new("Sarah Johnson"));
        store.insert_workflow(Workflow::new("W", WorkflowStatus::Active, "t"));

        let usage = store.usage();
        assert_eq!(usage.contacts, 1);
        assert_eq!(usage.workflows, 1);
        assert_eq!(usage.campaigns, 0);
    }

    #[tokio::test]
    async fn test_set_plan_publishes_once() {
        let store = DataStore::new();
        let mut rx = store.event_bus().subscribe();

        assert_eq!(store.set_plan(PlanTier::Agency), PlanTier::Demo);
        // Same tier again: no event
        assert_eq!(store.set_plan(PlanTier::Agency), PlanTier::Agency);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, DataEvent::PlanChanged(PlanTier::Agency)));
        assert!(rx.try_recv().is_err());
    }
}
