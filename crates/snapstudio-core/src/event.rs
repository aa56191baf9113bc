//! Event bus for snapstudio using tokio::broadcast
//!
//! Publish-subscribe for store mutations. The web layer forwards these over
//! SSE so dashboard clients can refetch the affected collection.

use crate::models::PlanTier;
use tokio::sync::broadcast;

/// Events emitted by the data layer
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// A workflow row changed (executed, triggered, or edited)
    WorkflowUpdated(String),
    /// A new activity log entry was appended
    ActivityLogged(String),
    /// A conversation changed
    ConversationUpdated(String),
    /// A new contact was created
    ContactCreated(String),
    /// The session switched plans
    PlanChanged(PlanTier),
}

/// Event bus for broadcasting data events
///
/// Uses tokio::broadcast for multi-consumer support; each SSE client holds
/// its own receiver.
pub struct EventBus {
    sender: broadcast::Sender<DataEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (256 events)
    pub fn default_capacity() -> Self {
        Self::new(256)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: DataEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive events
    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.sender.subscribe()
    }

    /// Get current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
