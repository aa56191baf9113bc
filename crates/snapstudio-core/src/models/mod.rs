//! Data models for snapstudio

pub mod activity;
pub mod contact;
pub mod conversation;
pub mod plan;
pub mod workflow;

pub use activity::{Activity, ActivityKind, ActivityStatus};
pub use contact::Contact;
pub use conversation::{Channel, Conversation, Priority};
pub use plan::{
    CapabilityKey, Limit, LimitKey, PlanCapabilities, PlanDefinition, PlanLimits, PlanTier,
};
pub use workflow::{Workflow, WorkflowPerformance, WorkflowStatus};
