//! snapstudio-core - Core library for snapstudio
//!
//! Provides CRM models, the plan registry and entitlement evaluator,
//! subscription state, the in-memory data store, and workflow operations.

pub mod entitlements;
pub mod error;
pub mod event;
pub mod models;
pub mod seed;
pub mod store;
pub mod subscription;
pub mod workflows;

pub use entitlements::{Entitlements, LimitAlert, LimitStatus, PlanRegistry};
pub use error::CoreError;
pub use event::{DataEvent, EventBus};
pub use store::{DataStore, UsageCounts};
pub use subscription::Subscription;
pub use workflows::{
    execute_workflow, trigger_workflows, ExecutionReceipt, TriggerMetadata, TriggerReceipt,
};
