//! API handlers and wire types
//!
//! Bodies are camelCase to match the dashboard client. Operation failures
//! keep the historical function contract: HTTP 400 with
//! `{"success": false, "error": "..."}`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use snapstudio_core::entitlements::{LimitStatus, PlanRegistry};
use snapstudio_core::models::{
    Activity, Contact, Conversation, LimitKey, PlanCapabilities, PlanDefinition, PlanTier, Workflow,
};
use snapstudio_core::store::UsageCounts;
use snapstudio_core::{execute_workflow, trigger_workflows, DataStore, TriggerMetadata};
use std::sync::Arc;
use tracing::debug;

/// Error body for failed operations
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

fn bad_request(error: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            success: false,
            error: error.to_string(),
        }),
    )
}

// ===================
// Workflow operations
// ===================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteWorkflowRequest {
    pub workflow_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteWorkflowResponse {
    pub success: bool,
    pub message: String,
    /// Name of the executed workflow
    pub workflow: String,
}

pub async fn execute_workflow_handler(
    State(store): State<Arc<DataStore>>,
    Json(req): Json<ExecuteWorkflowRequest>,
) -> Result<Json<ExecuteWorkflowResponse>, (StatusCode, Json<ApiError>)> {
    let receipt = execute_workflow(&store, &req.workflow_id).map_err(bad_request)?;
    Ok(Json(ExecuteWorkflowResponse {
        success: true,
        message: "Workflow executed successfully".to_string(),
        workflow: receipt.workflow,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerWorkflowRequest {
    pub trigger: String,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<TriggerMetadata>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerWorkflowResponse {
    pub success: bool,
    pub message: String,
    pub triggered: usize,
    pub workflows: Vec<String>,
}

pub async fn trigger_workflow_handler(
    State(store): State<Arc<DataStore>>,
    Json(req): Json<TriggerWorkflowRequest>,
) -> Json<TriggerWorkflowResponse> {
    if let Some(contact_id) = &req.contact_id {
        debug!(contact_id, trigger = %req.trigger, "trigger requested for contact");
    }

    let receipt = trigger_workflows(&store, &req.trigger, req.metadata);
    let message = if receipt.triggered == 0 {
        "No active workflows found for this trigger".to_string()
    } else {
        "Workflows triggered successfully".to_string()
    };

    Json(TriggerWorkflowResponse {
        success: true,
        message,
        triggered: receipt.triggered,
        workflows: receipt.workflows,
    })
}

// ===================
// Collections
// ===================

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Max entries to return
    pub limit: Option<usize>,
}

pub async fn workflows_handler(State(store): State<Arc<DataStore>>) -> Json<Vec<Workflow>> {
    Json(store.workflows_by_last_run())
}

pub async fn contacts_handler(State(store): State<Arc<DataStore>>) -> Json<Vec<Contact>> {
    Json(store.contacts())
}

pub async fn conversations_handler(
    State(store): State<Arc<DataStore>>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<Conversation>> {
    Json(store.conversations_recent(query.limit.unwrap_or(10)))
}

pub async fn activity_handler(
    State(store): State<Arc<DataStore>>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<Activity>> {
    Json(store.recent_activity(query.limit.unwrap_or(10)))
}

// ===================
// Plans & subscription
// ===================

pub async fn plans_handler() -> Json<Vec<PlanDefinition>> {
    Json(PlanRegistry::builtin().definitions().to_vec())
}

/// Everything the dashboard needs to render gates and indicators
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub plan: PlanTier,
    pub plan_name: String,
    pub is_demo: bool,
    /// Tier the upgrade flow should offer; null on the top tier
    pub upgrade_target: Option<PlanTier>,
    pub usage: UsageCounts,
    /// One entry per bounded limit; unlimited limits are omitted
    pub limits: Vec<LimitStatus>,
    pub capabilities: PlanCapabilities,
}

fn subscription_response(store: &DataStore) -> SubscriptionResponse {
    let registry = PlanRegistry::builtin();
    let entitlements = store.entitlements(registry);
    let usage = store.usage();

    let limits = LimitKey::ALL
        .iter()
        .filter_map(|&key| entitlements.limit_status(key, usage_for(key, usage)))
        .collect();

    let plan = entitlements.plan();
    SubscriptionResponse {
        plan: plan.tier,
        plan_name: plan.name.clone(),
        is_demo: store.subscription().is_demo(),
        upgrade_target: store.subscription().upgrade_target(),
        usage,
        limits,
        capabilities: plan.capabilities,
    }
}

fn usage_for(key: LimitKey, usage: UsageCounts) -> u64 {
    match key {
        LimitKey::MaxContacts => usage.contacts,
        LimitKey::MaxConversations => usage.conversations,
        LimitKey::MaxWorkflows => usage.workflows,
        LimitKey::MaxCampaigns => usage.campaigns,
    }
}

pub async fn subscription_handler(State(store): State<Arc<DataStore>>) -> Json<SubscriptionResponse> {
    Json(subscription_response(&store))
}

#[derive(Debug, Deserialize)]
pub struct SetPlanRequest {
    pub plan: PlanTier,
}

pub async fn set_plan_handler(
    State(store): State<Arc<DataStore>>,
    Json(req): Json<SetPlanRequest>,
) -> Json<SubscriptionResponse> {
    store.set_plan(req.plan);
    Json(subscription_response(&store))
}

// ===================
// Health
// ===================

pub async fn health_handler(State(store): State<Arc<DataStore>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "plan": store.subscription().current_plan(),
        "workflows": store.usage().workflows,
        "activities": store.activity_count(),
    }))
}
