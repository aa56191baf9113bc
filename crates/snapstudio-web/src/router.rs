//! Web router using Axum

use axum::routing::{get, post};
use axum::Router;
use snapstudio_core::DataStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{api, sse};

/// Create the web router
pub fn create_router(store: Arc<DataStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/workflows/execute", post(api::execute_workflow_handler))
        .route("/api/workflows/trigger", post(api::trigger_workflow_handler))
        .route("/api/workflows", get(api::workflows_handler))
        .route("/api/contacts", get(api::contacts_handler))
        .route("/api/conversations", get(api::conversations_handler))
        .route("/api/activity", get(api::activity_handler))
        .route("/api/plans", get(api::plans_handler))
        .route(
            "/api/subscription",
            get(api::subscription_handler).put(api::set_plan_handler),
        )
        .route("/api/health", get(api::health_handler))
        .route("/api/events", get(sse_handler))
        .layer(cors)
        .with_state(store)
}

/// SSE endpoint for live updates
async fn sse_handler(
    axum::extract::State(store): axum::extract::State<Arc<DataStore>>,
) -> axum::response::Sse<
    impl futures::stream::Stream<Item = Result<axum::response::sse::Event, std::convert::Infallible>>,
> {
    // Clone EventBus to avoid lifetime issues (it's cheap - Arc internally)
    let event_bus = store.event_bus().clone();
    sse::create_sse_stream(event_bus)
}
