//! snapstudio-web - JSON API server for snapstudio
//!
//! Serves the dashboard API over Axum: workflow execute/trigger operations,
//! collection reads, plan and subscription queries, and an SSE stream of
//! store events.

pub mod api;
pub mod router;
pub mod sse;

pub use router::create_router;

use anyhow::Result;
use snapstudio_core::DataStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server
pub async fn run(store: Arc<DataStore>, port: u16) -> Result<()> {
    let router = create_router(store);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    info!("API server listening on http://{}", addr);
    println!("API server listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
