//! snapstudio - Scale Snap Studio backend

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snapstudio_core::DataStore;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "snapstudio",
    version,
    about = "Scale Snap Studio backend - agency CRM dashboard API and plan tooling",
    long_about = "Backend for the Scale Snap Studio agency dashboard.\n\
                  \n\
                  Serves the dashboard JSON API (contacts, conversations, workflows,\n\
                  activity feed, plans, subscription) and provides plan-entitlement\n\
                  tooling from the command line.\n\
                  \n\
                  Examples:\n\
                    snapstudio                                   # Run API server (default)\n\
                    snapstudio serve --port 4000                 # Custom port\n\
                    snapstudio serve --empty                     # Start without demo data\n\
                    snapstudio plans                             # Print the plan table\n\
                    snapstudio plans --json                      # Plan registry as JSON\n\
                    snapstudio check --plan demo --limit max-contacts --current 99\n\
                    snapstudio check --plan agency --capability white-label\n\
                    snapstudio check --plan agency --requires enterprise\n\
                  \n\
                  Environment Variables:\n\
                    SNAPSTUDIO_PORT                              # Override API server port"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Run the API server (default)
    Serve {
        /// Port for the API server
        #[arg(long, env = "SNAPSTUDIO_PORT", default_value = "4000")]
        port: u16,

        /// Start with an empty store instead of the demo dataset
        #[arg(long)]
        empty: bool,
    },
    /// Print the plan registry
    Plans {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate an entitlement for a plan and exit non-zero when denied
    Check {
        /// Plan to evaluate (demo, agency, enterprise)
        #[arg(long)]
        plan: String,

        /// Capability to check (e.g. advanced-analytics, white-label)
        #[arg(long, conflicts_with_all = ["limit", "requires"])]
        capability: Option<String>,

        /// Limit to check (e.g. max-contacts, max-workflows)
        #[arg(long, requires = "current", conflicts_with = "requires")]
        limit: Option<String>,

        /// Current usage count for --limit
        #[arg(long)]
        current: Option<u64>,

        /// Minimum tier to check access against
        #[arg(long)]
        requires: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Bare `snapstudio` serves, honoring the same env override as `serve`
    let default_port = std::env::var("SNAPSTUDIO_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(4000);

    match cli.mode.unwrap_or(Mode::Serve {
        port: default_port,
        empty: false,
    }) {
        Mode::Serve { port, empty } => run_serve(port, empty).await,
        Mode::Plans { json } => cli::run_plans(json),
        Mode::Check {
            plan,
            capability,
            limit,
            current,
            requires,
        } => cli::run_check(&plan, capability.as_deref(), limit.as_deref(), current, requires.as_deref()),
    }
}

async fn run_serve(port: u16, empty: bool) -> Result<()> {
    let store = if empty {
        Arc::new(DataStore::new())
    } else {
        Arc::new(DataStore::with_demo_data())
    };

    snapstudio_web::run(store, port).await
}
