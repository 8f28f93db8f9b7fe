// =============================================================================
// Horizon Decision Engine — Main Entry Point
// =============================================================================
//
// Serves the trading-decision checklist over a small authenticated REST API.
// The evaluation core is pure and synchronous; the server exists so the
// dashboard form can drive it.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod anchors;
mod api;
mod app_state;
mod checklist;
mod journal;
mod runtime_config;
mod session;
mod types;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::RuntimeConfig;

const CONFIG_PATH: &str = "runtime_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Horizon Decision Engine — Starting Up            ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = RuntimeConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Override journal location from env if available.
    if let Ok(path) = std::env::var("HORIZON_JOURNAL_PATH") {
        if !path.trim().is_empty() {
            config.journal_path = path.trim().into();
        }
    }

    info!(
        journal_path = %config.journal_path.display(),
        default_risk_r = config.default_risk_r,
        assets = anchors::asset_names().len(),
        "Engine configured"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    // ── 3. Start the API server ──────────────────────────────────────────
    let api_state = state.clone();
    let bind_addr =
        std::env::var("HORIZON_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());
    let bind_addr_clone = bind_addr.clone();

    tokio::spawn(async move {
        let app = api::rest::router(api_state);
        let listener = tokio::net::TcpListener::bind(&bind_addr_clone)
            .await
            .expect("Failed to bind API server");
        info!(addr = %bind_addr_clone, "API server listening");
        axum::serve(listener, app)
            .await
            .expect("API server failed");
    });

    info!("Engine running. Press Ctrl+C to stop.");

    // ── 4. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!("Shutdown signal received — stopping gracefully");

    if let Err(e) = state.runtime_config.read().save(CONFIG_PATH) {
        error!(error = %e, "Failed to save runtime config on shutdown");
    }

    info!("Horizon Decision Engine shut down complete.");
    Ok(())
}
