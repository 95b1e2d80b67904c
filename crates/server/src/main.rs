//! QualifyAI server binary

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qualify_config::load_settings;
use qualify_server::{create_router, init_metrics, AppState};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,qualify_server=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Config file: --config <path> or QUALIFY_CONFIG, both optional
    let config_path = config_path_from_args().or_else(|| std::env::var("QUALIFY_CONFIG").ok());
    let settings = load_settings(config_path.as_deref())?;

    init_metrics();

    let state = AppState::from_settings(settings.clone())
        .map_err(|e| anyhow::anyhow!("failed to assemble application state: {e}"))?;

    tokio::spawn(state.sessions.clone().run_sweeper(SWEEP_INTERVAL));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, model = %settings.llm.model, "qualification server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn config_path_from_args() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            return args.next();
        }
    }
    None
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
