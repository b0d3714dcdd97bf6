//! charhook-server - character webhook and notification service
//!
//! Startup order:
//! 1. Parse CLI, resolve and load the config file
//! 2. Initialize tracing
//! 3. Build state and router, serve until Ctrl+C / SIGTERM
//! 4. Drain background jobs before exiting

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use charhook_common::config::{resolve_config_path, ServiceConfig};
use charhook_server::tasks::DrainOutcome;
use charhook_server::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for charhook-server
#[derive(Parser, Debug)]
#[command(name = "charhook-server")]
#[command(about = "Character webhook and notification service")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides the config file)
    #[arg(long, env = "CHARHOOK_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "CHARHOOK_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let mut config =
        ServiceConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting charhook-server v{}",
        env!("CARGO_PKG_VERSION")
    );
    match &config_path {
        Some(path) if !path.exists() => {
            warn!("Config file {} not found, using defaults", path.display())
        }
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    info!("Event log: {}", config.event_log.display());
    info!("Notification log: {}", config.notification_log.display());
    if config.badge.enabled {
        info!(
            "Badge lookups: {}/notifier (timeout {} ms)",
            config.badge_base_url(),
            config.badge.timeout_ms
        );
    } else {
        info!("Badge lookups disabled");
    }

    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let tasks = state.tasks.clone();
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("charhook-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Draining {} background job(s)", tasks.pending());
    match tasks
        .drain(Duration::from_secs(config.drain_timeout_secs))
        .await
    {
        DrainOutcome::Drained => info!("All background jobs finished"),
        DrainOutcome::Abandoned(count) => {
            warn!("Drain timeout expired, {} background job(s) abandoned", count)
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
