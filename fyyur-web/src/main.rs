//! Fyyur booking service (fyyur-web) - Main entry point
//!
//! Serves the venue, artist and show pages over HTTP backed by a local
//! SQLite database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fyyur_common::config::{self, CliOverrides, ServiceConfig, TomlConfig};
use fyyur_common::db;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fyyur_web::{build_router, AppState};

/// Command-line arguments for fyyur-web
///
/// Environment variables (`FYYUR_HOST`, `FYYUR_PORT`, `FYYUR_DATABASE`,
/// `FYYUR_CONFIG`) are consulted when an argument is omitted.
#[derive(Parser, Debug)]
#[command(name = "fyyur-web")]
#[command(about = "Venue, artist and show booking service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = config::resolve_config_path(args.config.as_deref());
    let toml_config = TomlConfig::load_or_default(config_path.as_deref());

    let cli = CliOverrides {
        host: args.host,
        port: args.port,
        database: args.database,
    };
    let service_config =
        ServiceConfig::resolve(cli, &toml_config).context("Failed to resolve configuration")?;

    // RUST_LOG wins over the configured level
    let level = &service_config.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("fyyur_web={level},fyyur_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Fyyur v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) if path.exists() => info!("Config file: {}", path.display()),
        _ => info!("No config file found, using defaults"),
    }
    info!("Database: {}", service_config.database_path.display());

    let pool = db::init_database(&service_config.database_path)
        .await
        .with_context(|| {
            format!(
                "Failed to open database at {}",
                service_config.database_path.display()
            )
        })?;
    info!("Database ready");

    let app = build_router(AppState::new(pool.clone()));

    let addr = service_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
