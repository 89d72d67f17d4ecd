//! Reelay server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use reelay_core::config::AppConfig;
use reelay_server::{AppState, create_router};
use reelay_upstream::UpstreamClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reelay - a caching proxy for a third-party video-listing API
#[derive(Parser, Debug)]
#[command(name = "reelayd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "REELAY_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Reelay v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration. The file is optional; REELAY_ environment
    // variables can provide or override everything, including the
    // upstream credential cookie.
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("REELAY_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // A missing credential is a reported condition, not a startup failure:
    // the diagnostic endpoint stays reachable and listing requests return
    // failure envelopes until the cookie is configured.
    match &config.upstream.cookie {
        Some(cookie) => {
            tracing::info!(cookie_length = cookie.len(), "Upstream credential configured")
        }
        None => tracing::warn!(
            "No upstream credential configured (set REELAY_UPSTREAM__COOKIE); \
             listing requests will fail until one is provided"
        ),
    }

    // Register Prometheus metrics
    if config.server.metrics_enabled {
        reelay_server::metrics::register_metrics();
        tracing::info!("Prometheus metrics registered");
    }

    // Initialize the upstream client
    let client =
        UpstreamClient::new(&config.upstream).context("failed to initialize upstream client")?;
    tracing::info!(base_url = %config.upstream.base_url, "Upstream client initialized");

    // Create application state and router
    let state = AppState::new(config.clone(), Arc::new(client));
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
