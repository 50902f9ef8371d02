//! Quote proxy server binary.

use anyhow::Context;
use clap::Parser;
use quote_proxy::api::rest::{AppState, apply_middleware, create_router};
use quote_proxy::application::{QuoteService, QuoteServiceConfig};
use quote_proxy::config::Settings;
use quote_proxy::infrastructure::cache::QuoteCache;
use quote_proxy::infrastructure::providers::build_provider;
use quote_proxy::logging::init_logging;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Caching stock quote proxy.
#[derive(Debug, Parser)]
#[command(name = "quote-proxy", version, about)]
struct Args {
    /// Directory holding default.toml and per-environment overrides.
    #[arg(long, env = "QUOTE_PROXY_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Bind host, overriding configuration.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut settings = Settings::load(&args.config_dir)
        .with_context(|| format!("loading configuration from {}", args.config_dir.display()))?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate().context("validating configuration")?;

    init_logging(&settings.logging.level, settings.logging.format)?;

    let provider = build_provider(&settings.provider).context("building quote provider")?;
    let cache = Arc::new(QuoteCache::new(settings.cache.ttl()));
    let service_config = QuoteServiceConfig::from_settings(&settings.quotes)?;
    let service = QuoteService::new(Arc::clone(&provider), cache, service_config);

    let router = apply_middleware(
        create_router(Arc::new(AppState::new(service))),
        settings.server.cors_permissive,
    );

    let addr = settings.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!(
        %addr,
        provider = %provider.kind(),
        ttl_secs = settings.cache.ttl_secs,
        batch_limit = settings.quotes.batch_limit,
        "quote proxy listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("quote proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
