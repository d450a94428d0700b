//! fpack-server - REST server for the F-Pack configuration and quoting backend.
//!
//! Configuration comes from an optional YAML file (`--config`) overlaid with
//! `FPACK__` environment variables, e.g. `FPACK__DATABASE__URL`.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, LoggingConfig};
use fpack_service::FpackServiceModule;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fpack-server", version, about = "F-Pack configuration and quoting server")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        let mut shown = config.clone();
        shown.database.url = config.database.redacted_url();
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    init_logging(&config.logging);

    let db = sea_orm::Database::connect(config.database.url.as_str())
        .await
        .with_context(|| format!("failed to connect to {}", config.database.redacted_url()))?;
    tracing::info!(url = %config.database.redacted_url(), "Connected to database");

    let module = FpackServiceModule::default();
    if config.database.run_migrations {
        module.migrate(&db).await?;
    }
    module.init(config.modules.fpack_service.clone(), Arc::new(db))?;

    let app = module.router()?.layer(TraceLayer::new_for_http());

    let bind_addr = &config.server.bind_addr;
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("fpack-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("fpack-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
