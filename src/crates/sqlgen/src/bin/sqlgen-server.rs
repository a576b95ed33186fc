//! sqlgen server binary
//!
//! Serves the generate / execute / judge REST API. Configuration comes from
//! the environment; `--host` and `--port` override `SQLGEN_HOST` and
//! `SQLGEN_PORT`.

use anyhow::Context;
use clap::Parser;
use llm::remote::OpenAiClient;
use sqlgen::api::{create_router, AppState};
use sqlgen::{AppConfig, QueryJudge, SqlGenerator};
use std::sync::Arc;
use utils::{FromEnv, ServerConfig};
use warehouse::ClickHouseClient;

#[derive(Parser, Debug)]
#[command(name = "sqlgen-server")]
#[command(version = sqlgen::VERSION)]
#[command(about = "Grammar-constrained text-to-SQL service", long_about = None)]
struct Args {
    /// Address to bind (overrides SQLGEN_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides SQLGEN_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    tracing_subscriber::fmt().with_env_filter(rust_log).init();

    let mut server = ServerConfig::from_env("SQLGEN_").context("Invalid server configuration")?;
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }

    let config = AppConfig::from_env().context("Invalid service configuration")?;
    tracing::info!("Generation model: {}", config.generation.model);
    tracing::info!("Judge model: {}", config.judge.model);
    tracing::info!(
        "Warehouse: {}:{} (secure: {})",
        config.warehouse.host,
        config.warehouse.port,
        config.warehouse.secure
    );

    let warehouse = Arc::new(ClickHouseClient::new(config.warehouse)?);
    let generation_model = Arc::new(OpenAiClient::new(config.generation)?);
    let judge_model = Arc::new(OpenAiClient::new(config.judge)?);

    let generator = SqlGenerator::new(warehouse.clone(), generation_model);
    let judge = QueryJudge::new(judge_model).with_temperature(config.judge_temperature);
    let app = create_router(AppState::new(generator, warehouse, judge), server.timeout);

    let addr = server.socket_addr()?;
    tracing::info!("Starting sqlgen server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("sqlgen server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for CTRL-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
