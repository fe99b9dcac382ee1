//! Binary crate for the weather MCP server.
//!
//! Serves the `get_weather` and `get_current_weather` tools over stdio.
//! Logging goes to stderr so it never interferes with the transport.

use anyhow::Context;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{API_KEY_ENV, Config, WeatherService};

mod server;

use server::WeatherServer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-mcp", version, about = "Weather forecast MCP server")]
struct Cli {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if config.api_key.is_some() || std::env::var(API_KEY_ENV).is_ok() {
        tracing::info!("API key configured; tools can be called without an api_key parameter");
    } else {
        tracing::info!("no API key configured; callers must pass the api_key parameter");
    }

    let service = WeatherService::new(config);
    let server = WeatherServer::new(Arc::new(service));

    tracing::info!("weather MCP server starting on stdio");
    let running = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    running.waiting().await?;
    tracing::info!("weather MCP server stopped");

    Ok(())
}
