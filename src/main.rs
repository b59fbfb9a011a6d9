use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use duet::chat::Dispatcher;
use duet::config::Config;
use duet::llm::ProviderRegistry;
use duet::server::{AppState, build_app};

#[derive(Parser)]
#[command(name = "duet", version, about = "A minimal chat relay for LLM providers")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "duet.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duet=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .await
        .context("failed to load configuration")?;

    let providers = ProviderRegistry::from_env(&config.providers);
    let state = AppState {
        dispatcher: Dispatcher::new(providers),
    };
    let app = build_app(state, config.server.request_timeout_seconds);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
