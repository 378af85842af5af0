//! Todo Agent - Entry Point
//!
//! Parses command-line flags, loads settings, sets up logging and runs
//! the HTTP server until Ctrl-C.

use clap::Parser;
use std::path::PathBuf;
use todo_agent::core::config::AppSettings;
use todo_agent::core::error::Result;

/// Chat-style to-do service
#[derive(Parser, Debug)]
#[command(name = "todo-agent")]
#[command(about = "Turn chat messages into to-do items, remembering what you were talking about")]
struct Args {
    /// Path to a TOML settings file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Interface to bind (overrides config and APP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config and APP_PORT)
    #[arg(long, short = 'p')]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("todo_agent=info")),
        )
        .init();

    let mut settings = AppSettings::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }

    tracing::info!(
        "Starting {} service, version {}, port {}",
        settings.service_name,
        settings.version,
        settings.port
    );

    todo_agent::api::serve(settings).await
}
