use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fingerprint_attendance::api::{AppState, create_router};
use fingerprint_attendance::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fingerprint-attendance",
    about = "Fingerprint-clock attendance service",
    version
)]
struct CliArgs {
    #[arg(
        long,
        env = "ATTENDANCE_CONFIG",
        value_name = "DIR",
        default_value = "./config/default",
        help = "Directory containing extraction.yaml and holidays.yaml"
    )]
    config: PathBuf,

    #[arg(
        long,
        env = "ATTENDANCE_BIND",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080",
        help = "Address the HTTP server listens on"
    )]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = CliArgs::parse();

    // Fail fast on a bad configuration directory
    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    info!(
        config = %cli.config.display(),
        fallback_year = config.extraction().fallback_year,
        holidays = config.holidays().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    info!(addr = %cli.bind, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
