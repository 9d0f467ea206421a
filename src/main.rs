//! Lucky Pair game server

use clap::Parser;
use luckypair::{api::ApiServer, ConfigLoader, GameContext, LuckyPairConfig};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "luckypair")]
#[command(about = "Lucky pair jackpot game server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// API server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// API server port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Use short maintenance timings for local experiments
    #[arg(long)]
    fast_maintenance: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loader = match args.config {
        Some(ref path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if args.fast_maintenance {
        config.maintenance = LuckyPairConfig::fast_maintenance().maintenance;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "luckypair={level},tower_http={level}",
                    level = config.monitoring.log_level.as_filter()
                )
                .into()
            }),
        )
        .init();

    info!("Initializing lucky pair game state");
    let context = Arc::new(GameContext::new(&config));

    ApiServer::new(config.api.clone(), context).run().await?;

    Ok(())
}
