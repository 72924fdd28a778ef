//! storyblok-sync-asset-meta CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storyblok_sync_asset_meta::cli::{self, Cli};
use storyblok_sync_asset_meta::config::SyncConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Config errors are user errors: message on stdout, exit 1, no network
    let config = match SyncConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing; --verbose enables per-asset detail
    let level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("warn,storyblok_sync_asset_meta={}", level))),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    cli::run(config).await?;
    Ok(())
}
