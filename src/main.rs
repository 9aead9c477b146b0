use anyhow::Result;
use clap::Parser;
use storefront_cli::{
    cli::{Args, CliApp},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Config::log_level_from_env()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {:#}", e);
            e
        })?
        .with_catalog_path(args.catalog.clone());

    tracing::info!(
        "🛒 Storefront starting in {} environment",
        config.environment
    );

    let app = CliApp::new(config);
    let result = app.run(args);
    if let Err(e) = &result {
        tracing::error!("Command failed: {:#}", e);
    }

    tracing::info!("🛒 Storefront stopped");
    result
}
