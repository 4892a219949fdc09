use assessment_proxy::utils::logger;
use assessment_proxy::{AggregatingFetcher, AppState, CatalogClient, CliArgs, Settings};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_logger(args.verbose, args.log_format);

    tracing::info!("Starting assessment-proxy");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let settings = match Settings::load(&args) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    let catalog = CatalogClient::new(settings.catalog.clone())?;
    let state = AppState::new(AggregatingFetcher::new(Arc::new(catalog)));

    assessment_proxy::api::setup_and_serve(&settings, state).await
}
