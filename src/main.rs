use anyhow::Context;
use clap::Parser;
use crop_price_etl::utils::{logger, validation::Validate};
use crop_price_etl::{
    ensure_webdriver_ready, CliArgs, HarvestEngine, LocalStorage, ScrapeConfig, WebDriverPage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose, args.json_logs);

    tracing::info!("Starting crop-price-etl");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = args.load_config().context("failed to load configuration")?;

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        return Err(e).context("invalid configuration");
    }

    if args.dry_run {
        print_plan(&config);
        return Ok(());
    }

    let client = reqwest::Client::new();
    if let Err(e) = ensure_webdriver_ready(&client, &config.browser.webdriver_url).await {
        tracing::error!("{}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        return Err(e).context("WebDriver preflight failed");
    }

    let page = WebDriverPage::launch(&config.browser)
        .await
        .context("failed to launch browser")?;

    let storage = LocalStorage::new(config.output.output_path.clone());
    let engine = HarvestEngine::new(config, storage);

    let summary = engine
        .run(page)
        .await
        .context("crop price harvest aborted")?;

    let failed = summary.failed_crops();
    if !failed.is_empty() {
        tracing::warn!("Crops without data: {}", failed.join(", "));
    }
    for output in &summary.outputs {
        println!("Dados salvos em '{}'", output);
    }

    Ok(())
}

fn print_plan(config: &ScrapeConfig) {
    let resolver = crop_price_etl::CategoryResolver::new(
        &config.crops.produce_aliases,
        &config.crops.catch_all_label,
    );
    println!("Root URL: {}", config.site.root_url);
    for (crop, target) in resolver.plan(&config.crops.names) {
        println!("  {:<12} -> {}", crop, target);
    }
}
