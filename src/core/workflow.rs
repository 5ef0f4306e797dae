use crate::config::ScrapeConfig;
use crate::core::extractor::extract_rows;
use crate::core::navigator::Navigator;
use crate::core::report::ReportWriter;
use crate::core::resolver::CategoryResolver;
use crate::core::session::BrowserSession;
use crate::domain::model::{CropStatus, CropTally, PriceRecord, RunSummary};
use crate::domain::ports::{Page, Storage};
use crate::utils::error::Result;
use tracing::{error, info, warn};

/// Drives one full run: open the site, harvest every configured crop, close
/// the browser, write the report.
pub struct HarvestEngine<S: Storage> {
    config: ScrapeConfig,
    resolver: CategoryResolver,
    storage: S,
}

impl<S: Storage> HarvestEngine<S> {
    pub fn new(config: ScrapeConfig, storage: S) -> Self {
        let resolver = CategoryResolver::new(
            &config.crops.produce_aliases,
            &config.crops.catch_all_label,
        );
        Self {
            config,
            resolver,
            storage,
        }
    }

    /// Fails only if the site cannot be opened or the report cannot be
    /// written; crop-level failures are recorded in the summary.
    pub async fn run<P: Page>(&self, page: P) -> Result<RunSummary> {
        info!("Starting crop price harvest");
        let session = BrowserSession::start(page, &self.config.site.root_url).await?;

        let (records, tallies) = self.harvest(session.page()).await;

        if let Err(e) = session.stop().await {
            warn!("Browser did not shut down cleanly: {}", e);
        }

        for tally in &tallies {
            match &tally.status {
                CropStatus::Harvested { rows } => info!("{}: {} row(s)", tally.crop, rows),
                CropStatus::Failed { reason } => warn!("{}: failed ({})", tally.crop, reason),
            }
        }
        info!(
            "Harvested {} record(s) from {} crop(s)",
            records.len(),
            tallies.len()
        );

        let outputs = ReportWriter::new(&self.storage, &self.config.output)
            .write(&records)
            .await?;

        Ok(RunSummary {
            records,
            tallies,
            outputs,
        })
    }

    async fn harvest<P: Page>(&self, page: &P) -> (Vec<PriceRecord>, Vec<CropTally>) {
        let mut records = Vec::new();
        let mut tallies = Vec::with_capacity(self.config.crops.names.len());

        for crop in &self.config.crops.names {
            let status = match self.harvest_crop(page, crop).await {
                Ok(rows) => {
                    let status = CropStatus::Harvested { rows: rows.len() };
                    records.extend(rows);
                    status
                }
                Err(e) => {
                    if e.is_navigation_failure() {
                        error!(
                            crop = %crop,
                            error = %e,
                            "Failed to locate elements for crop '{}'",
                            crop
                        );
                    } else {
                        error!(crop = %crop, error = %e, "Unexpected error for crop '{}'", crop);
                    }
                    CropStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            tallies.push(CropTally {
                crop: crop.clone(),
                status,
            });
        }

        (records, tallies)
    }

    async fn harvest_crop<P: Page>(&self, page: &P, crop: &str) -> Result<Vec<PriceRecord>> {
        let navigator = Navigator::new(page, &self.resolver, self.config.navigation.wait_policy());
        let table = navigator.open_detail_table(crop).await?;
        extract_rows(&table, crop).await
    }
}
