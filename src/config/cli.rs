use crate::config::ScrapeConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "crop-price-etl")]
#[command(about = "Scrapes CEPEA crop price tables into a spreadsheet")]
pub struct CliArgs {
    /// Optional TOML configuration file; built-in defaults apply otherwise
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (e.g. a running chromedriver)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Directory the report is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Run Chrome without a window
    #[arg(long)]
    pub headless: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print which menu entry each crop resolves to, without opening a browser
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Loads the configuration file (if any) and applies flag overrides.
    pub fn load_config(&self) -> Result<ScrapeConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                ScrapeConfig::from_file(path)?
            }
            None => ScrapeConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ScrapeConfig) {
        if let Some(url) = &self.webdriver_url {
            config.browser.webdriver_url = url.clone();
        }
        if let Some(path) = &self.output_path {
            config.output.output_path = path.clone();
        }
        if self.headless {
            config.browser.headless = true;
        }
    }
}
