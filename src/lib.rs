pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use crate::adapters::{
    storage::LocalStorage,
    webdriver::{ensure_webdriver_ready, WebDriverPage},
};
pub use config::ScrapeConfig;
pub use crate::core::{normalize::normalize, resolver::CategoryResolver, workflow::HarvestEngine};
pub use domain::model::{PriceRecord, RunSummary};
pub use utils::error::{Result, ScrapeError};
