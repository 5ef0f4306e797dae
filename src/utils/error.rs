use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("WebDriver command failed: {0}")]
    WebDriverError(#[from] thirtyfour::error::WebDriverError),

    #[error("WebDriver server at {url} is not available: {reason}")]
    WebDriverUnavailable { url: String, reason: String },

    #[error("Timed out after {seconds}s waiting for {anchor} to become visible")]
    Timeout { anchor: String, seconds: u64 },

    #[error("Element {anchor} not found")]
    ElementNotFound { anchor: String },

    #[error("Spreadsheet encoding failed: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl ScrapeError {
    /// True for the conditions a single crop can hit while driving the page.
    pub fn is_navigation_failure(&self) -> bool {
        matches!(
            self,
            ScrapeError::Timeout { .. }
                | ScrapeError::ElementNotFound { .. }
                | ScrapeError::WebDriverError(_)
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::WebDriverUnavailable { .. } => {
                "Start chromedriver (e.g. `chromedriver --port=9515`) or pass --webdriver-url"
            }
            ScrapeError::WebDriverError(_) => {
                "Check that Chrome and chromedriver versions match and the site is reachable"
            }
            ScrapeError::Timeout { .. } | ScrapeError::ElementNotFound { .. } => {
                "The site layout may have changed; inspect the page anchors"
            }
            ScrapeError::XlsxError(_)
            | ScrapeError::CsvError(_)
            | ScrapeError::SerializationError(_) => {
                "Report encoding failed; re-run with --verbose for details"
            }
            ScrapeError::IoError(_) => "Check that the output directory exists and is writable",
            ScrapeError::ConfigError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
