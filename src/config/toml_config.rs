use crate::domain::ports::WaitPolicy;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub site: SiteConfig,
    pub browser: BrowserConfig,
    pub navigation: NavigationConfig,
    pub crops: CropConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub root_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: "https://cepea.esalq.usp.br/br/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub maximized: bool,
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            maximized: true,
            headless: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub wait_timeout_seconds: u64,
    pub poll_interval_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            wait_timeout_seconds: 20,
            poll_interval_ms: 500,
        }
    }
}

impl NavigationConfig {
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::new(
            Duration::from_secs(self.wait_timeout_seconds),
            Duration::from_millis(self.poll_interval_ms),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub names: Vec<String>,
    pub produce_aliases: Vec<String>,
    pub catch_all_label: String,
}

impl Default for CropConfig {
    fn default() -> Self {
        let owned =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            names: owned(&["açúcar", "algodão", "arroz", "café", "milho", "soja", "trigo"]),
            produce_aliases: owned(&[
                "banana", "cenoura", "mamao", "melancia", "uva", "batata", "citros", "manga",
                "melao", "cebola", "folhosas", "maca", "tomate",
            ]),
            catch_all_label: "hortifruti".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_path: String,
    pub filename: String,
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            filename: "dados_culturas.xlsx".to_string(),
            formats: vec![OutputFormat::Xlsx],
        }
    }
}

impl OutputConfig {
    /// File name for `format`: the configured name with its extension swapped.
    pub fn filename_for(&self, format: OutputFormat) -> String {
        Path::new(&self.filename)
            .with_extension(format.extension())
            .to_string_lossy()
            .into_owned()
    }
}

impl ScrapeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ScrapeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("site.root_url", &self.site.root_url)?;
        validation::validate_url("browser.webdriver_url", &self.browser.webdriver_url)?;
        validation::validate_positive_number(
            "navigation.wait_timeout_seconds",
            self.navigation.wait_timeout_seconds,
            1,
        )?;
        validation::validate_positive_number(
            "navigation.poll_interval_ms",
            self.navigation.poll_interval_ms,
            1,
        )?;
        validation::validate_non_empty_list("crops.names", &self.crops.names)?;
        validation::validate_non_empty_string(
            "crops.catch_all_label",
            &self.crops.catch_all_label,
        )?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_path("output.filename", &self.output.filename)?;

        if self.output.formats.is_empty() {
            return Err(ScrapeError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }

        Ok(())
    }
}
