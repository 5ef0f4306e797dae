use serde::{Deserialize, Serialize};

/// Column headers of the exported report, in output order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Cultura",
    "Data de Atualização",
    "Valor em R$",
    "Variação por dia",
    "Variação por mês",
    "Valor em Dólar",
];

/// One row of the CEPEA indicator table, kept exactly as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Cultura")]
    pub crop: String,
    #[serde(rename = "Data de Atualização")]
    pub updated_at: String,
    #[serde(rename = "Valor em R$")]
    pub price_brl: String,
    #[serde(rename = "Variação por dia")]
    pub daily_change: String,
    #[serde(rename = "Variação por mês")]
    pub monthly_change: String,
    #[serde(rename = "Valor em Dólar")]
    pub price_usd: String,
}

impl PriceRecord {
    /// Field values in [`REPORT_COLUMNS`] order.
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.crop,
            &self.updated_at,
            &self.price_brl,
            &self.daily_change,
            &self.monthly_change,
            &self.price_usd,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropStatus {
    Harvested { rows: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropTally {
    pub crop: String,
    pub status: CropStatus,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: Vec<PriceRecord>,
    pub tallies: Vec<CropTally>,
    pub outputs: Vec<String>,
}

impl RunSummary {
    pub fn failed_crops(&self) -> Vec<&str> {
        self.tallies
            .iter()
            .filter(|t| matches!(t.status, CropStatus::Failed { .. }))
            .map(|t| t.crop.as_str())
            .collect()
    }
}
