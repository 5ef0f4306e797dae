use crate::config::{OutputConfig, OutputFormat};
use crate::core::xlsx;
use crate::domain::model::{PriceRecord, REPORT_COLUMNS};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Encodes `records` in `format`. Every format carries the same columns in
/// [`REPORT_COLUMNS`] order.
pub fn render(records: &[PriceRecord], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Xlsx => {
            let rows: Vec<Vec<&str>> = records.iter().map(|r| r.fields().to_vec()).collect();
            xlsx::render_workbook(&REPORT_COLUMNS, &rows)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(REPORT_COLUMNS)?;
            for record in records {
                writer.write_record(record.fields())?;
            }
            writer.into_inner().map_err(|e| e.into_error().into())
        }
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
    }
}

pub struct ReportWriter<'a, S: Storage> {
    storage: &'a S,
    output: &'a OutputConfig,
}

impl<'a, S: Storage> ReportWriter<'a, S> {
    pub fn new(storage: &'a S, output: &'a OutputConfig) -> Self {
        Self { storage, output }
    }

    /// Writes one file per configured format and returns their locations.
    pub async fn write(&self, records: &[PriceRecord]) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(self.output.formats.len());
        for &format in &self.output.formats {
            let filename = self.output.filename_for(format);
            let data = render(records, format)?;
            tracing::debug!("Writing {} ({} bytes)", filename, data.len());
            self.storage.write_file(&filename, &data).await?;

            let location = self.storage.describe(&filename);
            tracing::info!("Data saved to '{}'", location);
            written.push(location);
        }
        Ok(written)
    }
}
