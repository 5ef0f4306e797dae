use crate::domain::model::PriceRecord;
use crate::domain::ports::{Element, Locator};
use crate::utils::error::Result;
use tracing::{debug, info};

/// Rows need at least this many `<td>` cells to carry a price.
pub const MIN_DATA_CELLS: usize = 5;

async fn cell_text<E: Element>(cell: &E) -> Result<String> {
    Ok(cell.text().await?.trim().to_string())
}

/// Reads the body rows of the indicator table. Rows with fewer than
/// [`MIN_DATA_CELLS`] cells are skipped.
pub async fn extract_rows<E: Element>(table: &E, crop: &str) -> Result<Vec<PriceRecord>> {
    let body = table.find(&Locator::tag("tbody")).await?;
    let rows = body.find_all(&Locator::tag("tr")).await?;
    info!("Found {} row(s) for crop {}", rows.len(), crop);

    let mut records = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let cells = row.find_all(&Locator::tag("td")).await?;
        if cells.len() < MIN_DATA_CELLS {
            debug!(crop, row = index + 1, cells = cells.len(), "Skipping non-data row");
            continue;
        }

        // Cells past the fifth are ignored.
        let record = PriceRecord {
            crop: crop.to_string(),
            updated_at: cell_text(&cells[0]).await?,
            price_brl: cell_text(&cells[1]).await?,
            daily_change: cell_text(&cells[2]).await?,
            monthly_change: cell_text(&cells[3]).await?,
            price_usd: cell_text(&cells[4]).await?,
        };
        info!(
            row = index + 1,
            crop = %record.crop,
            updated_at = %record.updated_at,
            price_brl = %record.price_brl,
            daily_change = %record.daily_change,
            monthly_change = %record.monthly_change,
            price_usd = %record.price_usd,
            "Extracted row"
        );
        records.push(record);
    }

    Ok(records)
}
