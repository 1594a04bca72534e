// src/services/table.rs
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};

use crate::error::{PortfolioError, Result};

/// The id of the historical returns table on an allocation page.
pub const RETURNS_TABLE_ID: &str = "yearReturns";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| PortfolioError::Structural(format!("bad selector '{}': {:?}", css, e)))
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Pull the body rows of `table#<table_id>` out of an HTML document, each row
/// as the trimmed text of its `<td>` cells. Rows without data cells are skipped.
pub fn extract_table_rows(html: &str, table_id: &str) -> Result<Vec<Vec<String>>> {
    let document = Html::parse_document(html);
    let table_selector = selector(&format!("table#{}", table_id))?;
    let tbody_selector = selector("tbody")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| PortfolioError::Structural(format!("no table with id '{}'", table_id)))?;
    let tbody = table
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| PortfolioError::Structural(format!("table '{}' has no tbody", table_id)))?;

    let mut rows = Vec::new();
    for (index, tr) in tbody.select(&row_selector).enumerate() {
        let cells: Vec<String> = tr.select(&cell_selector).map(cell_text).collect();
        if cells.is_empty() {
            debug!("Skipping row {} of '{}': no data cells", index, table_id);
            continue;
        }
        rows.push(cells);
    }

    info!("Found {} rows in table '{}'", rows.len(), table_id);
    Ok(rows)
}
