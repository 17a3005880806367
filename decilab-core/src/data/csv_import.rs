//! CSV import — purchase records from delimited files.

use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;

use super::provider::DataError;
use crate::domain::PriceRecord;

/// Column indices for the record fields.
///
/// Not every source carries all seven fields. `None` synthesizes the field:
/// uuid and document number fall back to the row index, the document line
/// number to 1. The string and date columns — and price, without which there
/// is nothing to classify — must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    pub uuid: Option<usize>,
    pub product_id: usize,
    pub customer_id: usize,
    pub purchase_date: usize,
    pub document_number: Option<usize>,
    pub document_line_number: Option<usize>,
    pub price: usize,
}

/// The seven-column layout: uuid, product, customer, date, document, line, price.
pub const DEFAULT_FIELD_MAP: FieldMap = FieldMap {
    uuid: Some(0),
    product_id: 1,
    customer_id: 2,
    purchase_date: 3,
    document_number: Some(4),
    document_line_number: Some(5),
    price: 6,
};

impl Default for FieldMap {
    fn default() -> Self {
        DEFAULT_FIELD_MAP
    }
}

/// Read a delimited file into price records, skipping `header_rows` rows.
pub fn parse_csv(
    path: &Path,
    header_rows: usize,
    map: &FieldMap,
) -> Result<Vec<PriceRecord>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataError::CsvImport(format!("{}: {e}", path.display())))?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DataError::CsvImport(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    parse_rows(rows.get(header_rows..).unwrap_or(&[]), map)
}

/// Parse in-memory rows — split out so fixtures can bypass the filesystem.
pub fn parse_rows(rows: &[Vec<String>], map: &FieldMap) -> Result<Vec<PriceRecord>, DataError> {
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        records.push(PriceRecord {
            uuid: int_field(row, map.uuid, i as i64)?,
            product_id: cell(row, map.product_id)?.to_string(),
            customer_id: cell(row, map.customer_id)?.to_string(),
            purchase_date: date_field(row, map.purchase_date)?,
            document_number: int_field(row, map.document_number, i as i64)?,
            document_line_number: int_field(row, map.document_line_number, 1)?,
            price: float_field(row, map.price)?,
        });
    }

    Ok(records)
}

fn cell(row: &[String], idx: usize) -> Result<&str, DataError> {
    row.get(idx)
        .map(String::as_str)
        .ok_or_else(|| DataError::CsvImport(format!("missing column {idx}")))
}

fn int_field(row: &[String], idx: Option<usize>, fallback: i64) -> Result<i64, DataError> {
    match idx {
        None => Ok(fallback),
        Some(idx) => {
            let raw = cell(row, idx)?;
            raw.trim()
                .parse()
                .map_err(|e| DataError::CsvImport(format!("bad integer {raw:?}: {e}")))
        }
    }
}

fn float_field(row: &[String], idx: usize) -> Result<f64, DataError> {
    let raw = cell(row, idx)?;
    raw.trim()
        .parse()
        .map_err(|e| DataError::CsvImport(format!("bad price {raw:?}: {e}")))
}

fn date_field(row: &[String], idx: usize) -> Result<NaiveDate, DataError> {
    let raw = cell(row, idx)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| DataError::CsvImport(format!("bad date {raw:?}: {e}")))
}
