//! Record types — purchase line items and ticker return observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One purchase line item, carrying the price used for decile classification.
///
/// Produced by the CSV import path; the core never mutates records, it only
/// orders them and classifies their prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub uuid: i64,
    pub product_id: String,
    pub customer_id: String,
    pub purchase_date: NaiveDate,
    pub document_number: i64,
    pub document_line_number: i64,
    pub price: f64,
}

/// One monthly price-return observation for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerReturn {
    pub date: NaiveDate,
    pub price_return: f64,
}

/// Parse a `YYYY-MM-DD` date, panicking on malformed input.
///
/// For fixtures and literals where a bad date is a programming error, not a
/// runtime condition. Runtime inputs go through the fallible import paths.
pub fn quick_parse(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("invalid date literal {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PriceRecord {
        PriceRecord {
            uuid: 0,
            product_id: "bed_bath_table:8".into(),
            customer_id: "15df0".into(),
            purchase_date: quick_parse("2017-02-28"),
            document_number: 100_000_000,
            document_line_number: 1,
            price: 101.14,
        }
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let deser: PriceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deser);
    }

    #[test]
    fn quick_parse_reads_iso_dates() {
        let date = quick_parse("2017-03-06");
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 3, 6).unwrap());
    }

    #[test]
    #[should_panic(expected = "invalid date literal")]
    fn quick_parse_panics_on_garbage() {
        quick_parse("abc");
    }
}
