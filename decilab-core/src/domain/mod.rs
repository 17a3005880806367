//! Domain types and record ordering.

pub mod record;
pub mod sort;

pub use record::{quick_parse, PriceRecord, TickerReturn};
pub use sort::{
    by_customer, by_date, by_document_line_number, by_document_number, by_price, by_product,
    by_uuid, ordered_by, LessFn, MultiSorter,
};

/// Ticker symbol type alias
pub type Ticker = String;
