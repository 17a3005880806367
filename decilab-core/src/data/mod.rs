//! Data acquisition and import.

pub mod csv_import;
pub mod download;
pub mod provider;
pub mod store;
pub mod tiingo;

pub use csv_import::{parse_csv, parse_rows, FieldMap, DEFAULT_FIELD_MAP};
pub use download::{download_tickers, DownloadSummary};
pub use provider::{DataError, DownloadProgress, FetchResult, ReturnProvider, StdoutProgress};
pub use store::JsonStore;
pub use tiingo::TiingoProvider;
