//! Return provider trait and structured error types.
//!
//! The ReturnProvider trait abstracts over where ticker returns come from
//! (the Tiingo API, a stored response body) so implementations can be swapped
//! and mocked for tests.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::TickerReturn;

/// Structured error types for data operations.
///
/// Designed to be displayable at the CLI boundary without further mapping.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} for {ticker}")]
    HttpStatus { ticker: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("ticker not found: {ticker}")]
    TickerNotFound { ticker: String },

    #[error("store error: {0}")]
    StoreError(String),

    #[error("no stored data for ticker '{ticker}' — run `download {ticker}` first")]
    NoStoredData { ticker: String },

    #[error("csv import error: {0}")]
    CsvImport(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single ticker.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub ticker: String,
    /// Raw response body, persisted as-is by the store.
    pub body: String,
    /// Parsed month-over-month returns.
    pub returns: Vec<TickerReturn>,
}

/// Trait for return providers.
///
/// Implementations handle the specifics of one source. The store sits beside
/// this trait, not below it — providers don't know about persistence.
pub trait ReturnProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch monthly returns for a ticker up to the given end date.
    fn fetch(&self, ticker: &str, end: NaiveDate) -> Result<FetchResult, DataError>;
}

/// Progress callback for multi-ticker operations.
pub trait DownloadProgress {
    /// Called when starting to fetch a ticker.
    fn on_start(&self, ticker: &str, index: usize, total: usize);

    /// Called when a ticker fetch completes.
    fn on_complete(&self, ticker: &str, index: usize, total: usize, result: &Result<(), DataError>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl DownloadProgress for StdoutProgress {
    fn on_start(&self, ticker: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {ticker}...", index + 1, total);
    }

    fn on_complete(
        &self,
        ticker: &str,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        match result {
            Ok(()) => println!("  OK: {ticker}"),
            Err(e) => println!("  FAIL: {ticker}: {e}"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("\nDownload complete: {succeeded}/{total} succeeded, {failed} failed");
    }
}
