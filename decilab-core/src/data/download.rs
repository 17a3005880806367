//! Download orchestrator — multi-ticker fetches with progress reporting.

use chrono::NaiveDate;

use super::provider::{DataError, DownloadProgress, ReturnProvider};
use super::store::JsonStore;

/// Download each ticker through the provider and persist the raw bodies.
///
/// Failures are collected per ticker rather than aborting the batch; the
/// summary reports both sides.
pub fn download_tickers(
    provider: &dyn ReturnProvider,
    store: &JsonStore,
    tickers: &[&str],
    end: NaiveDate,
    progress: &dyn DownloadProgress,
) -> DownloadSummary {
    let total = tickers.len();
    let mut succeeded = 0;
    let mut failed = 0;
    let mut errors: Vec<(String, DataError)> = Vec::new();

    for (i, ticker) in tickers.iter().enumerate() {
        progress.on_start(ticker, i, total);

        let result = download_single(provider, store, ticker, end);
        progress.on_complete(ticker, i, total, &result);

        match result {
            Ok(()) => succeeded += 1,
            Err(e) => {
                errors.push((ticker.to_string(), e));
                failed += 1;
            }
        }
    }

    progress.on_batch_complete(succeeded, failed, total);

    DownloadSummary {
        total,
        succeeded,
        failed,
        errors,
    }
}

/// Download a single ticker: fetch → store.
fn download_single(
    provider: &dyn ReturnProvider,
    store: &JsonStore,
    ticker: &str,
    end: NaiveDate,
) -> Result<(), DataError> {
    let fetched = provider.fetch(ticker, end)?;
    store.write(ticker, &fetched.body)?;
    Ok(())
}

/// Summary of a batch download operation.
#[derive(Debug)]
pub struct DownloadSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(String, DataError)>,
}

impl DownloadSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::FetchResult;
    use crate::domain::quick_parse;

    /// Provider that serves canned bodies and fails unknown tickers.
    struct FixtureProvider;

    impl ReturnProvider for FixtureProvider {
        fn name(&self) -> &str {
            "fixture"
        }

        fn fetch(&self, ticker: &str, _end: NaiveDate) -> Result<FetchResult, DataError> {
            if ticker != "VFINX" {
                return Err(DataError::TickerNotFound {
                    ticker: ticker.to_string(),
                });
            }
            let body = r#"[
                {"date":"2017-01-31T00:00:00.000Z","close":100.0,"adjClose":100.0},
                {"date":"2017-02-28T00:00:00.000Z","close":104.0,"adjClose":102.0}
            ]"#;
            Ok(FetchResult {
                ticker: ticker.to_string(),
                body: body.to_string(),
                returns: vec![],
            })
        }
    }

    /// Progress sink for tests.
    struct SilentProgress;

    impl DownloadProgress for SilentProgress {
        fn on_start(&self, _: &str, _: usize, _: usize) {}
        fn on_complete(&self, _: &str, _: usize, _: usize, _: &Result<(), DataError>) {}
        fn on_batch_complete(&self, _: usize, _: usize, _: usize) {}
    }

    #[test]
    fn batch_collects_per_ticker_failures() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let end = quick_parse("2017-12-31");

        let summary = download_tickers(
            &FixtureProvider,
            &store,
            &["VFINX", "NOPE"],
            end,
            &SilentProgress,
        );

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_succeeded());
        assert_eq!(summary.errors[0].0, "NOPE");
    }

    #[test]
    fn successful_downloads_land_in_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let end = quick_parse("2017-12-31");

        let summary = download_tickers(&FixtureProvider, &store, &["VFINX"], end, &SilentProgress);

        assert!(summary.all_succeeded());
        let returns = store.read_returns("VFINX").unwrap();
        assert_eq!(returns.len(), 1);
    }
}
