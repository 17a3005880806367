//! JSON store — one raw response body per ticker.
//!
//! Layout: `{store_dir}/{TICKER}.json`. Bodies are persisted exactly as the
//! provider returned them and re-parsed on read, so a stored directory is a
//! complete, reproducible snapshot of one download run. Writes are atomic
//! (write to .tmp, rename into place).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::provider::DataError;
use super::tiingo;
use crate::domain::{Ticker, TickerReturn};

pub struct JsonStore {
    store_dir: PathBuf,
}

impl JsonStore {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
        }
    }

    /// Root directory of the store.
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    fn ticker_path(&self, ticker: &str) -> PathBuf {
        self.store_dir.join(format!("{ticker}.json"))
    }

    /// Persist a raw response body for a ticker.
    pub fn write(&self, ticker: &str, body: &str) -> Result<(), DataError> {
        fs::create_dir_all(&self.store_dir)
            .map_err(|e| DataError::StoreError(format!("failed to create dir: {e}")))?;

        let path = self.ticker_path(ticker);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, body)
            .map_err(|e| DataError::StoreError(format!("failed to write {ticker}: {e}")))?;

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DataError::StoreError(format!("atomic rename failed: {e}"))
        })?;

        Ok(())
    }

    /// Re-parse a stored body into monthly returns.
    pub fn read_returns(&self, ticker: &str) -> Result<Vec<TickerReturn>, DataError> {
        let path = self.ticker_path(ticker);
        if !path.exists() {
            return Err(DataError::NoStoredData {
                ticker: ticker.to_string(),
            });
        }

        let body = fs::read_to_string(&path)
            .map_err(|e| DataError::StoreError(format!("failed to read {ticker}: {e}")))?;

        tiingo::parse_returns(ticker, &body)
    }

    /// Load stored returns for every ticker into one map.
    pub fn load_all(&self, tickers: &[&str]) -> Result<HashMap<Ticker, Vec<TickerReturn>>, DataError> {
        let mut all = HashMap::with_capacity(tickers.len());
        for ticker in tickers {
            all.insert(ticker.to_string(), self.read_returns(ticker)?);
        }
        Ok(all)
    }
}
