//! Tiingo data provider.
//!
//! Fetches monthly close prices from Tiingo's daily-prices endpoint and
//! converts consecutive adjusted closes into percent-change returns. The raw
//! response body is kept alongside the parsed returns so the store can
//! persist exactly what the API sent.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::{DataError, FetchResult, ReturnProvider};
use crate::domain::TickerReturn;

const BASE_URL: &str = "https://api.tiingo.com/tiingo/daily";
const RESPONSE_FORMAT: &str = "json";
const RESAMPLE_FREQ: &str = "monthly";
const RESPONSE_COLUMNS: &str = "date,close,adjClose";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// One row of the Tiingo price response.
#[derive(Debug, Deserialize)]
struct PriceRow {
    date: String,
    #[serde(rename = "adjClose")]
    adj_close: f64,
}

/// Convert a raw Tiingo body into month-over-month returns.
///
/// Each return is `(curr - prev) / prev` over adjusted closes; the first
/// observation has no predecessor and produces no return.
pub(crate) fn parse_returns(ticker: &str, body: &str) -> Result<Vec<TickerReturn>, DataError> {
    let rows: Vec<PriceRow> = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("{ticker}: {e}")))?;

    if rows.is_empty() {
        return Err(DataError::TickerNotFound {
            ticker: ticker.to_string(),
        });
    }

    let mut returns = Vec::with_capacity(rows.len().saturating_sub(1));
    for pair in rows.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let date = chrono::DateTime::parse_from_rfc3339(&curr.date)
            .map_err(|e| {
                DataError::ResponseFormatChanged(format!("bad date {:?}: {e}", curr.date))
            })?
            .date_naive();

        returns.push(TickerReturn {
            date,
            price_return: (curr.adj_close - prev.adj_close) / prev.adj_close,
        });
    }

    Ok(returns)
}

/// Tiingo return provider.
pub struct TiingoProvider {
    client: reqwest::blocking::Client,
    api_token: String,
}

impl TiingoProvider {
    pub fn new(api_token: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_token: api_token.into(),
        }
    }
}

impl ReturnProvider for TiingoProvider {
    fn name(&self) -> &str {
        "tiingo"
    }

    fn fetch(&self, ticker: &str, end: NaiveDate) -> Result<FetchResult, DataError> {
        let url = format!("{BASE_URL}/{ticker}/prices");
        let end_date = end.format("%Y-%m-%d").to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("endDate", end_date.as_str()),
                ("token", self.api_token.as_str()),
                ("format", RESPONSE_FORMAT),
                ("resampleFreq", RESAMPLE_FREQ),
                ("columns", RESPONSE_COLUMNS),
            ])
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::TickerNotFound {
                ticker: ticker.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                ticker: ticker.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let returns = parse_returns(ticker, &body)?;

        Ok(FetchResult {
            ticker: ticker.to_string(),
            body,
            returns,
        })
    }
}
