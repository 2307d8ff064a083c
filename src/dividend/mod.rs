mod api;
mod model;
mod wire;

pub use model::{
    DividendRecord, FetchOutcome, MetricField, OutcomeStatus, PROFILE_URL_BASE, RawMetricSnapshot,
    ZeroPolicy, profile_url,
};

use std::time::Duration;

use crate::core::{RetryConfig, ScreenerError, SnapshotSource, YfClient};

/// Performs one lookup for `symbol` and classifies the result.
///
/// Never fails: transport and provider errors become [`FetchOutcome::Failed`], a
/// stalled lookup becomes `Failed` with [`ScreenerError::Timeout`] once `timeout`
/// elapses, and a snapshot missing required metrics becomes [`FetchOutcome::Empty`].
pub async fn fetch_dividend<S>(
    source: &S,
    symbol: &str,
    policy: ZeroPolicy,
    timeout: Duration,
) -> FetchOutcome
where
    S: SnapshotSource + ?Sized,
{
    let snapshot = match tokio::time::timeout(timeout, source.fetch_snapshot(symbol)).await {
        Ok(Ok(snapshot)) => snapshot,
        Ok(Err(error)) => {
            return FetchOutcome::Failed {
                symbol: symbol.to_string(),
                error,
            };
        }
        Err(_) => {
            return FetchOutcome::Failed {
                symbol: symbol.to_string(),
                error: ScreenerError::Timeout {
                    symbol: symbol.to_string(),
                    after: timeout,
                },
            };
        }
    };

    match DividendRecord::from_snapshot(symbol, &snapshot, policy) {
        Ok(record) => FetchOutcome::Record(record),
        Err(missing) => FetchOutcome::Empty {
            symbol: symbol.to_string(),
            missing,
        },
    }
}

/// A builder for fetching the dividend metrics of a single symbol from Yahoo.
pub struct DividendBuilder<'a> {
    client: &'a YfClient,
    symbol: String,
    retry_override: Option<RetryConfig>,
}

impl<'a> DividendBuilder<'a> {
    /// Creates a new `DividendBuilder` for a given symbol.
    pub fn new(client: &'a YfClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            retry_override: None,
        }
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Fetches the raw metrics, with absent fields left as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Yahoo reports an error for the symbol.
    pub async fn snapshot(self) -> Result<RawMetricSnapshot, ScreenerError> {
        api::fetch_snapshot(self.client, &self.symbol, self.retry_override.as_ref()).await
    }

    /// Fetches the metrics and applies the presence filter.
    ///
    /// Returns `Ok(None)` when the symbol lacks a required metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Yahoo reports an error for the symbol.
    pub async fn record(self, policy: ZeroPolicy) -> Result<Option<DividendRecord>, ScreenerError> {
        let symbol = self.symbol.clone();
        let snapshot = self.snapshot().await?;
        Ok(DividendRecord::from_snapshot(&symbol, &snapshot, policy).ok())
    }
}
