use crate::{
    core::{
        RetryConfig, ScreenerError, SnapshotFuture, SnapshotSource, YfClient, quotesummary,
        wire::from_raw,
    },
    dividend::{model::RawMetricSnapshot, wire::V10Result},
};

const MODULES: &str = "summaryDetail,defaultKeyStatistics";

#[tracing::instrument(level = "debug", skip(client, retry_override), err)]
pub(super) async fn fetch_snapshot(
    client: &YfClient,
    symbol: &str,
    retry_override: Option<&RetryConfig>,
) -> Result<RawMetricSnapshot, ScreenerError> {
    let root: V10Result =
        quotesummary::fetch_module_result(client, symbol, MODULES, retry_override).await?;

    let detail = root.summary_detail;
    let (dividend_yield, trailing_annual_dividend_rate) = match detail {
        Some(d) => (
            from_raw(d.dividend_yield),
            from_raw(d.trailing_annual_dividend_rate),
        ),
        None => (None, None),
    };

    Ok(RawMetricSnapshot {
        dividend_yield,
        trailing_annual_dividend_rate,
        price_to_book: root
            .default_key_statistics
            .and_then(|k| from_raw(k.price_to_book)),
    })
}

impl SnapshotSource for YfClient {
    fn fetch_snapshot<'a>(&'a self, symbol: &'a str) -> SnapshotFuture<'a> {
        Box::pin(fetch_snapshot(self, symbol, None))
    }
}
