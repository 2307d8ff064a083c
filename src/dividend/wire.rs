use crate::core::wire::RawNum;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct V10Result {
    pub(crate) summary_detail: Option<SummaryDetailNode>,
    pub(crate) default_key_statistics: Option<KeyStatisticsNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryDetailNode {
    // Fraction, e.g. 0.0123 for 1.23%.
    pub(crate) dividend_yield: Option<RawNum<f64>>,
    pub(crate) trailing_annual_dividend_rate: Option<RawNum<f64>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyStatisticsNode {
    pub(crate) price_to_book: Option<RawNum<f64>>,
}
