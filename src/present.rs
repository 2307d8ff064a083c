//! Ranking and rendering of batch results.

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use crate::dividend::DividendRecord;

#[derive(Tabled)]
struct Row<'a> {
    #[tabled(rename = "Stock Symbol")]
    symbol: &'a str,
    #[tabled(rename = "Dividend (Currency)")]
    dividend: f64,
    #[tabled(rename = "Dividend Yield")]
    dividend_yield: String,
    #[tabled(rename = "P/B Ratio")]
    price_to_book: f64,
    #[tabled(rename = "Yahoo Finance Profile")]
    profile_url: &'a str,
}

impl<'a> From<&'a DividendRecord> for Row<'a> {
    fn from(r: &'a DividendRecord) -> Self {
        Self {
            symbol: &r.symbol,
            dividend: r.dividend,
            dividend_yield: format_yield(r.dividend_yield_percent),
            price_to_book: r.price_to_book,
            profile_url: &r.profile_url,
        }
    }
}

/// Yield percentage with two decimals and a trailing `%`.
#[must_use]
pub fn format_yield(percent: f64) -> String {
    format!("{percent:.2}%")
}

/// Sorts records by yield, highest first. Equal yields keep their incoming order.
pub fn rank(records: &mut [DividendRecord]) {
    records.sort_by(|a, b| b.dividend_yield_percent.total_cmp(&a.dividend_yield_percent));
}

/// Renders records as a text table in the order given.
#[must_use]
pub fn render_table(records: &[DividendRecord]) -> String {
    let rows: Vec<Row<'_>> = records.iter().map(Row::from).collect();
    Table::new(rows)
        .with(Style::ascii())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()))
        .to_string()
}

/// Renders records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[DividendRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
