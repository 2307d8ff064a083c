use std::fmt;

use serde::Serialize;

use crate::core::ScreenerError;

/// Public Yahoo Finance page of a symbol; the symbol is appended.
pub const PROFILE_URL_BASE: &str = "https://finance.yahoo.com/quote/";

/// The provider's dividend metrics for one symbol at fetch time.
///
/// Each field is independently optional: Yahoo omits metrics it has no value for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMetricSnapshot {
    /// Fractional annual yield (`0.025` means 2.5%).
    pub dividend_yield: Option<f64>,
    /// Dividend paid per share over the trailing year, in the listing currency.
    pub trailing_annual_dividend_rate: Option<f64>,
    /// Price-to-book ratio.
    pub price_to_book: Option<f64>,
}

/// The metrics a [`DividendRecord`] requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricField {
    DividendYield,
    TrailingAnnualDividendRate,
    PriceToBook,
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DividendYield => "dividendYield",
            Self::TrailingAnnualDividendRate => "trailingAnnualDividendRate",
            Self::PriceToBook => "priceToBook",
        })
    }
}

/// How an exact zero in a required metric is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroPolicy {
    /// Zero counts as missing, so a stock reporting `0.0` anywhere is dropped. (Default)
    #[default]
    TreatAsMissing,
    /// Zero is a legitimate value; only absent metrics are missing.
    Accept,
}

impl ZeroPolicy {
    fn admits(self, value: Option<f64>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Self::TreatAsMissing, Some(v)) => v != 0.0,
            (Self::Accept, Some(_)) => true,
        }
    }
}

impl RawMetricSnapshot {
    /// Lists the required fields that fail the presence filter under `policy`.
    #[must_use]
    pub fn missing(&self, policy: ZeroPolicy) -> Vec<MetricField> {
        [
            (MetricField::DividendYield, self.dividend_yield),
            (
                MetricField::TrailingAnnualDividendRate,
                self.trailing_annual_dividend_rate,
            ),
            (MetricField::PriceToBook, self.price_to_book),
        ]
        .into_iter()
        .filter(|(_, v)| !policy.admits(*v))
        .map(|(field, _)| field)
        .collect()
    }
}

/// One ranked row of output: a stock that reported every required dividend metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendRecord {
    pub symbol: String,
    /// Trailing annual dividend per share, in the listing currency.
    pub dividend: f64,
    /// `dividendYield * 100`, unrounded.
    pub dividend_yield_percent: f64,
    pub price_to_book: f64,
    pub profile_url: String,
}

impl DividendRecord {
    /// Builds a record when the snapshot passes the presence filter.
    ///
    /// Returns the list of failing fields otherwise. The result depends only on the inputs.
    ///
    /// # Errors
    ///
    /// Returns the missing fields when any required metric is absent (or zero under
    /// [`ZeroPolicy::TreatAsMissing`]).
    pub fn from_snapshot(
        symbol: &str,
        snapshot: &RawMetricSnapshot,
        policy: ZeroPolicy,
    ) -> Result<Self, Vec<MetricField>> {
        let missing = snapshot.missing(policy);
        match (
            snapshot.dividend_yield,
            snapshot.trailing_annual_dividend_rate,
            snapshot.price_to_book,
        ) {
            (Some(dividend_yield), Some(dividend), Some(price_to_book)) if missing.is_empty() => {
                Ok(Self {
                    symbol: symbol.to_string(),
                    dividend,
                    dividend_yield_percent: dividend_yield * 100.0,
                    price_to_book,
                    profile_url: profile_url(symbol),
                })
            }
            _ => Err(missing),
        }
    }
}

/// The Yahoo Finance profile page of `symbol`.
#[must_use]
pub fn profile_url(symbol: &str) -> String {
    format!("{PROFILE_URL_BASE}{symbol}")
}

/// The terminal state of one symbol lookup.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The lookup succeeded and every required metric was present.
    Record(DividendRecord),
    /// The lookup succeeded but some required metrics were missing.
    Empty {
        symbol: String,
        missing: Vec<MetricField>,
    },
    /// The lookup itself failed.
    Failed {
        symbol: String,
        error: ScreenerError,
    },
}

impl FetchOutcome {
    /// The symbol this outcome belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Record(r) => &r.symbol,
            Self::Empty { symbol, .. } | Self::Failed { symbol, .. } => symbol,
        }
    }

    #[must_use]
    pub const fn status(&self) -> OutcomeStatus {
        match self {
            Self::Record(_) => OutcomeStatus::Record,
            Self::Empty { .. } => OutcomeStatus::Empty,
            Self::Failed { .. } => OutcomeStatus::Failed,
        }
    }

    /// The record, if one was produced.
    #[must_use]
    pub const fn record(&self) -> Option<&DividendRecord> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// Field-less discriminant of [`FetchOutcome`], handy for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Record,
    Empty,
    Failed,
}
