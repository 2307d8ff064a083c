use chrono::{DateTime, Utc};

use crate::core::ScreenerError;
use crate::dividend::{DividendRecord, FetchOutcome, MetricField};

/// Everything one batch produced, split by outcome.
#[derive(Debug)]
pub struct BatchReport {
    /// Records of symbols that reported every required metric, in completion order.
    pub records: Vec<DividendRecord>,
    /// Symbols whose lookup succeeded without every required metric.
    pub empty: Vec<(String, Vec<MetricField>)>,
    /// Symbols whose lookup failed.
    pub failed: Vec<(String, ScreenerError)>,
    /// Number of symbols submitted.
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Per-outcome tallies of a [`BatchReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCounts {
    pub records: usize,
    pub empty: usize,
    pub failed: usize,
}

impl BatchCounts {
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.records + self.empty + self.failed
    }
}

impl BatchReport {
    pub(crate) const fn new(total: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            records: Vec::new(),
            empty: Vec::new(),
            failed: Vec::new(),
            total,
            started_at,
            finished_at: started_at,
        }
    }

    pub(crate) fn push(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Record(r) => self.records.push(r),
            FetchOutcome::Empty { symbol, missing } => self.empty.push((symbol, missing)),
            FetchOutcome::Failed { symbol, error } => self.failed.push((symbol, error)),
        }
    }

    #[must_use]
    pub fn counts(&self) -> BatchCounts {
        BatchCounts {
            records: self.records.len(),
            empty: self.empty.len(),
            failed: self.failed.len(),
        }
    }

    /// `true` when no record was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the report, keeping only the records.
    #[must_use]
    pub fn into_records(self) -> Vec<DividendRecord> {
        self.records
    }
}
