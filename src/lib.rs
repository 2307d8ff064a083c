//! dividend-screener: rank the constituents of a market index by dividend yield.
//!
//! The pipeline has four stages:
//! 1. [`IndexResolver`] maps an index ticker to a Wikipedia page and reads its
//!    constituent table.
//! 2. [`fetch_dividend`] looks up one symbol's dividend metrics through a
//!    [`SnapshotSource`] (normally [`YfClient`]) and classifies the result as a
//!    [`FetchOutcome`].
//! 3. [`BatchBuilder`] runs those lookups under a concurrency cap and gathers a
//!    [`BatchReport`].
//! 4. [`present`] ranks the records by yield and renders them.

pub mod batch;
pub mod core;
pub mod dividend;
pub mod index;
pub mod present;

pub use batch::{BatchBuilder, BatchCounts, BatchReport, Progress};
pub use crate::core::{
    Backoff, RetryConfig, ScreenerError, SnapshotFuture, SnapshotSource, YfClient, YfClientBuilder,
};
pub use dividend::{
    DividendBuilder, DividendRecord, FetchOutcome, MetricField, OutcomeStatus, RawMetricSnapshot,
    ZeroPolicy, fetch_dividend,
};
pub use index::{IndexConfig, IndexResolver};
