//! Bounded concurrent fetching of dividend metrics for many symbols.

mod report;

pub use report::{BatchCounts, BatchReport};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::{Id, JoinError, JoinSet};

use crate::core::{ScreenerError, SnapshotSource};
use crate::dividend::{FetchOutcome, OutcomeStatus, ZeroPolicy, fetch_dividend};

/// Default number of lookups allowed in flight at once.
pub const DEFAULT_THREADS: usize = 4;
/// Default deadline for a single lookup.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion notice handed to the progress observer after every finished lookup.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Lookups finished so far, this one included.
    pub completed: usize,
    /// Lookups in the batch.
    pub total: usize,
    pub symbol: &'a str,
    pub status: OutcomeStatus,
}

type ProgressFn = Box<dyn FnMut(Progress<'_>) + Send>;

/// A builder for fetching dividend metrics for a list of symbols concurrently.
///
/// At most [`threads`](Self::threads) lookups run at any instant. A failing or
/// incomplete symbol never affects its siblings; [`run`](Self::run) returns once every
/// symbol has reached a terminal outcome.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use dividend_screener::{BatchBuilder, YfClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(YfClient::builder().build()?);
/// let report = BatchBuilder::new(client)
///     .symbols(["KO", "PEP", "MSFT"])
///     .threads(2)
///     .run()
///     .await;
/// println!("{} of {} symbols pay a dividend", report.records.len(), report.total);
/// # Ok(())
/// # }
/// ```
pub struct BatchBuilder<S: ?Sized> {
    source: Arc<S>,
    symbols: Vec<String>,
    threads: usize,
    fetch_timeout: Duration,
    zero_policy: ZeroPolicy,
    on_progress: Option<ProgressFn>,
}

impl<S> BatchBuilder<S>
where
    S: SnapshotSource + ?Sized + 'static,
{
    /// Creates a new `BatchBuilder` drawing snapshots from `source`.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            symbols: Vec::new(),
            threads: DEFAULT_THREADS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            zero_policy: ZeroPolicy::default(),
            on_progress: None,
        }
    }

    /// Replaces the current list of symbols with a new list.
    #[must_use]
    pub fn symbols<I, T>(mut self, syms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.symbols = syms.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the concurrency limit. Values below 1 are raised to 1. (Default: 4)
    #[must_use]
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n.max(1);
        self
    }

    /// Sets the deadline for each individual lookup. (Default: 30 s)
    #[must_use]
    pub const fn fetch_timeout(mut self, dur: Duration) -> Self {
        self.fetch_timeout = dur;
        self
    }

    /// Sets how an exact zero in a required metric is treated.
    #[must_use]
    pub const fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    /// Registers an observer called after each lookup completes, in completion order.
    #[must_use]
    pub fn on_progress<F>(mut self, f: F) -> Self
    where
        F: FnMut(Progress<'_>) + Send + 'static,
    {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Executes the batch.
    ///
    /// Every symbol is attempted exactly once. The returned report holds records in
    /// completion order.
    #[tracing::instrument(skip(self), fields(total = self.symbols.len(), threads = self.threads))]
    pub async fn run(mut self) -> BatchReport {
        let symbols = std::mem::take(&mut self.symbols);
        let mut report = BatchReport::new(symbols.len(), Utc::now());

        if symbols.is_empty() {
            report.finished_at = Utc::now();
            return report;
        }

        let mut in_flight: JoinSet<FetchOutcome> = JoinSet::new();
        let mut pending: HashMap<Id, String> =
            HashMap::with_capacity(self.threads.min(symbols.len()));

        for symbol in symbols {
            if in_flight.len() >= self.threads
                && let Some(joined) = in_flight.join_next_with_id().await
            {
                self.account(&mut report, &mut pending, joined);
            }

            let source = Arc::clone(&self.source);
            let (policy, timeout) = (self.zero_policy, self.fetch_timeout);
            let task_symbol = symbol.clone();
            let handle = in_flight.spawn(async move {
                fetch_dividend(source.as_ref(), &task_symbol, policy, timeout).await
            });
            pending.insert(handle.id(), symbol);
        }

        while let Some(joined) = in_flight.join_next_with_id().await {
            self.account(&mut report, &mut pending, joined);
        }

        report.finished_at = Utc::now();
        let counts = report.counts();
        tracing::info!(
            records = counts.records,
            empty = counts.empty,
            failed = counts.failed,
            "batch finished"
        );
        report
    }

    fn account(
        &mut self,
        report: &mut BatchReport,
        pending: &mut HashMap<Id, String>,
        joined: Result<(Id, FetchOutcome), JoinError>,
    ) {
        let outcome = match joined {
            Ok((id, outcome)) => {
                pending.remove(&id);
                outcome
            }
            Err(e) => FetchOutcome::Failed {
                symbol: pending.remove(&e.id()).unwrap_or_default(),
                error: ScreenerError::Task(e.to_string()),
            },
        };

        match &outcome {
            FetchOutcome::Record(_) => {}
            FetchOutcome::Empty { symbol, missing } => {
                tracing::debug!(symbol = %symbol, ?missing, "incomplete dividend data");
            }
            FetchOutcome::Failed { symbol, error } => {
                tracing::warn!(symbol = %symbol, error = %error, "dividend fetch failed");
            }
        }

        let completed = report.counts().completed() + 1;
        if let Some(observer) = self.on_progress.as_mut() {
            observer(Progress {
                completed,
                total: report.total,
                symbol: outcome.symbol(),
                status: outcome.status(),
            });
        }
        tracing::debug!(completed, total = report.total, symbol = outcome.symbol(), "fetch completed");

        report.push(outcome);
    }
}
