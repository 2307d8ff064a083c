use std::pin::Pin;

use crate::core::ScreenerError;
use crate::dividend::RawMetricSnapshot;

/// Boxed future returned by [`SnapshotSource::fetch_snapshot`].
pub type SnapshotFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawMetricSnapshot, ScreenerError>> + Send + 'a>>;

/// A trait for services that can fetch the dividend metrics of one symbol.
///
/// This decouples the batch orchestrator from the concrete provider, making it easier
/// to test. It is implemented by [`YfClient`](crate::YfClient).
pub trait SnapshotSource: Send + Sync {
    /// Performs one lookup for `symbol`.
    ///
    /// A snapshot with absent fields is still `Ok`; only transport, status, and
    /// decoding problems are errors.
    fn fetch_snapshot<'a>(&'a self, symbol: &'a str) -> SnapshotFuture<'a>;
}
