use std::time::Duration;

use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The data received from an API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The cookie/crumb handshake with the provider failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A single symbol lookup did not finish within its deadline.
    #[error("fetch for {symbol} timed out after {after:?}")]
    Timeout {
        /// The symbol whose lookup stalled.
        symbol: String,
        /// The deadline that expired.
        after: Duration,
    },

    /// A fetch task ended without producing an outcome (it panicked or was cancelled).
    #[error("fetch task failed: {0}")]
    Task(String),

    /// The index ticker is not mapped, or its reference page does not exist.
    ///
    /// The payload names what was looked up; the display text is the user-facing message.
    #[error("Index Not Found")]
    IndexNotFound(String),

    /// No table on the reference page carries a recognised symbol column.
    #[error("Symbol column not found in the reference page tables")]
    SymbolColumnNotFound,

    /// The configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScreenerError {
    /// Returns `true` for failures that stop a run before any batch is started.
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(self, Self::IndexNotFound(_) | Self::SymbolColumnNotFound)
    }
}
