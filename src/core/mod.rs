//! Core components of the `dividend-screener` crate.
//!
//! This module contains the foundational building blocks shared by the fetcher,
//! the batch orchestrator and the index resolver:
//! - The Yahoo [`YfClient`] and its builder.
//! - The primary [`ScreenerError`] type.
//! - The [`SnapshotSource`] seam between provider and orchestrator.

/// The Yahoo client (`YfClient`), builder, and retry configuration.
pub mod client;
/// The primary error type (`ScreenerError`) for the crate.
pub mod error;
pub(crate) mod net;
pub(crate) mod quotesummary;
/// Service traits abstracting the data provider.
pub mod services;
pub(crate) mod wire;

pub use client::{Backoff, RetryConfig, YfClient, YfClientBuilder};
pub use error::ScreenerError;
pub use services::{SnapshotFuture, SnapshotSource};
