//! Index constituent resolution: ticker mapping, reference page lookup, and table extraction.

mod config;
pub mod table;
mod wiki;

pub use config::IndexConfig;
pub use wiki::{IndexResolver, IndexResolverBuilder};
