//! dividend-screener CLI.
//!
//! # Usage
//!
//! ```bash
//! # Rank the S&P 500 by dividend yield with 8 concurrent lookups
//! dividend-screener --index-ticker ^GSPC --threads 8
//!
//! # Use a custom index mapping and emit JSON
//! dividend-screener --index-ticker ^FTSE --config indices.yaml --format json
//! ```

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dividend_screener::{
    BatchBuilder, IndexConfig, IndexResolver, YfClient, ZeroPolicy,
    batch::{DEFAULT_FETCH_TIMEOUT, DEFAULT_THREADS},
    present,
};

mod cli;

use cli::{Cli, OutputFormat};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let threads = cli.threads.or(config.threads).unwrap_or(DEFAULT_THREADS);
    let fetch_timeout = cli
        .timeout_secs
        .map(Duration::from_secs)
        .or_else(|| config.fetch_timeout())
        .unwrap_or(DEFAULT_FETCH_TIMEOUT);
    let zero_policy = if cli.accept_zero {
        ZeroPolicy::Accept
    } else {
        ZeroPolicy::TreatAsMissing
    };

    let resolver = IndexResolver::builder(config)
        .timeout(Duration::from_secs(30))
        .build()?;

    let symbols = match resolver.resolve(&cli.index_ticker).await {
        Ok(symbols) => symbols,
        Err(e) if e.is_resolution() => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("resolving index {}", cli.index_ticker));
        }
    };

    let client = YfClient::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let quiet = cli.quiet;
    let report = BatchBuilder::new(std::sync::Arc::new(client))
        .symbols(symbols)
        .threads(threads)
        .fetch_timeout(fetch_timeout)
        .zero_policy(zero_policy)
        .on_progress(move |p| {
            if !quiet {
                eprint!("\rFetching dividend data: {}/{} stocks", p.completed, p.total);
                let _ = std::io::stderr().flush();
            }
        })
        .run()
        .await;
    if !quiet && report.total > 0 {
        eprintln!();
    }

    let mut records = report.into_records();
    present::rank(&mut records);

    match cli.format {
        OutputFormat::Table => println!("{}", present::render_table(&records)),
        OutputFormat::Json => println!("{}", present::render_json(&records)?),
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the rendered result.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "dividend_screener=info",
        _ => "dividend_screener=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<IndexConfig> {
    if let Some(path) = path {
        return IndexConfig::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()));
    }
    let default = Path::new(DEFAULT_CONFIG_PATH);
    if default.is_file() {
        return IndexConfig::from_path(default)
            .with_context(|| format!("loading configuration from {DEFAULT_CONFIG_PATH}"));
    }
    Ok(IndexConfig::default())
}
