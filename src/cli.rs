//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Fetch dividend data for stocks from a specified index and rank them by yield.
#[derive(Parser, Debug)]
#[command(name = "dividend-screener")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Index ticker to fetch stock symbols from (e.g., "^GSPC", "^IXIC", "^DJI").
    #[arg(long)]
    pub index_ticker: String,

    /// Number of concurrent lookups used for fetching dividend data [default: 4]
    #[arg(long)]
    pub threads: Option<usize>,

    /// YAML configuration file with the index mapping [default: ./config.yaml when present]
    #[arg(long, env = "DIVIDEND_SCREENER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Deadline in seconds for a single symbol lookup [default: 30]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Keep stocks that report an exact zero for a required metric
    #[arg(long)]
    pub accept_zero: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Suppress the progress line
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-symbol failures (-v) or every completion (-vv) to stderr
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
