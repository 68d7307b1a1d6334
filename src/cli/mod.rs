//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "regime")]
#[command(author, version, about = "Moving-average regime backtesting dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive dashboard
    Dashboard(DashboardArgs),
    /// Run a single backtest
    Backtest(BacktestArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    /// Regime window length in trading days
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Band buffer fraction
    #[arg(short, long)]
    pub buffer: Option<f64>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Ticker symbol
    #[arg(short, long)]
    pub symbol: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Regime window length in trading days
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Band buffer fraction
    #[arg(short, long)]
    pub buffer: Option<f64>,

    /// Price data file (CSV) instead of the network provider
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}
