// Core modules
pub mod config;
pub mod data;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod refresh;
pub mod timezone;

// Re-export commonly used types
pub use crate::{
    dataset::{Panel, RawLimits, WorkingDataset},
    domain::{Candle, Timeframe},
    error::ChartError,
    refresh::{
        ChartPayload, HeadlessSurface, RefreshController, RefreshRequest, RenderSurface,
        WidgetState,
    },
};

// CLI argument parsing
use {clap::Parser, std::path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the timeframe-templated CSV files (data_5m.csv, ...)
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Asset symbol, e.g. BTC
    #[arg(long, default_value = config::constants::widget::DEFAULT_ASSET)]
    pub asset: String,

    /// Quote currency, e.g. EUR
    #[arg(long, default_value = config::constants::widget::DEFAULT_PAIR)]
    pub pair: String,

    /// Timeframe token: 5m, 15m, 1h, 4h or 1D
    #[arg(long, default_value = "5m")]
    pub timeframe: String,

    /// Dump the assembled payload as JSON after the initial cycle
    #[arg(long, default_value_t = false)]
    pub dump_payload: bool,
}
