use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Decide the next provider action for payment snapshots
#[derive(Parser, Debug)]
#[command(name = "payment-action-engine")]
#[command(
    about = "Decide the next payment provider action for each payment snapshot",
    long_about = None
)]
pub struct CliArgs {
    /// Input file with one payment snapshot (JSON) per line
    #[arg(value_name = "INPUT", help = "Path to the input JSON Lines file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for evaluating snapshots
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for batched evaluation"
    )]
    pub strategy: StrategyType,

    /// Number of snapshots per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of snapshots per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent evaluations (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of evaluations in flight (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Payment method catalog replacing the built-in one
    #[arg(
        long = "catalog",
        value_name = "FILE",
        help = "Path to a JSON payment method catalog"
    )]
    pub catalog: Option<PathBuf>,

    /// Log every decision, not only rejections
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced
    /// with the defaults by `BatchConfig::new`, which logs a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
