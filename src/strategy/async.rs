//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. Snapshots are read in batches and every snapshot
//! of a batch is evaluated on the tokio worker pool.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch JSON Lines reading)
//!     ├── tokio::spawn per snapshot, bounded by max_concurrent_batches
//!     └── SharedDispatcher (stateless, shared through Arc)
//! ```
//!
//! # Ordering
//!
//! Decisions are independent of each other, so snapshots may be evaluated in
//! any order. Results are collected with `buffered`, which yields them in input
//! order, so the report is identical to the synchronous strategy's.

use crate::io::async_reader::AsyncReader;
use crate::io::snapshot_format::{DecisionReport, DecisionRow, SnapshotLine};
use crate::strategy::{evaluate, ProcessingStrategy, SharedDispatcher};
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::BufReader;

/// Configuration for batch processing
///
/// Controls how many snapshots are read per batch and how many evaluations
/// run concurrently.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of snapshots per batch
    pub batch_size: usize,
    /// Maximum number of evaluations in flight, also the worker thread count
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to defaults for zero values
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "Invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// # Thread Safety
///
/// AsyncProcessingStrategy is Send + Sync. The dispatcher holds no mutable
/// state, so spawned tasks share it through an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    dispatcher: Arc<SharedDispatcher>,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, dispatcher: Arc<SharedDispatcher>) -> Self {
        Self { config, dispatcher }
    }

    async fn evaluate_batch(&self, batch: Vec<SnapshotLine>) -> Result<Vec<DecisionRow>, String> {
        let results: Vec<_> = stream::iter(batch)
            .map(|snapshot| {
                let dispatcher = Arc::clone(&self.dispatcher);
                tokio::spawn(async move { evaluate(&dispatcher, &snapshot) })
            })
            .buffered(self.config.max_concurrent_batches)
            .collect()
            .await;

        results
            .into_iter()
            .map(|joined| joined.map_err(|e| format!("Evaluation task failed: {}", e)))
            .collect()
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process snapshots from the input file and write the report to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads snapshots in batches using AsyncReader
    /// 3. Evaluates each batch concurrently, keeping input order
    /// 4. Streams the rows of each batch into the report
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned
    /// immediately. Malformed snapshots are logged and reported.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            let mut reader = AsyncReader::new(BufReader::new(file));
            let mut report = DecisionReport::new(output)?;

            loop {
                let batch = reader.read_batch(self.config.batch_size).await?;
                if batch.is_empty() {
                    break;
                }
                tracing::debug!(size = batch.len(), "Evaluating batch");

                for row in self.evaluate_batch(batch).await? {
                    report.write_row(&row)?;
                }
            }

            report.finish()
        })
    }
}
