//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It streams
//! snapshots through the SyncReader, evaluates them one at a time, and writes
//! each report row as soon as it is decided.
//!
//! # Memory Efficiency
//!
//! Only one snapshot is held in memory at a time; memory usage is bounded by
//! the largest payment, not the size of the file.

use crate::io::snapshot_format::DecisionReport;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{evaluate, ProcessingStrategy, SharedDispatcher};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use payment_action_engine::core::{FlowDispatcher, MethodCatalog, ProviderMethodCatalog};
/// use payment_action_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let catalog: Arc<dyn MethodCatalog> = Arc::new(ProviderMethodCatalog::standard().clone());
/// let strategy = SyncProcessingStrategy::new(Arc::new(FlowDispatcher::new(catalog)));
/// let mut output = std::io::stdout();
///
/// strategy.process(Path::new("payments.jsonl"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    dispatcher: Arc<SharedDispatcher>,
}

impl SyncProcessingStrategy {
    pub fn new(dispatcher: Arc<SharedDispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Fatal errors (file not found, read or write failures) are returned
    /// immediately. Malformed snapshots are logged and reported, and
    /// processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = SyncReader::new(input_path)?;
        let mut report = DecisionReport::new(output)?;

        for snapshot in reader {
            let row = evaluate(&self.dispatcher, &snapshot?);
            report.write_row(&row)?;
        }

        report.finish()
    }
}
