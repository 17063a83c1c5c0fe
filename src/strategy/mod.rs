//! Processing strategy module for batch evaluation
//!
//! This module defines the Strategy pattern for complete evaluation pipelines:
//! reading payment snapshots, running each through the decision engine, and
//! writing the decision report. Different implementations (synchronous,
//! asynchronous batch) can be selected at runtime and produce identical output.

use crate::cli::StrategyType;
use crate::core::{FlowDispatcher, MethodCatalog};
use crate::io::snapshot_format::{DecisionRow, SnapshotLine};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Dispatcher shared by every strategy
pub type SharedDispatcher = FlowDispatcher<Arc<dyn MethodCatalog>>;

/// Processing strategy trait for complete evaluation pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Evaluate every snapshot in `input_path` and write the report to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all snapshots were processed (malformed lines are reported, not fatal)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Evaluate one parsed input line into a report row
pub fn evaluate(dispatcher: &SharedDispatcher, snapshot: &SnapshotLine) -> DecisionRow {
    match &snapshot.payment {
        Ok(payment) => {
            let decision = dispatcher.determine_action(payment);
            DecisionRow::from_decision(snapshot.line, payment, &decision)
        }
        Err(e) => {
            tracing::warn!(line = snapshot.line, error = %e, "Skipping malformed snapshot");
            DecisionRow::from_error(snapshot.line, e)
        }
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
/// * `catalog` - Payment method catalog the engine validates against
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    catalog: Arc<dyn MethodCatalog>,
) -> Box<dyn ProcessingStrategy> {
    let dispatcher = Arc::new(FlowDispatcher::new(catalog));
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(dispatcher)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, dispatcher))
        }
    }
}
