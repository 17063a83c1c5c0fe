//! Payment Action Engine CLI
//!
//! Evaluates payment snapshots from a JSON Lines file and reports the next
//! provider action for each one.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- payments.jsonl > decisions.csv
//! cargo run -- --strategy sync payments.jsonl > decisions.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 payments.jsonl > decisions.csv
//! cargo run -- --catalog methods.json --verbose payments.jsonl > decisions.csv
//! ```
//!
//! The report (`line,payment,action,error`) goes to stdout; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success (including inputs with malformed lines, which are reported)
//! - 1: Error (file not found, invalid catalog, write failure, etc.)

use payment_action_engine::cli;
use payment_action_engine::core::{MethodCatalog, ProviderMethodCatalog};
use payment_action_engine::logging;
use payment_action_engine::strategy;
use std::process;
use std::sync::Arc;

fn main() {
    let args = cli::parse_args();
    logging::init_logging(args.verbose);

    let catalog: Arc<dyn MethodCatalog> = match &args.catalog {
        Some(path) => match ProviderMethodCatalog::load(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), methods = catalog.len(), "Loaded method catalog");
                Arc::new(catalog)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load method catalog");
                process::exit(1);
            }
        },
        None => Arc::new(ProviderMethodCatalog::standard().clone()),
    };

    let strategy = {
        let config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config, catalog)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        tracing::error!(error = %e, "Processing failed");
        process::exit(1);
    }
}
