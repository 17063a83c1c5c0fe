//! I/O module
//!
//! Handles snapshot input and report output.
//!
//! # Components
//!
//! - `snapshot_format` - JSON line parsing and CSV report serialization
//! - `sync_reader` - Synchronous JSON Lines reader with iterator interface
//! - `async_reader` - Asynchronous JSON Lines reader with batch reading interface

pub mod async_reader;
pub mod snapshot_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use snapshot_format::{
    parse_snapshot, write_decisions_csv, DecisionReport, DecisionRow, SnapshotLine,
};
pub use sync_reader::SyncReader;
