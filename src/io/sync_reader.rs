//! Synchronous snapshot reader with iterator interface
//!
//! Provides a streaming iterator over payment snapshots stored one JSON
//! document per line. Delegates parsing to the snapshot_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Read failures are yielded once as `Err` and end the iteration
//! - Malformed lines, invalid UTF-8 included, are yielded as `Err` payments
//!   carrying their line number
//! - Blank lines are skipped but still counted
//!
//! ```no_run
//! use payment_action_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("payments.jsonl")).unwrap();
//! for snapshot in reader {
//!     let snapshot = snapshot.expect("read failed");
//!     match snapshot.payment {
//!         Ok(payment) => println!("line {}: {:?}", snapshot.line, payment.id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::io::snapshot_format::{is_blank, parse_snapshot, SnapshotLine};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Synchronous JSON Lines reader
#[derive(Debug)]
pub struct SyncReader {
    reader: BufReader<File>,
    buffer: Vec<u8>,
    line_num: u64,
    done: bool,
}

impl SyncReader {
    /// Open `path` for streaming iteration
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        Ok(Self {
            reader: BufReader::with_capacity(8 * 1024, file),
            buffer: Vec::new(),
            line_num: 0,
            done: false,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<SnapshotLine, String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_num += 1;
                    if !is_blank(&self.buffer) {
                        return Some(Ok(parse_snapshot(self.line_num, &self.buffer)));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(format!(
                        "Failed to read line {}: {}",
                        self.line_num + 1,
                        e
                    )));
                }
            }
        }
        None
    }
}
