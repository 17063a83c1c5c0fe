//! Asynchronous snapshot reader with batch interface
//!
//! Reads payment snapshots (one JSON document per line) from any tokio
//! buffered reader, handing them out in batches for concurrent evaluation.
//!
//! ```text
//! tokio file → AsyncReader → Batches of SnapshotLines
//!                  ↓
//!          snapshot_format module
//!          (parse_snapshot)
//! ```

use crate::io::snapshot_format::{is_blank, parse_snapshot, SnapshotLine};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Asynchronous JSON Lines reader
pub struct AsyncReader<R> {
    reader: R,
    buffer: Vec<u8>,
    line_num: u64,
}

impl<R: AsyncBufRead + Unpin> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_num: 0,
        }
    }

    /// Read up to `batch_size` snapshots
    ///
    /// Blank lines are skipped. Malformed lines, invalid UTF-8 included, are
    /// returned as `Err` payments so they can be reported in order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SnapshotLine>)` - empty once the input is exhausted
    /// * `Err(String)` - if reading from the underlying source failed
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<SnapshotLine>, String> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            self.buffer.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buffer)
                .await
                .map_err(|e| format!("Failed to read line {}: {}", self.line_num + 1, e))?;

            if read == 0 {
                break;
            }
            self.line_num += 1;

            if is_blank(&self.buffer) {
                continue;
            }
            batch.push(parse_snapshot(self.line_num, &self.buffer));
        }

        Ok(batch)
    }
}
