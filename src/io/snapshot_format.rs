//! Snapshot input and decision report formats
//!
//! This module centralizes all format concerns, providing:
//! - Parsing of one payment snapshot per JSON line
//! - The `DecisionRow` record of the report
//! - CSV serialization of the report
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Decision, EngineError, Payment};
use csv::Writer;
use std::io::Write;

/// Header of the decision report
pub const REPORT_HEADER: [&str; 4] = ["line", "payment", "action", "error"];

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine {
    /// 1-based line number in the input file
    pub line: u64,
    pub payment: Result<Payment, EngineError>,
}

/// Parse a single JSON line into a payment snapshot
///
/// The line is taken as raw bytes, so invalid UTF-8 surfaces as a parse
/// error of that line rather than a read failure.
///
/// # Arguments
///
/// * `line` - Line number, used in error messages
/// * `json` - The raw line, with or without its line terminator
pub fn parse_snapshot(line: u64, json: &[u8]) -> SnapshotLine {
    let payment = serde_json::from_slice::<Payment>(json.trim_ascii())
        .map_err(|e| EngineError::from(e).at_line(line));
    SnapshotLine { line, payment }
}

/// Whether a raw input line holds nothing but whitespace
pub fn is_blank(line: &[u8]) -> bool {
    line.trim_ascii().is_empty()
}

/// One row of the decision report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRow {
    pub line: u64,
    pub payment: String,
    pub action: String,
    pub error: String,
}

impl DecisionRow {
    /// Row for a snapshot the engine evaluated
    pub fn from_decision(line: u64, payment: &Payment, decision: &Decision) -> Self {
        DecisionRow {
            line,
            payment: payment.id.clone().unwrap_or_default(),
            action: decision.action.to_string(),
            error: decision.error_message.clone(),
        }
    }

    /// Row for a line that could not be parsed
    ///
    /// The action column stays empty: no decision was made.
    pub fn from_error(line: u64, error: &EngineError) -> Self {
        DecisionRow {
            line,
            payment: String::new(),
            action: String::new(),
            error: error.to_string(),
        }
    }
}

/// Streaming CSV writer for the decision report
///
/// The header is written on creation, so an empty input still produces a
/// well-formed report.
pub struct DecisionReport<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> DecisionReport<W> {
    pub fn new(output: W) -> Result<Self, String> {
        let mut writer = Writer::from_writer(output);
        writer
            .write_record(REPORT_HEADER)
            .map_err(|e| format!("Failed to write CSV header: {}", e))?;
        Ok(DecisionReport { writer })
    }

    pub fn write_row(&mut self, row: &DecisionRow) -> Result<(), String> {
        self.writer
            .write_record([
                row.line.to_string().as_str(),
                row.payment.as_str(),
                row.action.as_str(),
                row.error.as_str(),
            ])
            .map_err(|e| format!("Failed to write CSV record: {}", e))
    }

    /// Flush buffered rows to the output
    pub fn finish(mut self) -> Result<(), String> {
        self.writer
            .flush()
            .map_err(|e| format!("Failed to flush output: {}", e))
    }
}

/// Write a complete decision report
pub fn write_decisions_csv(rows: &[DecisionRow], output: &mut dyn Write) -> Result<(), String> {
    let mut report = DecisionReport::new(output)?;
    for row in rows {
        report.write_row(row)?;
    }
    report.finish()
}
