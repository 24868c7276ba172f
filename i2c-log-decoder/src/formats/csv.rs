//! CSV trace export reader
//!
//! Reads the CSV export of a logic-analyzer capture: a header row followed
//! by three-column records (row id, timestamp in nanoseconds, signal text).
//!
//! Row-level problems (wrong field count, non-numeric timestamp, malformed
//! hex payload) are yielded as per-record errors, never as a failure of the
//! whole read; the decoder skips them with a diagnostic.

use crate::classify::classify;
use crate::types::{DecoderError, Result, SignalRecord};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Fields per trace record: row id, timestamp, signal text
const RECORD_FIELDS: usize = 3;

/// CSV trace reader using the csv crate
pub struct CsvTraceReader<R: Read> {
    records: StringRecordsIntoIter<R>,
}

impl CsvTraceReader<File> {
    /// Open a CSV trace export file
    ///
    /// Validates that the file can be opened; the rows themselves are read
    /// lazily by the returned iterator.
    pub fn open(path: &Path) -> Result<Self> {
        log::info!("Opening trace file: {:?}", path);

        let file = File::open(path).map_err(|e| {
            DecoderError::TraceRead(format!("Failed to open trace file {:?}: {}", path, e))
        })?;

        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvTraceReader<R> {
    /// Read a CSV trace from any reader (in-memory captures, pipes)
    pub fn from_reader(reader: R) -> Self {
        // flexible: field-count validation is per record, not fatal
        let records = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        Self { records }
    }
}

impl<R: Read> Iterator for CsvTraceReader<R> {
    type Item = Result<SignalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(row) => Some(parse_record(&row)),
            Err(e) => Some(Err(DecoderError::TraceRead(e.to_string()))),
        }
    }
}

impl super::TraceReader for CsvTraceReader<File> {
    fn open(path: &Path) -> Result<Self> {
        CsvTraceReader::open(path)
    }
}

/// Parse one CSV row into a signal record
fn parse_record(row: &StringRecord) -> Result<SignalRecord> {
    if row.len() != RECORD_FIELDS {
        return Err(DecoderError::RecordShape { found: row.len() });
    }

    let timestamp_ns: f64 = row[1]
        .trim()
        .parse()
        .map_err(|_| DecoderError::TimestampParse(row[1].to_string()))?;

    let signal = classify(&row[2])?;

    Ok(SignalRecord {
        sequence_id: row[0].to_string(),
        timestamp_ns,
        signal,
    })
}
