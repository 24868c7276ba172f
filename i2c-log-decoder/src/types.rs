//! Core types for the I2C log decoder library
//!
//! This module defines the fundamental types the decoder consumes and emits
//! when processing logic-analyzer trace exports. The decoder is a single-pass
//! state machine and only outputs fully closed transactions.

use serde::Serialize;
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// One observed bus event, as read from a trace export row
///
/// This represents a single row of the logic-analyzer export after the
/// free-text signal column has been classified, before any transaction
/// grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRecord {
    /// Row identifier from the export; opaque, kept for ordering/debug only
    pub sequence_id: String,
    /// Capture-relative timestamp in nanoseconds
    pub timestamp_ns: f64,
    /// Classified bus event
    pub signal: SignalEvent,
}

impl SignalRecord {
    pub fn new(sequence_id: impl Into<String>, timestamp_ns: f64, signal: SignalEvent) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            timestamp_ns,
            signal,
        }
    }
}

/// A classified bus event
///
/// Address and data events carry the raw payload byte parsed from the
/// export's hex encoding. Address events carry the unshifted byte: bit 0 is
/// the R/W flag, the 7-bit device address is in bits 7..1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// Bus START condition
    Start,
    /// Bus STOP condition
    Stop,
    /// Address phase, write direction per the analyzer (raw unshifted byte)
    AddressWrite(u8),
    /// Address phase, read direction per the analyzer (raw unshifted byte)
    AddressRead(u8),
    /// Repeated-start marker; materializes on the next read data byte
    Repeat,
    /// Write-phase data byte
    DataWrite(u8),
    /// Read-phase data byte
    DataRead(u8),
    /// Acknowledge pulse (ignored by the decoder)
    Ack,
    /// Not-acknowledge pulse (ignored by the decoder)
    Nack,
    /// Any other annotation text (ignored by the decoder)
    Unrecognized,
}

/// Transfer direction of an address or data phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Read,
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => write!(f, "Read"),
            Direction::Write => write!(f, "Write"),
        }
    }
}

/// One line of a decoded transaction
///
/// Marker and address segments carry the row timestamp when the decoder was
/// configured with `include_timestamps`; byte segments never do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Segment {
    /// START marker (only present with `include_start_stop`)
    Start { timestamp_ns: Option<f64> },
    /// STOP marker (only present with `include_start_stop`; never emitted
    /// for a transaction closed by end of input)
    Stop { timestamp_ns: Option<f64> },
    /// Address phase: 7-bit device address and transfer direction
    Address {
        address: u8,
        direction: Direction,
        timestamp_ns: Option<f64>,
    },
    /// "Repeat Read" marker preceding the data of a repeated start
    RepeatedRead,
    /// Register selector bytes: the first (up to two) write-phase bytes of
    /// the transaction
    Register { bytes: Vec<u8> },
    /// Accumulated data bytes of one direction
    Data { direction: Direction, bytes: Vec<u8> },
}

/// One complete I2C bus exchange, bounded by START and STOP
///
/// Emitted by the decoder only once closed, and never with zero segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transaction {
    /// Segments in emission order
    pub segments: Vec<Segment>,
}

impl Transaction {
    /// Create an empty transaction buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if no segments have been recorded
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if any recorded address phase targets `address`
    ///
    /// This is the structured form of the illegal-operation eligibility
    /// check: a transaction becomes eligible once an address phase matching
    /// the configured filter has been appended.
    pub fn involves_address(&self, address: u8) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Address { address: a, .. } if *a == address))
    }
}

/// Errors that can occur while reading or decoding a trace
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Unexpected number of fields in record: {found} (expected 3)")]
    RecordShape { found: usize },

    #[error("Invalid timestamp: {0}")]
    TimestampParse(String),

    #[error("Invalid hex payload: {0}")]
    PayloadDecode(String),

    #[error("Failed to read trace file: {0}")]
    TraceRead(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Side-channel diagnostic emitted while decoding
///
/// Diagnostics never abort a decode; every condition reported here is
/// recovered by skipping the offending record.
#[derive(Debug)]
pub enum Diagnostic {
    /// A record could not be parsed (field count, timestamp, or payload)
    MalformedRecord { error: DecoderError },
    /// An address phase did not match the configured address filter
    AddressMismatch {
        sequence_id: String,
        address: u8,
        expected: u8,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRecord { error } => {
                write!(f, "Skipping malformed record: {}", error)
            }
            Diagnostic::AddressMismatch {
                sequence_id,
                address,
                expected,
            } => write!(
                f,
                "Skipping operation with address 0x{:x} (record {}, expected 0x{:x})",
                address, sequence_id, expected
            ),
        }
    }
}
