//! Text rendering of decoded transactions
//!
//! One segment per line, segments joined with a single line break,
//! transactions separated by a blank line. Marker and address lines carry a
//! `"123.00 ns: "` prefix when the decoder recorded timestamps.
//!
//! Addresses render in minimal hex (`0x8`); data and register bytes render
//! as two upper hex digits (`0xAA`), the form analyzer exports use.

use crate::types::{Segment, Transaction};
use std::fmt;

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Start { timestamp_ns } => {
                write_timestamp(f, *timestamp_ns)?;
                write!(f, "START")
            }
            Segment::Stop { timestamp_ns } => {
                write_timestamp(f, *timestamp_ns)?;
                write!(f, "STOP")
            }
            Segment::Address {
                address,
                direction,
                timestamp_ns,
            } => {
                write_timestamp(f, *timestamp_ns)?;
                write!(f, "Address 0x{:x} ({})", address, direction)
            }
            Segment::RepeatedRead => write!(f, "Repeat Read"),
            Segment::Register { bytes } => {
                write!(f, "Register")?;
                write_bytes(f, bytes)
            }
            Segment::Data { bytes, .. } => {
                write!(f, "Data")?;
                write_bytes(f, bytes)
            }
        }
    }
}

fn write_timestamp(f: &mut fmt::Formatter<'_>, timestamp_ns: Option<f64>) -> fmt::Result {
    if let Some(ts) = timestamp_ns {
        write!(f, "{:.2} ns: ", ts)?;
    }
    Ok(())
}

fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(f, " 0x{:02X}", byte)?;
    }
    Ok(())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Render a decoded trace as text, transactions separated by a blank line
pub fn render_transactions(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(Transaction::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
