//! Trace export readers
//!
//! This module contains readers for logic-analyzer trace exports. Each
//! reader implements an iterator pattern over SignalRecord objects; rows
//! that cannot be parsed are yielded as recoverable per-record errors so
//! decoding can continue past them.

use crate::types::{Result, SignalRecord};
use std::path::Path;

pub mod csv;

// Re-export reader types
pub use self::csv::CsvTraceReader;

/// Common trait for all trace readers
///
/// Provides a unified interface for reading different trace export
/// formats. Each reader yields SignalRecord objects in capture order.
pub trait TraceReader: Iterator<Item = Result<SignalRecord>> + Sized {
    /// Open a trace export and return an iterator over signal records
    fn open(path: &Path) -> Result<Self>;
}
