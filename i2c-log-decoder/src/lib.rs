//! I2C Log Decoder Library
//!
//! A small, reusable library for reconstructing I2C bus transactions from
//! logic-analyzer trace exports (CSV).
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on decoding:
//! - Classifies free-text signal rows into bus events (START, STOP,
//!   address phases, data phases, repeated starts)
//! - Groups events into well-formed transactions with a single-pass state
//!   machine (address phases, register selector bytes, data bytes)
//! - Applies address filtering and formatting policy
//! - Renders transactions in the analyzer-report text format
//!
//! The library does NOT:
//! - Convert spreadsheet/PDF captures to CSV
//! - Interpret device-specific register maps
//! - Handle terminal output or argument parsing
//!
//! All higher-level functionality is in the application layer (i2c-log-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use i2c_log_decoder::{render_transactions, Decoder, DecoderConfig};
//! use std::path::Path;
//!
//! // Configure decoder: only operations addressed to 0x50, with markers
//! let config = DecoderConfig::new()
//!     .with_valid_address(0x50)
//!     .with_start_stop(true);
//!
//! // Decode trace export
//! let decoder = Decoder::new(config);
//! let transactions = decoder.decode_file(Path::new("capture.csv")).unwrap();
//!
//! println!("{}", render_transactions(&transactions));
//! ```

// Public modules
pub mod classify;
pub mod config;
pub mod decoder;
pub mod formats;
pub mod render;
pub mod types;

// Re-export main types for convenience
pub use config::DecoderConfig;
pub use decoder::{Decoder, TransactionIter};
pub use formats::{CsvTraceReader, TraceReader};
pub use render::render_transactions;
pub use types::{
    DecoderError, Diagnostic, Direction, Result, Segment, SignalEvent, SignalRecord, Transaction,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
