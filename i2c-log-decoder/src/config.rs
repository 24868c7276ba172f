//! Decoder configuration types
//!
//! This module defines the minimal configuration needed by the decoder
//! library. The configuration is immutable for a decoding run; presentation
//! and file handling concerns live in the application layer.

use serde::{Deserialize, Serialize};

/// Configuration for one decoding run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Optional 7-bit device address filter. Address phases that do not
    /// match are skipped; see `skip_illegal_operations` for how the rest of
    /// the transaction is treated.
    #[serde(default)]
    pub valid_address: Option<u8>,

    /// Prefix marker and address segments with the row timestamp
    #[serde(default)]
    pub include_timestamps: bool,

    /// Emit START/STOP marker segments
    #[serde(default)]
    pub include_start_stop: bool,

    /// Drop transactions that never address `valid_address` (only
    /// meaningful when `valid_address` is set)
    #[serde(default = "default_true")]
    pub skip_illegal_operations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            valid_address: None,
            include_timestamps: false,
            include_start_stop: false,
            skip_illegal_operations: true,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the 7-bit address filter
    pub fn with_valid_address(mut self, address: u8) -> Self {
        self.valid_address = Some(address);
        self
    }

    /// Builder method: include row timestamps on marker/address segments
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.include_timestamps = enabled;
        self
    }

    /// Builder method: include START/STOP marker segments
    pub fn with_start_stop(mut self, enabled: bool) -> Self {
        self.include_start_stop = enabled;
        self
    }

    /// Builder method: enable or disable dropping of unmatched transactions
    pub fn with_skip_illegal_operations(mut self, enabled: bool) -> Self {
        self.skip_illegal_operations = enabled;
        self
    }

    /// Check whether an address phase passes the address filter
    pub fn address_permitted(&self, address: u8) -> bool {
        match self.valid_address {
            Some(valid) => address == valid,
            None => true,
        }
    }
}
