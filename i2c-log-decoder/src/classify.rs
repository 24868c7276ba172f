//! Signal text classification
//!
//! Logic-analyzer exports describe each bus event as free text
//! (`"Address read: [0x11]"`, `"Data write: [0xAA]"`, `"Start bit"`).
//! Vendors decorate these lines differently, so classification is by
//! substring rather than exact match; tightening it would silently reject
//! valid exports with extra annotation text.
//!
//! Match order: START/STOP first, then address phases, the repeated-start
//! marker, data phases, and finally the ACK/NACK pulses the decoder
//! ignores.

use crate::types::{DecoderError, Result, SignalEvent};

/// Classify one signal-column text into a bus event
///
/// Returns `SignalEvent::Unrecognized` for text no rule matches. Address and
/// data events parse their hex payload here; a malformed payload is an error
/// for this record only, the caller skips it and continues.
pub fn classify(signal: &str) -> Result<SignalEvent> {
    if signal.contains("Start") {
        Ok(SignalEvent::Start)
    } else if signal.contains("Stop") {
        Ok(SignalEvent::Stop)
    } else if signal.contains("Address write") {
        Ok(SignalEvent::AddressWrite(payload_byte(signal)?))
    } else if signal.contains("Address read") {
        Ok(SignalEvent::AddressRead(payload_byte(signal)?))
    } else if signal.contains("Repeat") {
        Ok(SignalEvent::Repeat)
    } else if signal.contains("Data write") {
        Ok(SignalEvent::DataWrite(payload_byte(signal)?))
    } else if signal.contains("Data read") {
        Ok(SignalEvent::DataRead(payload_byte(signal)?))
    } else if signal.contains("NACK") {
        // Checked before ACK: "NACK" contains "ACK"
        Ok(SignalEvent::Nack)
    } else if signal.contains("ACK") {
        Ok(SignalEvent::Ack)
    } else {
        Ok(SignalEvent::Unrecognized)
    }
}

/// Extract the hex byte payload after the first `:` of a signal text
fn payload_byte(signal: &str) -> Result<u8> {
    let (_, payload) = signal
        .split_once(':')
        .ok_or_else(|| DecoderError::PayloadDecode(signal.to_string()))?;
    parse_hex_byte(payload)
}

/// Parse one byte from the export's hex encoding
///
/// Accepts the bracketed byte-array form (`"[0xAA]"`) as well as bare
/// `"0xAA"` / `"AA"` tokens.
pub fn parse_hex_byte(payload: &str) -> Result<u8> {
    let trimmed = payload.trim().trim_matches(|c| c == '[' || c == ']');
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u8::from_str_radix(digits, 16)
        .map_err(|_| DecoderError::PayloadDecode(payload.trim().to_string()))
}
