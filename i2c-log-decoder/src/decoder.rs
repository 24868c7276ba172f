//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! The Decoder struct is the entry point: it consumes an ordered stream of
//! signal records and groups them into well-formed transactions.
//!
//! Decoding is a single-pass fold over the record stream. One mutable
//! context holds the open transaction; a transaction is yielded only once
//! closed by a STOP, a new START, or the end of the input.

use crate::config::DecoderConfig;
use crate::formats::csv::CsvTraceReader;
use crate::types::{
    Diagnostic, Direction, Result, Segment, SignalEvent, SignalRecord, Transaction,
};
use std::path::Path;

/// Write-phase bytes collected as register selectors per transaction
const MAX_REGISTER_BYTES: usize = 2;

/// The main decoder struct - entry point for all decoding operations
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder for one configuration
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// The configuration this decoder runs with
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a logic-analyzer CSV export and collect all transactions
    ///
    /// Convenience wrapper around [`Decoder::decode`]: opens the file,
    /// streams its rows and collects the closed transactions. Malformed
    /// rows are logged and skipped; only a file-level read failure is an
    /// error.
    ///
    /// # Example
    /// ```no_run
    /// use i2c_log_decoder::{Decoder, DecoderConfig};
    /// use std::path::Path;
    ///
    /// let decoder = Decoder::new(DecoderConfig::new());
    /// let transactions = decoder.decode_file(Path::new("capture.csv")).unwrap();
    /// for txn in &transactions {
    ///     println!("{}", txn);
    /// }
    /// ```
    pub fn decode_file(&self, path: &Path) -> Result<Vec<Transaction>> {
        log::info!("Decoding trace file: {:?}", path);
        let records = CsvTraceReader::open(path)?;
        Ok(self.decode(records).collect())
    }

    /// Lazily decode an ordered record stream
    ///
    /// Returns an iterator that yields each transaction once it is fully
    /// closed. Recoverable per-record errors in the input stream are
    /// reported through the default diagnostic sink (`log::warn!`) and the
    /// record is skipped.
    pub fn decode<I>(&self, records: I) -> TransactionIter<I::IntoIter, fn(Diagnostic)>
    where
        I: IntoIterator<Item = Result<SignalRecord>>,
    {
        self.decode_with_diagnostics(records, log_diagnostic as fn(Diagnostic))
    }

    /// Lazily decode with an injectable diagnostic sink
    ///
    /// The sink receives every recovered condition (malformed records,
    /// address-filter mismatches) in stream order. Useful for tests and for
    /// callers that surface diagnostics elsewhere than the log.
    pub fn decode_with_diagnostics<I, S>(
        &self,
        records: I,
        sink: S,
    ) -> TransactionIter<I::IntoIter, S>
    where
        I: IntoIterator<Item = Result<SignalRecord>>,
        S: FnMut(Diagnostic),
    {
        TransactionIter {
            records: records.into_iter(),
            state: DecodeState::default(),
            config: self.config.clone(),
            sink,
            finished: false,
        }
    }
}

fn log_diagnostic(diagnostic: Diagnostic) {
    log::warn!("{}", diagnostic);
}

/// Iterator that folds signal records into transactions
///
/// Wraps the record iterator and the single decoding context. The open
/// transaction is held back until a STOP, a new START, or the end of the
/// stream closes it; partially assembled transactions are never yielded.
pub struct TransactionIter<I, S>
where
    I: Iterator<Item = Result<SignalRecord>>,
    S: FnMut(Diagnostic),
{
    records: I,
    state: DecodeState,
    config: DecoderConfig,
    sink: S,
    finished: bool,
}

impl<I, S> Iterator for TransactionIter<I, S>
where
    I: Iterator<Item = Result<SignalRecord>>,
    S: FnMut(Diagnostic),
{
    type Item = Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.records.next() {
                Some(Ok(record)) => {
                    if let Some(txn) = self.state.apply(record, &self.config, &mut self.sink) {
                        return Some(txn);
                    }
                }
                Some(Err(error)) => {
                    // Recoverable per-record failure: report and continue
                    (self.sink)(Diagnostic::MalformedRecord { error });
                }
                None => {
                    // Implicit stop: flush whatever is still open, but never
                    // append a STOP marker the capture did not contain
                    self.finished = true;
                    return self.state.close(&self.config);
                }
            }
        }
    }
}

/// Mutable context for the one transaction under construction
#[derive(Default)]
struct DecodeState {
    /// Segments accumulated for the open transaction
    current: Transaction,
    /// Read-phase bytes not yet flushed into a segment
    pending_read: Vec<u8>,
    /// Write-phase bytes past the register cap, not yet flushed
    pending_write: Vec<u8>,
    /// Register selector bytes, capped at MAX_REGISTER_BYTES per transaction
    registers: Vec<u8>,
    /// Direction of the most recent address phase
    direction: Option<Direction>,
    /// Set by a Repeat event, cleared by the next read data byte
    repeat_pending: bool,
}

impl DecodeState {
    /// Process one record; returns a transaction when one closes
    fn apply(
        &mut self,
        record: SignalRecord,
        config: &DecoderConfig,
        sink: &mut dyn FnMut(Diagnostic),
    ) -> Option<Transaction> {
        let timestamp = config.include_timestamps.then_some(record.timestamp_ns);

        match record.signal {
            SignalEvent::Start => {
                let closed = self.close(config);
                if config.include_start_stop {
                    self.current.segments.push(Segment::Start {
                        timestamp_ns: timestamp,
                    });
                }
                closed
            }
            SignalEvent::Stop => self.close_at_stop(config, timestamp),
            SignalEvent::AddressWrite(raw) | SignalEvent::AddressRead(raw) => {
                self.handle_address(raw, timestamp, &record.sequence_id, config, sink);
                None
            }
            SignalEvent::Repeat => {
                self.repeat_pending = true;
                None
            }
            SignalEvent::DataRead(byte) => {
                if self.eligible(config) {
                    if self.repeat_pending {
                        self.current.segments.push(Segment::RepeatedRead);
                        self.repeat_pending = false;
                    }
                    self.pending_read.push(byte);
                }
                None
            }
            SignalEvent::DataWrite(byte) => {
                if self.eligible(config) {
                    if self.registers.len() < MAX_REGISTER_BYTES {
                        self.registers.push(byte);
                    } else {
                        self.pending_write.push(byte);
                    }
                }
                None
            }
            SignalEvent::Ack | SignalEvent::Nack | SignalEvent::Unrecognized => None,
        }
    }

    /// Record an address phase
    ///
    /// Direction comes from bit 0 of the raw byte regardless of how the
    /// analyzer labeled the row; the device address is the byte shifted
    /// right by one. A filter mismatch skips the record without touching
    /// any accumulator state.
    fn handle_address(
        &mut self,
        raw: u8,
        timestamp: Option<f64>,
        sequence_id: &str,
        config: &DecoderConfig,
        sink: &mut dyn FnMut(Diagnostic),
    ) {
        let direction = if raw & 1 == 1 {
            Direction::Read
        } else {
            Direction::Write
        };
        let address = raw >> 1;

        if let Some(expected) = config.valid_address {
            if address != expected {
                sink(Diagnostic::AddressMismatch {
                    sequence_id: sequence_id.to_string(),
                    address,
                    expected,
                });
                return;
            }
        }

        // Bus turnaround: the previous direction's data bytes form a
        // completed segment before the new address phase is recorded
        if let Some(previous) = self.direction {
            if previous != direction {
                self.flush_direction(previous);
            }
        }

        self.direction = Some(direction);
        self.current.segments.push(Segment::Address {
            address,
            direction,
            timestamp_ns: timestamp,
        });
    }

    /// Address-filter eligibility of the open transaction
    ///
    /// With a filter and `skip_illegal_operations`, the transaction may
    /// accept data and be emitted only once an address phase matching the
    /// filter has been recorded. Checked against the current transaction
    /// only, never the whole stream.
    fn eligible(&self, config: &DecoderConfig) -> bool {
        match config.valid_address {
            Some(valid) if config.skip_illegal_operations => {
                self.current.involves_address(valid)
            }
            _ => true,
        }
    }

    /// Close the open transaction (START boundary or end of stream)
    fn close(&mut self, config: &DecoderConfig) -> Option<Transaction> {
        let mut finished = None;
        if self.eligible(config) {
            self.flush_pending();
            if !self.current.is_empty() {
                finished = Some(std::mem::take(&mut self.current));
            }
        }
        self.reset();
        finished
    }

    /// Close the open transaction at an explicit STOP
    fn close_at_stop(
        &mut self,
        config: &DecoderConfig,
        timestamp: Option<f64>,
    ) -> Option<Transaction> {
        let mut finished = None;
        if self.eligible(config) {
            self.flush_pending();
            if !self.current.is_empty() {
                if config.include_start_stop {
                    self.current.segments.push(Segment::Stop {
                        timestamp_ns: timestamp,
                    });
                }
                finished = Some(std::mem::take(&mut self.current));
            }
        }
        self.reset();
        finished
    }

    /// Flush all pending bytes into segments
    ///
    /// Emission order is fixed: read bytes, register bytes, write bytes,
    /// regardless of accumulation order. Consumers depend on this order;
    /// do not rearrange it.
    fn flush_pending(&mut self) {
        if !self.pending_read.is_empty() {
            let bytes = std::mem::take(&mut self.pending_read);
            self.current.segments.push(Segment::Data {
                direction: Direction::Read,
                bytes,
            });
        }
        if !self.registers.is_empty() {
            let bytes = std::mem::take(&mut self.registers);
            self.current.segments.push(Segment::Register { bytes });
        }
        if !self.pending_write.is_empty() {
            let bytes = std::mem::take(&mut self.pending_write);
            self.current.segments.push(Segment::Data {
                direction: Direction::Write,
                bytes,
            });
        }
    }

    /// Flush one direction's pending data bytes (bus turnaround)
    ///
    /// Register bytes are not flushed here; they only leave the
    /// accumulator when the transaction closes.
    fn flush_direction(&mut self, direction: Direction) {
        let pending = match direction {
            Direction::Read => &mut self.pending_read,
            Direction::Write => &mut self.pending_write,
        };
        if !pending.is_empty() {
            let bytes = std::mem::take(pending);
            self.current.segments.push(Segment::Data { direction, bytes });
        }
    }

    /// Reset all accumulator state between transactions
    fn reset(&mut self) {
        self.current = Transaction::new();
        self.pending_read.clear();
        self.pending_write.clear();
        self.registers.clear();
        self.direction = None;
        self.repeat_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DecoderError;

    fn records(events: Vec<SignalEvent>) -> Vec<Result<SignalRecord>> {
        events
            .into_iter()
            .enumerate()
            .map(|(i, signal)| Ok(SignalRecord::new(i.to_string(), i as f64, signal)))
            .collect()
    }

    fn decode_all(config: DecoderConfig, events: Vec<SignalEvent>) -> Vec<Transaction> {
        Decoder::new(config).decode(records(events)).collect()
    }

    #[test]
    fn test_write_transaction_with_registers() {
        // Address 0x10 >> 1 = 0x08, bit 0 clear = write. The first two
        // write bytes are register selectors, the third is payload.
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0xAA),
                SignalEvent::DataWrite(0xBB),
                SignalEvent::DataWrite(0xCC),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        assert_eq!(
            txns[0].segments,
            vec![
                Segment::Address {
                    address: 0x08,
                    direction: Direction::Write,
                    timestamp_ns: None,
                },
                Segment::Register {
                    bytes: vec![0xAA, 0xBB],
                },
                Segment::Data {
                    direction: Direction::Write,
                    bytes: vec![0xCC],
                },
            ]
        );
    }

    #[test]
    fn test_filtered_transaction_is_dropped() {
        let config = DecoderConfig::new().with_valid_address(0x09);
        let txns = decode_all(
            config,
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0xAA),
                SignalEvent::DataWrite(0xBB),
                SignalEvent::DataWrite(0xCC),
                SignalEvent::Stop,
            ],
        );
        assert!(txns.is_empty());
    }

    #[test]
    fn test_repeated_read() {
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressRead(0x11),
                SignalEvent::Repeat,
                SignalEvent::DataRead(0x01),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        assert_eq!(
            txns[0].segments,
            vec![
                Segment::Address {
                    address: 0x08,
                    direction: Direction::Read,
                    timestamp_ns: None,
                },
                Segment::RepeatedRead,
                Segment::Data {
                    direction: Direction::Read,
                    bytes: vec![0x01],
                },
            ]
        );
    }

    #[test]
    fn test_repeat_marker_emitted_once() {
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressRead(0x11),
                SignalEvent::Repeat,
                SignalEvent::DataRead(0x01),
                SignalEvent::DataRead(0x02),
                SignalEvent::Stop,
            ],
        );

        let repeats = txns[0]
            .segments
            .iter()
            .filter(|s| matches!(s, Segment::RepeatedRead))
            .count();
        assert_eq!(repeats, 1);
    }

    #[test]
    fn test_flush_order_read_before_write() {
        // Read bytes reported while the bus is in a write phase still land
        // in the read accumulator; at close the order is fixed:
        // read data, register bytes, write data.
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
                SignalEvent::DataWrite(0x02),
                SignalEvent::DataWrite(0x03),
                SignalEvent::DataRead(0xF0),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        assert_eq!(
            txns[0].segments,
            vec![
                Segment::Address {
                    address: 0x08,
                    direction: Direction::Write,
                    timestamp_ns: None,
                },
                Segment::Data {
                    direction: Direction::Read,
                    bytes: vec![0xF0],
                },
                Segment::Register {
                    bytes: vec![0x01, 0x02],
                },
                Segment::Data {
                    direction: Direction::Write,
                    bytes: vec![0x03],
                },
            ]
        );
    }

    #[test]
    fn test_register_cap_survives_interleaved_addresses() {
        // A second address phase without a close does not reset the
        // register cap: exactly the first two write bytes of the
        // transaction are registers.
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x02),
                SignalEvent::DataWrite(0x03),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        let registers = txns[0]
            .segments
            .iter()
            .find_map(|s| match s {
                Segment::Register { bytes } => Some(bytes.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(registers, vec![0x01, 0x02]);
    }

    #[test]
    fn test_direction_switch_flushes_previous_bytes() {
        // Write data past the register cap, then a read address phase:
        // the pending write bytes become a completed Data segment before
        // the read phase is recorded.
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
                SignalEvent::DataWrite(0x02),
                SignalEvent::DataWrite(0x03),
                SignalEvent::AddressRead(0x11),
                SignalEvent::DataRead(0xF0),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        assert_eq!(
            txns[0].segments,
            vec![
                Segment::Address {
                    address: 0x08,
                    direction: Direction::Write,
                    timestamp_ns: None,
                },
                Segment::Data {
                    direction: Direction::Write,
                    bytes: vec![0x03],
                },
                Segment::Address {
                    address: 0x08,
                    direction: Direction::Read,
                    timestamp_ns: None,
                },
                Segment::Data {
                    direction: Direction::Read,
                    bytes: vec![0xF0],
                },
                Segment::Register {
                    bytes: vec![0x01, 0x02],
                },
            ]
        );
    }

    #[test]
    fn test_one_transaction_per_start() {
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
                SignalEvent::Stop,
                SignalEvent::Start,
                SignalEvent::AddressRead(0x21),
                SignalEvent::DataRead(0x02),
                SignalEvent::Stop,
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x30),
                SignalEvent::DataWrite(0x03),
                SignalEvent::Stop,
            ],
        );
        assert_eq!(txns.len(), 3);
    }

    #[test]
    fn test_start_closes_open_transaction() {
        // No STOP between the two transactions: the second START flushes
        // and emits the first.
        let txns = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
                SignalEvent::Start,
                SignalEvent::AddressRead(0x21),
                SignalEvent::DataRead(0x02),
                SignalEvent::Stop,
            ],
        );
        assert_eq!(txns.len(), 2);
        assert!(txns[0].involves_address(0x08));
        assert!(txns[1].involves_address(0x10));
    }

    #[test]
    fn test_every_emitted_transaction_matches_filter() {
        let config = DecoderConfig::new().with_valid_address(0x08);
        let txns = decode_all(
            config,
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10), // 0x08, matches
                SignalEvent::DataWrite(0x01),
                SignalEvent::Stop,
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x20), // 0x10, mismatch
                SignalEvent::DataWrite(0x02),
                SignalEvent::Stop,
                SignalEvent::Start,
                SignalEvent::AddressRead(0x11), // 0x08, matches
                SignalEvent::DataRead(0x03),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 2);
        for txn in &txns {
            assert!(txn.involves_address(0x08));
        }
    }

    #[test]
    fn test_keep_illegal_operations() {
        // With skip_illegal_operations off, mismatched address phases are
        // still dropped from the output but the transaction survives and
        // keeps its data bytes.
        let config = DecoderConfig::new()
            .with_valid_address(0x08)
            .with_skip_illegal_operations(false);
        let txns = decode_all(
            config,
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x20), // 0x10, mismatch: skipped
                SignalEvent::DataWrite(0x01),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        assert_eq!(
            txns[0].segments,
            vec![Segment::Register { bytes: vec![0x01] }]
        );
    }

    #[test]
    fn test_data_before_matching_address_is_dropped() {
        let config = DecoderConfig::new().with_valid_address(0x08);
        let txns = decode_all(
            config,
            vec![
                SignalEvent::Start,
                SignalEvent::DataWrite(0x99), // not yet eligible: dropped
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        assert_eq!(
            txns[0].segments,
            vec![
                Segment::Address {
                    address: 0x08,
                    direction: Direction::Write,
                    timestamp_ns: None,
                },
                Segment::Register { bytes: vec![0x01] },
            ]
        );
    }

    #[test]
    fn test_empty_transaction_not_emitted() {
        let txns = decode_all(
            DecoderConfig::new(),
            vec![SignalEvent::Start, SignalEvent::Stop, SignalEvent::Start, SignalEvent::Stop],
        );
        assert!(txns.is_empty());
    }

    #[test]
    fn test_implicit_stop_at_end_of_stream() {
        // Stream ends inside an open transaction: it is flushed and
        // emitted, but no STOP marker appears even when markers are on.
        let config = DecoderConfig::new().with_start_stop(true);
        let txns = decode_all(
            config,
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
            ],
        );

        assert_eq!(txns.len(), 1);
        assert!(matches!(txns[0].segments[0], Segment::Start { .. }));
        assert!(!txns[0]
            .segments
            .iter()
            .any(|s| matches!(s, Segment::Stop { .. })));
    }

    #[test]
    fn test_start_stop_markers() {
        let config = DecoderConfig::new().with_start_stop(true);
        let txns = decode_all(
            config,
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(txns.len(), 1);
        assert!(matches!(txns[0].segments.first(), Some(Segment::Start { .. })));
        assert!(matches!(txns[0].segments.last(), Some(Segment::Stop { .. })));
    }

    #[test]
    fn test_timestamps_recorded_when_enabled() {
        let config = DecoderConfig::new().with_timestamps(true);
        let txns = decode_all(
            config,
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::Stop,
            ],
        );

        assert_eq!(
            txns[0].segments,
            vec![Segment::Address {
                address: 0x08,
                direction: Direction::Write,
                timestamp_ns: Some(1.0),
            }]
        );
    }

    #[test]
    fn test_ack_nack_and_noise_ignored() {
        let base = vec![
            SignalEvent::Start,
            SignalEvent::AddressWrite(0x10),
            SignalEvent::DataWrite(0x01),
            SignalEvent::Stop,
        ];
        let noisy = vec![
            SignalEvent::Start,
            SignalEvent::Ack,
            SignalEvent::AddressWrite(0x10),
            SignalEvent::Nack,
            SignalEvent::DataWrite(0x01),
            SignalEvent::Unrecognized,
            SignalEvent::Stop,
        ];

        assert_eq!(
            decode_all(DecoderConfig::new(), base),
            decode_all(DecoderConfig::new(), noisy)
        );
    }

    #[test]
    fn test_malformed_record_does_not_lose_transactions() {
        let mut stream = records(vec![
            SignalEvent::Start,
            SignalEvent::AddressWrite(0x10),
            SignalEvent::DataWrite(0x01),
            SignalEvent::Stop,
        ]);
        stream.insert(2, Err(DecoderError::RecordShape { found: 2 }));
        stream.extend(records(vec![
            SignalEvent::Start,
            SignalEvent::AddressRead(0x21),
            SignalEvent::DataRead(0x02),
            SignalEvent::Stop,
        ]));

        let clean = decode_all(
            DecoderConfig::new(),
            vec![
                SignalEvent::Start,
                SignalEvent::AddressWrite(0x10),
                SignalEvent::DataWrite(0x01),
                SignalEvent::Stop,
                SignalEvent::Start,
                SignalEvent::AddressRead(0x21),
                SignalEvent::DataRead(0x02),
                SignalEvent::Stop,
            ],
        );

        let decoder = Decoder::new(DecoderConfig::new());
        let decoded: Vec<Transaction> = decoder.decode(stream).collect();
        assert_eq!(decoded, clean);
    }

    #[test]
    fn test_diagnostic_sink_receives_skips() {
        let mut stream = records(vec![
            SignalEvent::Start,
            SignalEvent::AddressWrite(0x20), // 0x10, mismatch
            SignalEvent::AddressWrite(0x10), // 0x08, matches
            SignalEvent::Stop,
        ]);
        stream.push(Err(DecoderError::TimestampParse("nan".to_string())));

        let decoder = Decoder::new(DecoderConfig::new().with_valid_address(0x08));
        let mut diagnostics = Vec::new();
        let txns: Vec<Transaction> = decoder
            .decode_with_diagnostics(stream, |d| diagnostics.push(d))
            .collect();

        assert_eq!(txns.len(), 1);
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::AddressMismatch {
                address: 0x10,
                expected: 0x08,
                ..
            }
        ));
        assert!(matches!(
            diagnostics[1],
            Diagnostic::MalformedRecord { .. }
        ));
    }
}
