//! Standalone trace decoder tool
//!
//! Decodes a logic-analyzer CSV export and prints the reconstructed
//! transactions together with a short summary.
//!
//! Usage:
//!   decode_trace <capture.csv> [--address <addr>] [--timestamps] [--start-stop]
//!
//! Example:
//!   decode_trace capture.csv --address 0x50 --start-stop

use i2c_log_decoder::{render_transactions, Decoder, DecoderConfig, Segment};
use std::env;

fn main() {
    env_logger::init();

    let mut trace_path = None;
    let mut config = DecoderConfig::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--address" => {
                let value = args.next().expect("--address requires a value");
                let digits = value.strip_prefix("0x").unwrap_or(&value);
                let address = u8::from_str_radix(digits, 16).expect("invalid address");
                config = config.with_valid_address(address);
            }
            "--timestamps" => config = config.with_timestamps(true),
            "--start-stop" => config = config.with_start_stop(true),
            _ => trace_path = Some(arg),
        }
    }

    let trace_path = trace_path.unwrap_or_else(|| {
        eprintln!("Usage: decode_trace <capture.csv> [--address <addr>] [--timestamps] [--start-stop]");
        std::process::exit(1);
    });

    let decoder = Decoder::new(config);
    let transactions = match decoder.decode_file(trace_path.as_ref()) {
        Ok(transactions) => transactions,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", render_transactions(&transactions));

    let address_phases: usize = transactions
        .iter()
        .flat_map(|t| t.segments.iter())
        .filter(|s| matches!(s, Segment::Address { .. }))
        .count();
    let data_bytes: usize = transactions
        .iter()
        .flat_map(|t| t.segments.iter())
        .map(|s| match s {
            Segment::Data { bytes, .. } | Segment::Register { bytes } => bytes.len(),
            _ => 0,
        })
        .sum();

    println!("\n=== DECODING SUMMARY ===");
    println!("Transactions: {}", transactions.len());
    println!("Address phases: {}", address_phases);
    println!("Register/data bytes: {}", data_bytes);
}
