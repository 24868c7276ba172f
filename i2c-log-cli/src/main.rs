//! I2C Log Decoder CLI Application
//!
//! This is the command-line interface for the I2C trace decoder.
//! It uses the i2c-log-decoder library and adds:
//! - Argument parsing and an optional TOML configuration file
//! - Output file writing (text or JSON)
//! - Logging setup and a run summary

use anyhow::{Context, Result};
use clap::Parser;
use i2c_log_decoder::{
    render_transactions, CsvTraceReader, Decoder, DecoderConfig, Transaction,
};
use std::path::PathBuf;

mod config;

use config::OutputFormat;

/// I2C Log Decoder - Reconstruct I2C transactions from analyzer traces
#[derive(Parser, Debug)]
#[command(name = "i2c-log-cli")]
#[command(about = "Decode logic-analyzer I2C trace exports (CSV)", long_about = None)]
#[command(version)]
struct Args {
    /// Path to CSV trace export to decode
    #[arg(short, long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Output file for decoded transactions (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only keep operations addressed to this 7-bit device address
    /// (hex with 0x prefix, or decimal)
    #[arg(short, long, value_name = "ADDR", value_parser = parse_address)]
    address: Option<u8>,

    /// Prefix markers and address phases with the capture timestamp
    #[arg(long)]
    timestamps: bool,

    /// Include START/STOP markers in the output
    #[arg(long)]
    start_stop: bool,

    /// Keep transactions that never address the filtered device
    #[arg(long)]
    keep_illegal: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to configuration file (config.toml), alternative to flags
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Parse a 7-bit device address, accepting a 0x prefix
fn parse_address(value: &str) -> std::result::Result<u8, String> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    let address = parsed.map_err(|_| format!("invalid address: {}", value))?;
    if address > 0x7F {
        return Err(format!("address 0x{:x} does not fit in 7 bits", address));
    }
    Ok(address)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("I2C Log Decoder CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", i2c_log_decoder::VERSION);

    if let Some(log_path) = &args.log {
        // Flag mode: build the decoder configuration from arguments
        let mut decode = DecoderConfig::new()
            .with_timestamps(args.timestamps)
            .with_start_stop(args.start_stop)
            .with_skip_illegal_operations(!args.keep_illegal);
        if let Some(address) = args.address {
            decode = decode.with_valid_address(address);
        }

        run_decode(log_path, &decode, args.output.as_deref(), args.format)
    } else if let Some(config_path) = &args.config {
        // Config mode: everything comes from the TOML file
        log::info!("Loading configuration from: {:?}", config_path);
        let app = config::load_config(config_path)?;

        run_decode(
            &app.input.file,
            &app.decode,
            app.output.file.as_deref(),
            app.output.format,
        )
    } else {
        // No arguments - show help
        println!("I2C Log Decoder - No input specified");
        println!("\nQuick Start:");
        println!("  i2c-log-cli --log capture.csv");
        println!("  i2c-log-cli --log capture.csv --address 0x50 --start-stop");
        println!("\nFor a reusable setup:");
        println!("  i2c-log-cli --config config.toml");
        println!("\nUse --help for more options");
        Ok(())
    }
}

/// Decode one trace file and write the rendered transactions
fn run_decode(
    log_path: &std::path::Path,
    decode: &DecoderConfig,
    output: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<()> {
    let records = CsvTraceReader::open(log_path)
        .with_context(|| format!("Failed to open trace file {:?}", log_path))?;

    let decoder = Decoder::new(decode.clone());
    let mut skipped = 0usize;
    let transactions: Vec<Transaction> = decoder
        .decode_with_diagnostics(records, |diagnostic| {
            skipped += 1;
            log::warn!("{}", diagnostic);
        })
        .collect();

    if transactions.is_empty() {
        // Best-effort decoding: no decodable data is a result, not an error
        log::warn!("No I2C transactions could be decoded from {:?}", log_path);
    }
    log::info!(
        "Decoded {} transactions ({} records skipped)",
        transactions.len(),
        skipped
    );

    let rendered = match format {
        OutputFormat::Text => render_transactions(&transactions),
        OutputFormat::Json => serde_json::to_string_pretty(&transactions)
            .context("Failed to serialize transactions")?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file {:?}", path))?;
            log::info!("Decoded transactions saved to {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
