//! Live decoding tool
//!
//! Opens a serial port carrying an ESP3 byte stream and prints every decoded
//! radio record as a JSON line.
//!
//! Usage:
//!   cargo run --example live_decode -- [--port PATH] [--baud RATE]
//!
//! `--port auto` (the default) picks the first EnOcean gateway found among
//! the enumerated USB serial devices.

use esp3link_core::coordinator::{RecordSink, StreamCoordinator};
use esp3link_core::listener::{SerialListener, SerialListenerConfig, AUTO_PATH, BAUD_RATE};
use esp3link_core::record::RadioRecord;

struct JsonSink;

impl RecordSink for JsonSink {
    fn on_record(&mut self, record: RadioRecord, timestamp_ms: i64) {
        match serde_json::to_string(&record) {
            Ok(json) => println!("{} {}", timestamp_ms, json),
            Err(e) => eprintln!("failed to serialize record: {}", e),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut path = AUTO_PATH.to_string();
    let mut baud_rate = BAUD_RATE;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                i += 1;
                if i < args.len() {
                    path = args[i].clone();
                }
            }
            "--baud" | "-b" => {
                i += 1;
                if i < args.len() {
                    baud_rate = args[i].parse().unwrap_or(BAUD_RATE);
                }
            }
            other => {
                eprintln!("unknown argument: {}", other);
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let config = SerialListenerConfig { path, baud_rate };
    let listener = match SerialListener::open(&config) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("error opening serial port: {}", e);
            std::process::exit(1);
        }
    };

    let mut coordinator = StreamCoordinator::new(Box::new(JsonSink));
    if let Err(e) = listener.run(&mut coordinator).await {
        eprintln!("serial listener failed: {}", e);
        std::process::exit(1);
    }
}
