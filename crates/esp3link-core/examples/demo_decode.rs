//! Demo decoding tool
//!
//! Runs the synthetic telegram generator through the full decode pipeline
//! and prints every record as a JSON line.
//!
//! Usage:
//!   cargo run --example demo_decode -- [--period MS]

use std::time::Duration;

use esp3link_core::coordinator::{RecordSink, StreamCoordinator};
use esp3link_core::listener::{DemoListener, DemoListenerConfig};
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
    let mut period_ms = 1000u64;

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--period" {
            i += 1;
            if i < args.len() {
                period_ms = args[i].parse().unwrap_or(1000);
            }
        }
        i += 1;
    }

    let mut coordinator = StreamCoordinator::new(Box::new(JsonSink));
    let listener = DemoListener::new(DemoListenerConfig {
        period: Duration::from_millis(period_ms),
    });
    listener.run(&mut coordinator).await;
}
