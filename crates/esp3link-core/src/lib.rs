//! # esp3link Core Library
//!
//! Core functionality for decoding EnOcean Serial Protocol (ESP3) byte
//! streams into normalized radio decoding records.

#![warn(missing_docs)]

//!
//! This library provides:
//! - Streaming ESP3 frame decoding with CRC8 validation
//! - Radio ERP1 telegram payload extraction
//! - Per-origin stream coordination and record fan-out
//! - Serial-port and demo-mode listeners
//!
//! ## Example
//!
//! ```rust,ignore
//! use esp3link_core::coordinator::{RecordSink, StreamCoordinator};
//! use esp3link_core::listener::{SerialListener, SerialListenerConfig};
//! use esp3link_core::record::RadioRecord;
//!
//! struct PrintSink;
//!
//! impl RecordSink for PrintSink {
//!     fn on_record(&mut self, record: RadioRecord, timestamp_ms: i64) {
//!         println!("{} {}", timestamp_ms, record.transmitter_id_hex());
//!     }
//! }
//!
//! let mut coordinator = StreamCoordinator::new(Box::new(PrintSink));
//! let listener = SerialListener::open(&SerialListenerConfig::default())?;
//! listener.run(&mut coordinator).await?;
//! ```

pub mod coordinator;
pub mod decoder;
pub mod listener;
pub mod record;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::coordinator::{CoordinatorConfig, RecordSink, StreamCoordinator};
    pub use crate::decoder::{
        crc8, decode, encode_frame, ByteQueue, EspError, EspPacket, PacketType,
    };
    pub use crate::listener::{
        DemoListener, DemoListenerConfig, SerialListener, SerialListenerConfig,
    };
    pub use crate::record::{IdentifierKind, RadioRecord, Reception};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
