//! Normalized radio decoding records
//!
//! The output data model handed to the downstream aggregation layer: one
//! [`RadioRecord`] per decoded wireless reception event.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a transmitter or receiver identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// 32-bit EnOcean Unique Radio Identifier
    EurId32,
    /// 128-bit UUID standing in for an unaddressable receiver
    Uuid128,
    /// Identifier of unknown provenance
    Unknown,
}

/// A single reception of a telegram by one receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reception {
    /// Identity token of the receiving stream origin
    pub receiver_id: Uuid,
    /// Kind of the receiver identifier
    pub receiver_id_kind: IdentifierKind,
    /// Received signal strength in dBm; always non-positive
    pub signal_strength_dbm: i16,
}

/// One decoded wireless reception event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioRecord {
    /// Identifier of the transmitting device
    pub transmitter_id: [u8; 4],
    /// Kind of the transmitter identifier
    pub transmitter_id_kind: IdentifierKind,
    /// Receptions of this telegram, in arrival order; never empty once built
    pub receptions: Vec<Reception>,
    /// Raw frame byte-sequences carrying this telegram, deduplicated
    pub raw_packets: Vec<Vec<u8>>,
}

impl RadioRecord {
    /// Create a record with no receptions or raw packets yet.
    pub fn new(transmitter_id: [u8; 4], transmitter_id_kind: IdentifierKind) -> Self {
        Self {
            transmitter_id,
            transmitter_id_kind,
            receptions: Vec::new(),
            raw_packets: Vec::new(),
        }
    }

    /// Append a reception entry.
    pub fn add_reception(&mut self, reception: Reception) {
        self.receptions.push(reception);
    }

    /// Add a raw frame byte-sequence, keeping set semantics.
    pub fn add_packet(&mut self, raw: Vec<u8>) {
        if !self.raw_packets.contains(&raw) {
            self.raw_packets.push(raw);
        }
    }

    /// Transmitter identifier as a lowercase hex string.
    pub fn transmitter_id_hex(&self) -> String {
        self.transmitter_id
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
