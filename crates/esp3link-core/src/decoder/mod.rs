//! ESP3 stream decoding
//!
//! Implements the EnOcean Serial Protocol (ESP3) framing layer: a per-origin
//! byte queue, the frame-boundary/length state machine with CRC8 validation,
//! and payload extraction for Radio ERP1 telegrams.

mod crc8;
mod erp1;
mod error;
mod frame;
mod queue;

pub use crc8::crc8;
pub use error::EspError;
pub use frame::{decode, encode_frame, EspPacket, PacketType};
pub use queue::ByteQueue;

/// Byte marking the start of every ESP3 frame
pub const SYNC_BYTE: u8 = 0x55;

/// Header length in bytes: data length (2), optional length (1), type (1)
pub const HEADER_LENGTH_BYTES: usize = 4;

/// Packet type code for Radio ERP1, the only interpreted telegram type
pub const PACKET_TYPE_RADIO_ERP1: u8 = 0x01;

/// Upper bound on a plausible frame body; larger declared lengths are
/// treated as stream corruption
pub const MAX_FRAME_LENGTH_BYTES: usize = 8192;
