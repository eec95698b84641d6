//! ESP3 frame boundary detection and validation
//!
//! Scans a [`ByteQueue`] for frame boundaries, validates lengths and both
//! CRC8 checksums, and yields complete packets while leaving any trailing
//! partial frame buffered.
//!
//! Frame format:
//! - 1 byte: sync (`0x55`)
//! - 2 bytes: data length (big-endian)
//! - 1 byte: optional-data length
//! - 1 byte: packet type
//! - 1 byte: CRC8H (over the 4 header bytes)
//! - N bytes: data
//! - M bytes: optional data
//! - 1 byte: CRC8D (over data + optional data)

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::crc8::crc8;
use super::erp1;
use super::queue::ByteQueue;
use super::{HEADER_LENGTH_BYTES, MAX_FRAME_LENGTH_BYTES, PACKET_TYPE_RADIO_ERP1, SYNC_BYTE};
use crate::record::RadioRecord;

/// Classified type of a complete frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketType {
    /// Radio ERP1 telegram (`0x01`), the only interpreted type
    RadioErp1,
    /// Any other packet type, passed through uninterpreted
    Other(u8),
}

impl PacketType {
    fn from_code(code: u8) -> Self {
        if code == PACKET_TYPE_RADIO_ERP1 {
            PacketType::RadioErp1
        } else {
            PacketType::Other(code)
        }
    }

    /// The wire code of this packet type.
    pub fn code(&self) -> u8 {
        match self {
            PacketType::RadioErp1 => PACKET_TYPE_RADIO_ERP1,
            PacketType::Other(code) => *code,
        }
    }

    /// Whether this type has a payload interpretation.
    pub fn is_recognized(&self) -> bool {
        matches!(self, PacketType::RadioErp1)
    }
}

/// A complete, CRC-valid ESP3 frame.
///
/// Constructed per framing attempt and immediately consumed by the caller;
/// never persisted.
#[derive(Debug, Clone)]
pub struct EspPacket {
    /// Classified packet type
    pub packet_type: PacketType,
    /// Data segment of the frame
    pub body: Vec<u8>,
    /// Full on-the-wire frame length, sync byte included
    pub total_length_bytes: usize,
    /// Decoded record, present only for interpreted telegram types
    pub record: Option<RadioRecord>,
}

/// Outcome of a single framing attempt at one sync position.
enum FrameStep {
    /// A complete, CRC-valid frame was extracted
    Complete(EspPacket),
    /// Checksum mismatch or malformed length; drop the sync byte and rescan
    CrcFailed,
    /// Not enough bytes yet; retain the buffer and wait for more data
    Incomplete,
}

/// Decode all complete frames currently buffered in `queue`.
///
/// Returns packets in frame arrival order. Corrupt frames cost only their
/// sync byte, so a valid frame following garbage is still recovered. A
/// trailing partial frame stays buffered for the next call.
pub fn decode(queue: &mut ByteQueue) -> Vec<EspPacket> {
    let mut packets = Vec::new();

    while let Some(frame_start) = queue.index_after_marker(SYNC_BYTE) {
        match decode_frame(queue, frame_start) {
            FrameStep::Incomplete => break,
            FrameStep::Complete(packet) => {
                // frame_start points just past the sync byte
                queue.consume_to(frame_start - 1 + packet.total_length_bytes);
                packets.push(packet);
            }
            FrameStep::CrcFailed => {
                queue.consume_to(frame_start);
            }
        }
    }

    packets
}

/// Attempt to frame one packet starting at `frame_start` (the index just past
/// the sync byte).
fn decode_frame(queue: &ByteQueue, frame_start: usize) -> FrameStep {
    let buf = queue.as_slice();
    let available = buf.len() - frame_start;

    if available < HEADER_LENGTH_BYTES {
        return FrameStep::Incomplete;
    }

    let header = &buf[frame_start..frame_start + HEADER_LENGTH_BYTES];
    let data_length = BigEndian::read_u16(&header[0..2]) as usize;
    let optional_length = header[2] as usize;
    let packet_type = header[3];

    // header + CRC8H + data + optional data + CRC8D, sync byte excluded
    let body_length = HEADER_LENGTH_BYTES + 1 + data_length + optional_length + 1;

    if data_length == 0 || body_length > MAX_FRAME_LENGTH_BYTES {
        warn!(
            "implausible declared frame length (data {}, optional {}), resynchronizing",
            data_length, optional_length
        );
        return FrameStep::CrcFailed;
    }

    if available < body_length {
        trace!(
            "partial frame: {} of {} bytes buffered, waiting for more data",
            available, body_length
        );
        return FrameStep::Incomplete;
    }

    let stored_crc8h = buf[frame_start + HEADER_LENGTH_BYTES];
    let computed_crc8h = crc8(header);
    if computed_crc8h != stored_crc8h {
        warn!(
            "header CRC mismatch: stored {:#04x}, computed {:#04x}; resynchronizing",
            stored_crc8h, computed_crc8h
        );
        return FrameStep::CrcFailed;
    }

    let data_start = frame_start + HEADER_LENGTH_BYTES + 1;
    let data_end = data_start + data_length;
    let optional_end = data_end + optional_length;

    let stored_crc8d = buf[optional_end];
    let computed_crc8d = crc8(&buf[data_start..optional_end]);
    if computed_crc8d != stored_crc8d {
        warn!(
            "data CRC mismatch: stored {:#04x}, computed {:#04x}; resynchronizing",
            stored_crc8d, computed_crc8d
        );
        return FrameStep::CrcFailed;
    }

    let data = &buf[data_start..data_end];
    let optional_data = &buf[data_end..optional_end];
    let raw_frame = &buf[frame_start - 1..frame_start + body_length];

    let record = if packet_type == PACKET_TYPE_RADIO_ERP1 {
        erp1::decode(raw_frame, data, optional_data, queue.origin_token())
    } else {
        debug!(
            "unrecognized packet type {:#04x} ({} bytes), passing through",
            packet_type,
            body_length + 1
        );
        None
    };

    FrameStep::Complete(EspPacket {
        packet_type: PacketType::from_code(packet_type),
        body: data.to_vec(),
        total_length_bytes: body_length + 1,
        record,
    })
}

/// Build a well-formed frame around the given segments, computing both CRCs.
///
/// The inverse of [`decode`], used by the demo listener and by tests.
pub fn encode_frame(packet_type: u8, data: &[u8], optional_data: &[u8]) -> Vec<u8> {
    let mut header = [0u8; HEADER_LENGTH_BYTES];
    BigEndian::write_u16(&mut header[0..2], data.len() as u16);
    header[2] = optional_data.len() as u8;
    header[3] = packet_type;

    let mut frame =
        Vec::with_capacity(1 + HEADER_LENGTH_BYTES + 1 + data.len() + optional_data.len() + 1);
    frame.push(SYNC_BYTE);
    frame.extend_from_slice(&header);
    frame.push(crc8(&header));
    frame.extend_from_slice(data);
    frame.extend_from_slice(optional_data);

    let mut segments = Vec::with_capacity(data.len() + optional_data.len());
    segments.extend_from_slice(data);
    segments.extend_from_slice(optional_data);
    frame.push(crc8(&segments));

    frame
}
