//! Radio ERP1 telegram payload extraction
//!
//! Interprets the data and optional-data segments of a type `0x01` frame and
//! produces a normalized [`RadioRecord`].
//!
//! Data layout: `[choice:1] [...] [transmitterId:4] [status:1]`.
//! Optional-data layout: `[...5 bytes...] [rssiMagnitude:1] [...]`.

use tracing::debug;
use uuid::Uuid;

use crate::record::{IdentifierKind, RadioRecord, Reception};

/// Byte offset of the RSSI magnitude within the optional data.
const RSSI_OFFSET: usize = 5;

/// Smallest data segment that can carry choice, transmitter id and status.
const MIN_DATA_LENGTH: usize = 6;

/// Decode one Radio ERP1 telegram into a record.
///
/// `origin_token` identifies the receiving stream and becomes the record's
/// receiver identity. Returns None when the segments are too short to carry
/// the expected fields; the frame itself was already CRC-validated.
pub(super) fn decode(
    raw_frame: &[u8],
    data: &[u8],
    optional_data: &[u8],
    origin_token: Uuid,
) -> Option<RadioRecord> {
    if data.len() < MIN_DATA_LENGTH || optional_data.len() <= RSSI_OFFSET {
        debug!(
            data_length = data.len(),
            optional_length = optional_data.len(),
            "ERP1 telegram too short to decode"
        );
        return None;
    }

    let choice = data[0];
    let signal_strength_dbm = -(optional_data[RSSI_OFFSET] as i16);

    // Last 4 bytes of data before the trailing status byte
    let id_end = data.len() - 1;
    let mut transmitter_id = [0u8; 4];
    transmitter_id.copy_from_slice(&data[id_end - 4..id_end]);

    // Every sub-telegram choice shares one decoding today; per-choice
    // branches hang off this match.
    match choice {
        _ => {
            let mut record = RadioRecord::new(transmitter_id, IdentifierKind::EurId32);
            record.add_reception(Reception {
                receiver_id: origin_token,
                receiver_id_kind: IdentifierKind::Uuid128,
                signal_strength_dbm,
            });
            record.add_packet(raw_frame.to_vec());
            Some(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Data/optional segments of a captured Radio ERP1 frame
    const DATA: [u8; 15] = [
        0xd2, 0xad, 0x98, 0x00, 0x0c, 0x8c, 0x08, 0xf5, 0x5a, 0x40, 0x04, 0x14, 0x15, 0x59, 0x80,
    ];
    const OPTIONAL: [u8; 7] = [0x01, 0xff, 0xff, 0xff, 0xff, 0x3a, 0x00];

    #[test]
    fn test_decode_captured_telegram() {
        let token = Uuid::new_v4();
        let record = decode(&[0x55, 0xaa], &DATA, &OPTIONAL, token).unwrap();

        assert_eq!(record.transmitter_id, [0x04, 0x14, 0x15, 0x59]);
        assert_eq!(record.transmitter_id_kind, IdentifierKind::EurId32);
        assert_eq!(record.receptions.len(), 1);

        let reception = record.receptions[0];
        assert_eq!(reception.receiver_id, token);
        assert_eq!(reception.receiver_id_kind, IdentifierKind::Uuid128);
        assert_eq!(reception.signal_strength_dbm, -(0x3a as i16));

        assert_eq!(record.raw_packets, vec![vec![0x55, 0xaa]]);
    }

    #[test]
    fn test_signal_strength_is_non_positive() {
        for magnitude in [0u8, 1, 0x3a, 0xff] {
            let mut optional = OPTIONAL;
            optional[RSSI_OFFSET] = magnitude;
            let record = decode(&[], &DATA, &optional, Uuid::new_v4()).unwrap();
            assert!(record.receptions[0].signal_strength_dbm <= 0);
        }
    }

    #[test]
    fn test_short_data_yields_nothing() {
        let record = decode(&[], &DATA[..5], &OPTIONAL, Uuid::new_v4());
        assert!(record.is_none());
    }

    #[test]
    fn test_short_optional_data_yields_nothing() {
        let record = decode(&[], &DATA, &OPTIONAL[..5], Uuid::new_v4());
        assert!(record.is_none());
    }
}
