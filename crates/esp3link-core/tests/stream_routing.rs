//! Coordinator-level properties: chunk routing, origin isolation, fan-out.

use std::sync::{Arc, Mutex};

use esp3link_core::coordinator::{CoordinatorConfig, RecordSink, StreamCoordinator};
use esp3link_core::decoder::encode_frame;
use esp3link_core::record::RadioRecord;
use pretty_assertions::assert_eq;

/// Sink that records everything it receives.
#[derive(Clone, Default)]
struct VecSink {
    records: Arc<Mutex<Vec<(RadioRecord, i64)>>>,
}

impl VecSink {
    fn taken(&self) -> Vec<(RadioRecord, i64)> {
        self.records.lock().unwrap().clone()
    }
}

impl RecordSink for VecSink {
    fn on_record(&mut self, record: RadioRecord, timestamp_ms: i64) {
        self.records.lock().unwrap().push((record, timestamp_ms));
    }
}

/// Receiver-independent fingerprint of a record, for comparisons across
/// coordinator instances whose origin tokens necessarily differ.
type Fingerprint = ([u8; 4], i16, Vec<Vec<u8>>);

fn fingerprint(record: &RadioRecord) -> Fingerprint {
    (
        record.transmitter_id,
        record.receptions[0].signal_strength_dbm,
        record.raw_packets.clone(),
    )
}

fn sample_stream() -> Vec<u8> {
    let mut stream = Vec::new();
    stream.extend(encode_frame(
        0x01,
        &[0xf6, 0x10, 0x20, 0x30, 0x04, 0x14, 0x15, 0x59, 0x30],
        &[0x00, 0x01, 0x02, 0x03, 0x04, 0x41, 0x00],
    ));
    // An unrecognized frame in the middle must not disturb its neighbours
    stream.extend(encode_frame(0x04, &[0xaa, 0xbb, 0xcc], &[]));
    stream.extend(encode_frame(
        0x01,
        &[0xd2, 0x01, 0x02, 0x03, 0x04, 0x05, 0xde, 0xad, 0xbe, 0xef, 0x00],
        &[0x01, 0xff, 0xff, 0xff, 0xff, 0x50, 0x00],
    ));
    stream
}

fn decode_chunked(stream: &[u8], chunk_size: usize) -> Vec<Fingerprint> {
    let sink = VecSink::default();
    let mut coordinator = StreamCoordinator::new(Box::new(sink.clone()));
    for chunk in stream.chunks(chunk_size) {
        coordinator.on_data("test", 0, chunk);
    }
    sink.taken().iter().map(|(r, _)| fingerprint(r)).collect()
}

#[test]
fn test_chunk_size_invariance() {
    let stream = sample_stream();
    let whole = decode_chunked(&stream, stream.len());
    assert_eq!(whole.len(), 2);

    for chunk_size in [1, 2, 3, 5, 8, 13, stream.len() - 1] {
        assert_eq!(decode_chunked(&stream, chunk_size), whole);
    }
}

#[test]
fn test_timestamps_follow_the_delivering_chunk() {
    let sink = VecSink::default();
    let mut coordinator = StreamCoordinator::new(Box::new(sink.clone()));

    let frame = encode_frame(
        0x01,
        &[0xa5, 0x00, 0x00, 0x00, 0x04, 0x14, 0x15, 0x59, 0x00],
        &[0x00, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00],
    );

    // The record is forwarded with the timestamp of the chunk that completed
    // the frame
    coordinator.on_data("origin", 100, &frame[..10]);
    coordinator.on_data("origin", 200, &frame[10..]);

    let records = sink.taken();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1, 200);
}

#[test]
fn test_distinct_origins_have_distinct_receiver_tokens() {
    let sink = VecSink::default();
    let mut coordinator = StreamCoordinator::new(Box::new(sink.clone()));
    let stream = sample_stream();

    coordinator.on_data("/dev/ttyUSB0", 1, &stream);
    coordinator.on_data("/dev/ttyUSB1", 2, &stream);

    let records = sink.taken();
    assert_eq!(records.len(), 4);
    assert_eq!(coordinator.origin_count(), 2);

    let first_token = records[0].0.receptions[0].receiver_id;
    let second_token = records[2].0.receptions[0].receiver_id;
    assert_eq!(records[1].0.receptions[0].receiver_id, first_token);
    assert_eq!(records[3].0.receptions[0].receiver_id, second_token);
    assert_ne!(first_token, second_token);
}

#[test]
fn test_pending_buffer_cap_keeps_origin_usable() {
    let sink = VecSink::default();
    let config = CoordinatorConfig {
        max_pending_bytes: 24,
    };
    let mut coordinator = StreamCoordinator::with_config(config, Box::new(sink.clone()));

    // A stuck partial frame claiming more data than will ever arrive
    coordinator.on_data("flaky", 0, &[0x55, 0x10, 0x00, 0x07, 0x01]);
    coordinator.on_data("flaky", 1, &[0x00; 32]);
    assert_eq!(coordinator.pending_bytes("flaky"), Some(0));

    let stream = sample_stream();
    coordinator.on_data("flaky", 2, &stream);
    assert_eq!(sink.taken().len(), 2);
}
