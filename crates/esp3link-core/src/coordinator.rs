//! Per-origin stream coordination
//!
//! Owns one [`ByteQueue`] per data-stream origin, routes incoming chunks to
//! the matching queue, runs the frame decoder, and forwards decoded radio
//! records to the downstream sink.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::decoder::{decode, ByteQueue};
use crate::record::RadioRecord;

/// Default pending-byte limit per origin before the queue is flushed.
pub const DEFAULT_MAX_PENDING_BYTES: usize = 64 * 1024;

/// Downstream consumer of decoded radio records.
pub trait RecordSink {
    /// Called once per fully decoded and recognized telegram.
    fn on_record(&mut self, record: RadioRecord, timestamp_ms: i64);
}

/// Coordinator configuration.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Pending bytes allowed per origin without a complete frame before the
    /// queue is flushed; bounds memory under a noisy or misbehaving source
    pub max_pending_bytes: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_pending_bytes: DEFAULT_MAX_PENDING_BYTES,
        }
    }
}

/// Routes chunks from any number of stream origins through the decoder.
///
/// Each `on_data` call runs the full decode loop synchronously to completion;
/// per-origin state is only ever touched by the calling context.
pub struct StreamCoordinator {
    queues_by_origin: HashMap<String, ByteQueue>,
    sink: Box<dyn RecordSink + Send>,
    config: CoordinatorConfig,
}

impl StreamCoordinator {
    /// Create a coordinator with default configuration.
    pub fn new(sink: Box<dyn RecordSink + Send>) -> Self {
        Self::with_config(CoordinatorConfig::default(), sink)
    }

    /// Create a coordinator with explicit configuration.
    pub fn with_config(config: CoordinatorConfig, sink: Box<dyn RecordSink + Send>) -> Self {
        Self {
            queues_by_origin: HashMap::new(),
            sink,
            config,
        }
    }

    /// Handle a chunk of stream data from the given origin.
    ///
    /// Looks up or lazily creates the origin's queue, appends the chunk, and
    /// decodes. Every record-bearing packet is forwarded to the sink with the
    /// chunk's capture timestamp; passthrough packets are dropped.
    pub fn on_data(&mut self, origin: &str, timestamp_ms: i64, chunk: &[u8]) {
        let queue = self
            .queues_by_origin
            .entry(origin.to_string())
            .or_insert_with(ByteQueue::new);
        queue.append(chunk);

        let packets = decode(queue);

        if packets.is_empty() && queue.len() > self.config.max_pending_bytes {
            warn!(
                "origin {} exceeded {} pending bytes without a complete frame, flushing",
                origin, self.config.max_pending_bytes
            );
            queue.clear();
        }

        for packet in packets {
            match packet.record {
                Some(record) => self.sink.on_record(record, timestamp_ms),
                None => debug!(
                    "dropping {} byte passthrough packet from {}",
                    packet.total_length_bytes, origin
                ),
            }
        }
    }

    /// Number of distinct origins seen so far.
    pub fn origin_count(&self) -> usize {
        self.queues_by_origin.len()
    }

    /// Bytes currently buffered for `origin`, if it has been seen.
    pub fn pending_bytes(&self, origin: &str) -> Option<usize> {
        self.queues_by_origin.get(origin).map(|q| q.len())
    }
}
