//! Per-origin byte queue
//!
//! Accumulates not-yet-consumed stream bytes for a single origin. The buffer
//! always holds exactly the unconsumed suffix of everything appended; it only
//! shrinks through explicit consumption after a frame is accepted or
//! discarded.

use bytes::{Buf, BytesMut};
use uuid::Uuid;

/// Initial buffer capacity, sized for typical serial read chunks.
const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Accumulating buffer of unconsumed stream bytes for one origin.
///
/// Each queue carries an origin-scoped identity token, generated once at
/// construction. It stands in for a receiver identity when the physical
/// receiver address is unknown.
#[derive(Debug)]
pub struct ByteQueue {
    buffer: BytesMut,
    origin_token: Uuid,
}

impl ByteQueue {
    /// Create an empty queue with a fresh origin token.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            origin_token: Uuid::new_v4(),
        }
    }

    /// Create a queue seeded with an initial chunk.
    pub fn with_data(data: &[u8]) -> Self {
        let mut queue = Self::new();
        queue.append(data);
        queue
    }

    /// Concatenate `data` to the buffer.
    pub fn append(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Drop bytes `[0, index)` from the buffer.
    pub fn consume_to(&mut self, index: usize) {
        let n = index.min(self.buffer.len());
        self.buffer.advance(n);
    }

    /// Drop all buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Index immediately following the first occurrence of `marker`, if any.
    pub fn index_after_marker(&self, marker: u8) -> Option<usize> {
        self.buffer.iter().position(|&b| b == marker).map(|i| i + 1)
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// View of the buffered bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// The queue's origin-scoped identity token.
    pub fn origin_token(&self) -> Uuid {
        self.origin_token
    }
}

impl Default for ByteQueue {
    fn default() -> Self {
        Self::new()
    }
}
