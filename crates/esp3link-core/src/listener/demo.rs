//! Demo mode - synthetic telegram generator
//!
//! Feeds the coordinator a steady stream of well-formed Radio ERP1 frames
//! for testing the pipeline without a physical receiver attached. The
//! telegram body replays a captured transmission with a jittered signal
//! strength.

use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time;
use tracing::info;

use crate::coordinator::StreamCoordinator;
use crate::decoder::{encode_frame, PACKET_TYPE_RADIO_ERP1};

/// Origin identifier reported for generated telegrams
pub const DEMO_ORIGIN: &str = "demo";

const DEFAULT_PERIOD_MS: u64 = 1000;

/// Data segment of the simulated telegram: choice, payload, transmitter id,
/// status byte.
const DEMO_DATA: [u8; 15] = [
    0xd2, 0xad, 0x98, 0x00, 0x0c, 0x8c, 0x08, 0xf5, 0x5a, 0x40, 0x04, 0x14, 0x15, 0x59, 0x80,
];

/// Optional-data template; byte 5 is the RSSI magnitude, rewritten per tick.
const DEMO_OPTIONAL: [u8; 7] = [0x01, 0xff, 0xff, 0xff, 0xff, 0x3a, 0x00];

/// Demo listener configuration.
#[derive(Debug, Clone)]
pub struct DemoListenerConfig {
    /// Interval between generated telegrams
    pub period: Duration,
}

impl Default for DemoListenerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(DEFAULT_PERIOD_MS),
        }
    }
}

/// Provides a consistent stream of artificially generated ESP3 telegrams.
pub struct DemoListener {
    period: Duration,
    rng: StdRng,
}

impl DemoListener {
    /// Create a demo listener.
    pub fn new(config: DemoListenerConfig) -> Self {
        Self {
            period: config.period,
            rng: StdRng::from_entropy(),
        }
    }

    /// Emit one telegram per period, forever.
    pub async fn run(mut self, coordinator: &mut StreamCoordinator) {
        info!(
            "demo listener emitting a telegram every {} ms",
            self.period.as_millis()
        );
        let mut interval = time::interval(self.period);
        loop {
            interval.tick().await;
            let frame = self.next_frame();
            coordinator.on_data(DEMO_ORIGIN, Utc::now().timestamp_millis(), &frame);
        }
    }

    /// Build the next simulated frame with a jittered signal strength.
    fn next_frame(&mut self) -> Vec<u8> {
        let mut optional = DEMO_OPTIONAL;
        // Magnitudes of -40 to -90 dBm, a plausible indoor range
        optional[5] = self.rng.gen_range(40..=90);
        encode_frame(PACKET_TYPE_RADIO_ERP1, &DEMO_DATA, &optional)
    }
}

impl Default for DemoListener {
    fn default() -> Self {
        Self::new(DemoListenerConfig::default())
    }
}
