//! Data-stream listeners
//!
//! Boundary collaborators that feed byte streams into the coordinator: a
//! serial-port listener for physical EnOcean receivers and a demo listener
//! that synthesizes telegrams on a timer.

mod demo;
mod serial;

pub use demo::{DemoListener, DemoListenerConfig, DEMO_ORIGIN};
pub use serial::{SerialListener, SerialListenerConfig, AUTO_PATH, BAUD_RATE};
