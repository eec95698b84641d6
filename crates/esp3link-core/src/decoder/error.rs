//! Decoder and transport errors

use thiserror::Error;

/// Errors surfaced by the transport and configuration layer.
///
/// Expected stream conditions (incomplete frames, CRC mismatches, unknown
/// packet types) are normal decode outcomes and never appear here.
#[derive(Error, Debug)]
pub enum EspError {
    /// Serial port open/configure/read failure
    #[error("Serial port error: {0}")]
    Serial(String),

    /// The configured serial path does not exist
    #[error("Port not found: {0}")]
    PortNotFound(String),

    /// Automatic detection found no EnOcean gateway
    #[error("No EnOcean serial device detected")]
    AutoDetectFailed,

    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
