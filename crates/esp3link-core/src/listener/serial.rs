//! Serial transport for EnOcean receivers
//!
//! Opens the serial port carrying an ESP3 byte stream (explicit path or
//! automatic detection by USB manufacturer) and feeds received chunks into
//! the stream coordinator.

use chrono::Utc;
use serialport::SerialPortType;
use tokio::io::AsyncReadExt;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{info, warn};

use crate::coordinator::StreamCoordinator;
use crate::decoder::EspError;

/// Baud rate used by ESP3 gateways
pub const BAUD_RATE: u32 = 57600;

/// Config value requesting automatic port detection
pub const AUTO_PATH: &str = "auto";

/// USB manufacturer string reported by EnOcean gateways
const AUTO_MANUFACTURER: &str = "EnOcean GmbH";

const READ_BUFFER_SIZE: usize = 1024;

/// Serial listener configuration.
#[derive(Debug, Clone)]
pub struct SerialListenerConfig {
    /// Serial device path, or [`AUTO_PATH`] to detect an EnOcean gateway
    pub path: String,
    /// Baud rate
    pub baud_rate: u32,
}

impl Default for SerialListenerConfig {
    fn default() -> Self {
        Self {
            path: AUTO_PATH.to_string(),
            baud_rate: BAUD_RATE,
        }
    }
}

/// Listens for ESP3 data on a serial port.
pub struct SerialListener {
    port: SerialStream,
    path: String,
}

impl SerialListener {
    /// Open the configured serial port with 8N1 framing.
    pub fn open(config: &SerialListenerConfig) -> Result<Self, EspError> {
        let path = if config.path == AUTO_PATH {
            detect_port()?
        } else {
            config.path.clone()
        };

        let port = tokio_serial::new(path.as_str(), config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open_native_async()
            .map_err(|e| match e.kind {
                serialport::ErrorKind::NoDevice => EspError::PortNotFound(path.clone()),
                _ => EspError::Serial(e.to_string()),
            })?;

        info!("serial port {} opened at {} baud", path, config.baud_rate);
        Ok(Self { port, path })
    }

    /// Path of the opened serial device.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Read chunks until the port closes or fails.
    ///
    /// Every chunk is stamped with the capture time and handed to the
    /// coordinator, keyed by the port path. Transport failures are returned
    /// to the caller; the coordinator's decode state stays intact either way.
    pub async fn run(mut self, coordinator: &mut StreamCoordinator) -> Result<(), EspError> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        loop {
            match self.port.read(&mut buffer).await {
                Ok(0) => {
                    info!("serial port {} closed", self.path);
                    return Ok(());
                }
                Ok(n) => {
                    coordinator.on_data(&self.path, Utc::now().timestamp_millis(), &buffer[..n]);
                }
                Err(e) => {
                    warn!("serial port {} read error: {}", self.path, e);
                    return Err(EspError::Io(e));
                }
            }
        }
    }
}

/// Pick the first enumerated port whose USB manufacturer matches an EnOcean
/// gateway.
fn detect_port() -> Result<String, EspError> {
    let ports = serialport::available_ports().map_err(|e| EspError::Serial(e.to_string()))?;

    for info in &ports {
        if let SerialPortType::UsbPort(usb) = &info.port_type {
            if usb.manufacturer.as_deref() == Some(AUTO_MANUFACTURER) {
                info!("auto-detected EnOcean gateway at {}", info.port_name);
                return Ok(info.port_name.clone());
            }
            if let Some(manufacturer) = &usb.manufacturer {
                info!(
                    "alternate serial path {} is a {} device",
                    info.port_name, manufacturer
                );
            }
        }
    }

    Err(EspError::AutoDetectFailed)
}
