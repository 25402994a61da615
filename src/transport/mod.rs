//! # Printer Transport Layer
//!
//! Byte sinks a [`Printer`](crate::printer::Printer) can write to. Any
//! [`std::io::Write`] works (a `Vec<u8>`, a `File`, stdout); the types here
//! add printer-specific setup.
//!
//! ## Available Transports
//!
//! - [`device`]: Character devices (`/dev/usb/lp0`, serial TTYs, rfcomm)
//! - [`network`]: Raw TCP printing on port 9100
//!
//! [`connect`] picks one by [`ConnectionKind`] and opens a session on it.

pub mod device;
pub mod network;

pub use device::DeviceTransport;
pub use network::NetworkTransport;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use log::info;

use crate::error::EscPosError;
use crate::printer::{Printer, PrinterConfig};

/// How a printer is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Character device path
    Usb,
    /// `host[:port]`
    Network,
}

impl FromStr for ConnectionKind {
    type Err = EscPosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usb" | "device" => Ok(Self::Usb),
            "network" | "tcp" => Ok(Self::Network),
            _ => Err(EscPosError::InvalidParameter {
                name: "connection".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usb => write!(f, "usb"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// Open `target` and start a session on it.
///
/// ```no_run
/// use escpos::printer::PrinterConfig;
/// use escpos::transport::{self, ConnectionKind};
///
/// let printer = transport::connect(
///     ConnectionKind::Network,
///     "192.168.1.50",
///     PrinterConfig::default(),
/// )?;
/// printer.init()?;
/// # Ok::<(), escpos::EscPosError>(())
/// ```
pub fn connect(
    kind: ConnectionKind,
    target: &str,
    config: PrinterConfig,
) -> Result<Printer<Box<dyn Write + Send>>, EscPosError> {
    info!("connecting to {} printer at {}", kind, target);
    let sink: Box<dyn Write + Send> = match kind {
        ConnectionKind::Usb => Box::new(DeviceTransport::open(target)?),
        ConnectionKind::Network => Box::new(NetworkTransport::connect(target)?),
    };
    Printer::with_config(sink, config)
}
