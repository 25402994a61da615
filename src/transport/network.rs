//! # TCP Transport
//!
//! Network printers accept raw ESC/POS on TCP port 9100 ("JetDirect" /
//! raw printing). The connection is dialed with a timeout; after that every
//! write blocks until the kernel accepts the bytes or the write timeout
//! expires.

use std::io::{self, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

use crate::error::EscPosError;

/// Raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Dial timeout used by [`NetworkTransport::connect`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// # TCP Printer Transport
///
/// ```no_run
/// use escpos::printer::Printer;
/// use escpos::transport::NetworkTransport;
///
/// let stream = NetworkTransport::connect("192.168.1.50:9100")?;
/// let printer = Printer::new(stream);
/// printer.init()?;
/// # Ok::<(), escpos::EscPosError>(())
/// ```
#[derive(Debug)]
pub struct NetworkTransport {
    stream: TcpStream,
}

impl NetworkTransport {
    /// Connect with [`DEFAULT_TIMEOUT`]. A bare host gets port 9100.
    pub fn connect(address: &str) -> Result<Self, EscPosError> {
        Self::connect_timeout(address, DEFAULT_TIMEOUT)
    }

    /// Connect, trying each resolved address with `timeout`.
    ///
    /// The same `timeout` is applied to subsequent writes.
    pub fn connect_timeout(address: &str, timeout: Duration) -> Result<Self, EscPosError> {
        let address = with_default_port(address);
        let candidates = address
            .to_socket_addrs()
            .map_err(|e| EscPosError::Transport(format!("Failed to resolve {}: {}", address, e)))?;

        let mut last_error = None;
        for candidate in candidates {
            debug!("dialing {}", candidate);
            match TcpStream::connect_timeout(&candidate, timeout) {
                Ok(stream) => {
                    stream.set_write_timeout(Some(timeout))?;
                    stream.set_nodelay(true)?;
                    return Ok(Self { stream });
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(EscPosError::Transport(match last_error {
            Some(e) => format!("Failed to connect to {}: {}", address, e),
            None => format!("No addresses found for {}", address),
        }))
    }
}

impl Write for NetworkTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

/// Append `:9100` unless the address already names a port.
fn with_default_port(address: &str) -> String {
    let has_port = match address.rsplit_once(':') {
        // bracketed IPv6 literal: "[::1]:9100" vs "[::1]"
        _ if address.starts_with('[') => address.contains("]:"),
        Some((host, port)) => !host.contains(':') && port.parse::<u16>().is_ok(),
        None => false,
    };
    if has_port {
        address.to_string()
    } else if address.contains(':') && !address.starts_with('[') {
        format!("[{}]:{}", address, DEFAULT_PORT)
    } else {
        format!("{}:{}", address, DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_default_port() {
        assert_eq!(with_default_port("printer.local"), "printer.local:9100");
        assert_eq!(with_default_port("10.0.0.5:9101"), "10.0.0.5:9101");
        assert_eq!(with_default_port("[::1]:9100"), "[::1]:9100");
        assert_eq!(with_default_port("[::1]"), "[::1]:9100");
        assert_eq!(with_default_port("fe80::1"), "[fe80::1]:9100");
    }

    #[test]
    fn test_round_trip_over_loopback() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let reader = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            conn.read_to_end(&mut received).unwrap();
            received
        });

        let mut transport = NetworkTransport::connect(&address).unwrap();
        transport.write_all(&[0x1D, 0x56, 0x41, 0x30]).unwrap();
        drop(transport);

        assert_eq!(reader.join().unwrap(), vec![0x1D, 0x56, 0x41, 0x30]);
    }

    #[test]
    fn test_unresolvable_host() {
        let err = NetworkTransport::connect_timeout("host.invalid", Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, EscPosError::Transport(_)));
    }
}
