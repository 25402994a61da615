//! # Device File Transport
//!
//! Writes to a printer exposed as a character device:
//!
//! | Device | Typical path |
//! |--------|--------------|
//! | USB printer class | `/dev/usb/lp0` |
//! | USB-serial / RS-232 | `/dev/ttyUSB0`, `/dev/ttyS0` |
//! | Bluetooth SPP | `/dev/rfcomm0` |
//!
//! ## TTY Configuration
//!
//! When the device is a terminal it is switched to raw mode so binary data
//! passes through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR,
//!   ICRNL and XON/XOFF flow control off
//! - **No output processing**: OPOST off (no LF → CR LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**
//!
//! XON/XOFF must be off because 0x11 and 0x13 occur in raster data.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::debug;

use crate::error::EscPosError;

/// Default USB printer device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// # Device File Transport
///
/// ```no_run
/// use escpos::printer::Printer;
/// use escpos::transport::DeviceTransport;
///
/// let device = DeviceTransport::open("/dev/usb/lp0")?;
/// let printer = Printer::new(device);
/// printer.init()?;
/// printer.cut()?;
/// # Ok::<(), escpos::EscPosError>(())
/// ```
#[derive(Debug)]
pub struct DeviceTransport {
    file: File,
}

impl DeviceTransport {
    /// Open a printer device for writing.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the `lp` or `dialout` group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, EscPosError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            EscPosError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        if is_tty(&file) {
            debug!("{} is a tty, switching to raw mode", path.display());
            configure_tty_raw(&file)?;
        }

        Ok(Self { file })
    }

    /// Open [`DEFAULT_DEVICE`]
    pub fn open_default() -> Result<Self, EscPosError> {
        Self::open(DEFAULT_DEVICE)
    }
}

impl Write for DeviceTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(unix)]
fn is_tty(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;
    unsafe { libc::isatty(file.as_raw_fd()) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_file: &File) -> bool {
    false
}

#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), EscPosError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(EscPosError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(EscPosError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), EscPosError> {
    Ok(())
}
