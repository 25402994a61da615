//! # escpos - ESC/POS Thermal Printer Library
//!
//! Encodes print jobs into the ESC/POS command language understood by most
//! thermal receipt printers. It provides:
//!
//! - **Protocol implementation**: pure builders for every command frame
//! - **Stateful sessions**: a [`Printer`] that tracks text styling and can
//!   re-emit it after the printer resets
//! - **Raster transfer**: bit-image mode and chunked graphics-buffer mode
//!   for images taller than one `GS 8 L` transfer allows
//! - **Transport**: device files and raw TCP
//!
//! ## Quick Start
//!
//! ```no_run
//! use escpos::{
//!     printer::{CutOptions, Printer, TextStyle},
//!     protocol::barcode::Symbology,
//!     transport::DeviceTransport,
//! };
//!
//! let printer = Printer::new(DeviceTransport::open("/dev/usb/lp0")?);
//!
//! printer.init()?;
//! printer.text(&TextStyle::new().center().size(2, 2), "HELLO\n")?;
//! printer.barcode(Symbology::Code128, b"{B12345")?;
//! printer.feed_and_cut(&CutOptions { feed: true })?;
//! printer.end()?;
//!
//! # Ok::<(), escpos::EscPosError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Sessions, state and configuration |
//! | [`render`] | Images and TTF text to monochrome rasters |
//! | [`params`] | String parameters to typed options |
//! | [`transport`] | Communication backends |
//! | [`error`] | Error types |

pub mod error;
pub mod params;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::EscPosError;
pub use printer::{Printer, PrinterConfig};
