//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! used by most thermal receipt printers. Every builder is a pure function
//! returning one command frame; state tracking lives in
//! [`printer`](crate::printer).
//!
//! ## Module Structure
//!
//! - [`codec`]: Fixed-width little-endian integer encoding
//! - [`commands`]: Basic printer commands (init, feed, cut, pulse, move)
//! - [`text`]: Text styling (alignment, language, fonts, toggles, size)
//! - [`barcode`]: 1D barcodes (`GS k`)
//! - [`graphics`]: Bit-image and chunked graphics-buffer raster transfer
//!
//! ## Usage Example
//!
//! ```
//! use escpos::protocol::{commands, graphics, text};
//! use escpos::protocol::graphics::RasterImage;
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::emphasize(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::emphasize(false));
//!
//! let stripes = RasterImage::packed(64, 24, vec![0xAA; 8 * 24]).unwrap();
//! data.extend(graphics::graphics(&stripes, graphics::MAX_CHUNK_LINES).unwrap());
//!
//! data.extend(commands::cut());
//! ```

pub mod barcode;
pub mod codec;
pub mod commands;
pub mod graphics;
pub mod text;
