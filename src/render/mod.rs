//! # Rendering
//!
//! Producers of packed monochrome rasters for
//! [`Printer::raster`](crate::printer::Printer::raster):
//!
//! - [`mono`]: decoded images and intensity buffers to 1-bit rows
//! - [`text`]: text to an image through a TTF font
//!
//! The printer itself only consumes [`RasterImage`]s; any other rasterizer
//! can plug in through [`TextRenderer`].

pub mod mono;
pub mod text;

pub use mono::{Dither, image_to_raster};
pub use text::{TextRenderConfig, TtfTextRenderer};

use crate::error::EscPosError;
use crate::protocol::graphics::RasterImage;

/// Turns a string into a printable raster.
pub trait TextRenderer {
    fn render(&self, text: &str) -> Result<RasterImage, EscPosError>;
}
