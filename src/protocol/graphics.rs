//! # ESC/POS Raster Graphics Commands
//!
//! This module implements the two raster transfer modes of ESC/POS and the
//! `GS ( L` graphics-buffer framing they share.
//!
//! ## Graphics Modes Overview
//!
//! | Mode | Command | Limit | Best For |
//! |------|---------|-------|----------|
//! | Bit image | GS v 0 | one command, 2-byte dimensions | Small images, logos |
//! | Graphics buffer | GS 8 L + GS ( L fn 50 | 1662 lines per chunk | Anything tall |
//!
//! ## Bit Packing
//!
//! Every row is `bytes_per_line` bytes, each byte holding 8 horizontal dots:
//! - Bit 7 (MSB) = leftmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## Chunked Transfer
//!
//! The graphics buffer holds at most [`MAX_CHUNK_LINES`] rows regardless of
//! width, so a tall image is sent as consecutive row ranges:
//!
//! ```text
//! 512 × 2000 image, 64 bytes per line
//!
//! chunk 0: rows    0..1662   P = 10 + 1662 × 64 = 106_378
//! chunk 1: rows 1662..2000   P = 10 +  338 × 64 =  21_642
//! ```
//!
//! Each chunk is a store command (`GS 8 L`, function 112), the rows, and a
//! print command (`GS ( L`, function 50) that also returns the print
//! position to the left margin.

use serde::{Deserialize, Serialize};

use super::codec;
use super::commands::GS;
use crate::error::EscPosError;

/// Maximum rows the printer's graphics buffer accepts in one store command
pub const MAX_CHUNK_LINES: u16 = 1662;

/// Bytes of function parameters counted in a `GS 8 L` payload length
/// (`m fn a bx by c xL xH yL yH`)
pub const CHUNK_HEADER_PARAMS: usize = 10;

/// Length of the `GS 8 L` header that precedes each chunk's rows
pub const CHUNK_HEADER_LEN: usize = 17;

/// `GS ( L pL pH m fn`: print the graphics buffer and return to the left margin
pub const PRINT_BUFFER: [u8; 7] = [GS, b'(', b'L', 0x02, 0x00, b'0', b'2'];

/// Raster transfer mode, chosen per image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterMode {
    /// Single `GS v 0` command carrying the whole image
    BitImage,
    /// `GS 8 L` chunks of at most [`MAX_CHUNK_LINES`] rows
    #[default]
    Graphics,
}

impl std::str::FromStr for RasterMode {
    type Err = EscPosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitImage" | "bit_image" | "bit-image" => Ok(Self::BitImage),
            "graphics" => Ok(Self::Graphics),
            other => Err(EscPosError::InvalidParameter {
                name: "mode".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// RASTER IMAGE
// ============================================================================

/// A packed monochrome bitmap.
///
/// Rows are stored top to bottom, `bytes_per_line` bytes each. Padding bits
/// to the right of `width_dots` are sent as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width_dots: usize,
    height: usize,
    bytes_per_line: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap a packed buffer with explicit row stride.
    ///
    /// ## Errors
    ///
    /// [`EscPosError::RasterSize`] if `bytes_per_line` cannot hold
    /// `width_dots` or `data.len() != bytes_per_line * height`.
    pub fn new(
        width_dots: usize,
        height: usize,
        bytes_per_line: usize,
        data: Vec<u8>,
    ) -> Result<Self, EscPosError> {
        if bytes_per_line < width_dots.div_ceil(8) {
            return Err(EscPosError::RasterSize(format!(
                "{} bytes per line cannot hold {} dots",
                bytes_per_line, width_dots
            )));
        }
        let expected = bytes_per_line.checked_mul(height).ok_or_else(|| {
            EscPosError::RasterSize(format!(
                "{} bytes × {} rows overflows the address space",
                bytes_per_line, height
            ))
        })?;
        if data.len() != expected {
            return Err(EscPosError::RasterSize(format!(
                "expected {} bytes ({} bytes × {} rows), got {}",
                expected,
                bytes_per_line,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width_dots,
            height,
            bytes_per_line,
            data,
        })
    }

    /// Wrap a tightly packed buffer (`ceil(width_dots / 8)` bytes per row).
    pub fn packed(width_dots: usize, height: usize, data: Vec<u8>) -> Result<Self, EscPosError> {
        Self::new(width_dots, height, width_dots.div_ceil(8), data)
    }

    #[inline]
    pub fn width_dots(&self) -> usize {
        self.width_dots
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Width sent in graphics headers.
    ///
    /// Equal to `width_dots` for tightly packed rows. Padded rows declare the
    /// full stride (`bytes_per_line × 8`) so the printer's row length matches
    /// the data; the padding bits print as whatever they hold.
    pub fn declared_width(&self) -> usize {
        if self.bytes_per_line == self.width_dots.div_ceil(8) {
            self.width_dots
        } else {
            self.bytes_per_line * 8
        }
    }

    /// Bytes of rows `[start, start + count)`, or `None` past the last row.
    pub fn rows(&self, start: usize, count: usize) -> Option<&[u8]> {
        let end = start.checked_add(count)?;
        if end > self.height {
            return None;
        }
        self.data
            .get(start * self.bytes_per_line..end * self.bytes_per_line)
    }

    /// Rows covered by `chunk`.
    ///
    /// ## Errors
    ///
    /// [`EscPosError::RasterSize`] if the chunk runs past the image.
    pub fn chunk_rows(&self, chunk: &RasterChunk) -> Result<&[u8], EscPosError> {
        self.rows(chunk.start_line, chunk.line_count).ok_or_else(|| {
            EscPosError::RasterSize(format!(
                "rows {}..{} outside a {}-row image",
                chunk.start_line,
                chunk.end_line(),
                self.height
            ))
        })
    }

    /// Split the rows into chunks of at most `max_lines` rows.
    ///
    /// ## Errors
    ///
    /// [`EscPosError::ChunkSize`] unless `max_lines` is in `1..=1662`.
    pub fn chunks(&self, max_lines: u16) -> Result<Vec<RasterChunk>, EscPosError> {
        let spans = plan_chunks(self.height, max_lines)?;
        Ok(spans
            .into_iter()
            .map(|(start_line, line_count)| RasterChunk {
                start_line,
                line_count,
                bytes_per_line: self.bytes_per_line,
                width_dots: self.declared_width(),
            })
            .collect())
    }
}

// ============================================================================
// CHUNK PLANNING
// ============================================================================

/// One `GS 8 L` transfer unit: rows `[start_line, start_line + line_count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterChunk {
    pub start_line: usize,
    pub line_count: usize,
    pub bytes_per_line: usize,
    /// Dots per row as declared in the header, see
    /// [`RasterImage::declared_width`]
    pub width_dots: usize,
}

impl RasterChunk {
    /// First row after this chunk
    #[inline]
    pub fn end_line(&self) -> usize {
        self.start_line + self.line_count
    }

    /// `P = 10 + line_count × bytes_per_line`
    #[inline]
    pub fn payload_len(&self) -> usize {
        CHUNK_HEADER_PARAMS + self.line_count * self.bytes_per_line
    }

    /// # Store Raster Graphics (GS 8 L p1 p2 p3 p4 m fn a bx by c xL xH yL yH)
    ///
    /// | Bytes | Meaning |
    /// |-------|---------|
    /// | `1D 38 4C` | GS 8 L |
    /// | `p1..p4` | payload length, 4 bytes LE |
    /// | `30 70 30` | m = 48, fn = 112, a = 48 (monochrome tone) |
    /// | `01 01` | bx, by: zoom 1×1 |
    /// | `31` | c: colour 1 |
    /// | `xL xH` | width in dots |
    /// | `yL yH` | rows in this chunk |
    pub fn header(&self) -> Result<[u8; CHUNK_HEADER_LEN], EscPosError> {
        let [p1, p2, p3, p4] = codec::encode_u32(self.payload_len())?;
        let [xl, xh] = codec::encode_u16(self.width_dots)?;
        let [yl, yh] = codec::encode_u16(self.line_count)?;
        Ok([
            GS, b'8', b'L', p1, p2, p3, p4, b'0', b'p', b'0', 0x01, 0x01, b'1', xl, xh, yl, yh,
        ])
    }
}

/// Partition `height` rows into `(start, count)` spans of at most
/// `max_lines` rows each, in increasing order.
///
/// ## Errors
///
/// [`EscPosError::ChunkSize`] unless `max_lines` is in `1..=1662`.
///
/// ## Example
///
/// ```
/// use escpos::protocol::graphics::{plan_chunks, MAX_CHUNK_LINES};
///
/// let spans = plan_chunks(2000, MAX_CHUNK_LINES).unwrap();
/// assert_eq!(spans, vec![(0, 1662), (1662, 338)]);
/// ```
pub fn plan_chunks(height: usize, max_lines: u16) -> Result<Vec<(usize, usize)>, EscPosError> {
    validate_chunk_lines(max_lines)?;
    let max_lines = usize::from(max_lines);

    let mut spans = Vec::with_capacity(height.div_ceil(max_lines));
    let mut start = 0;
    while start < height {
        let count = max_lines.min(height - start);
        spans.push((start, count));
        start += count;
    }
    Ok(spans)
}

/// Check a chunk line limit against the graphics buffer size.
pub fn validate_chunk_lines(max_lines: u16) -> Result<(), EscPosError> {
    if max_lines == 0 || max_lines > MAX_CHUNK_LINES {
        return Err(EscPosError::ChunkSize(max_lines));
    }
    Ok(())
}

// ============================================================================
// COMMAND BUILDERS
// ============================================================================

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Bytes | Meaning |
/// |-------|---------|
/// | `1D 76 30` | GS v 0 |
/// | `00` | m: normal density |
/// | `xL xH` | width in bytes |
/// | `yL yH` | height in dots |
///
/// ## Errors
///
/// - [`EscPosError::RasterSize`] if the rows carry padding beyond
///   `ceil(width / 8)` bytes (the command has no stride field)
/// - [`EscPosError::IntegerRange`] if a dimension does not fit in 2 bytes
pub fn bit_image(image: &RasterImage) -> Result<Vec<u8>, EscPosError> {
    let width_bytes = (image.width_dots() + 7) >> 3;
    if image.bytes_per_line() != width_bytes {
        return Err(EscPosError::RasterSize(format!(
            "bit image rows must be {} bytes, got {}",
            width_bytes,
            image.bytes_per_line()
        )));
    }

    let [xl, xh] = codec::encode_u16(width_bytes)?;
    let [yl, yh] = codec::encode_u16(image.height())?;

    let mut cmd = Vec::with_capacity(8 + image.data().len());
    cmd.extend_from_slice(&[GS, b'v', b'0', 0x00, xl, xh, yl, yh]);
    cmd.extend_from_slice(image.data());
    Ok(cmd)
}

/// Encode a whole image in graphics-buffer mode: for every chunk the
/// header, the rows and [`PRINT_BUFFER`].
pub fn graphics(image: &RasterImage, max_lines: u16) -> Result<Vec<u8>, EscPosError> {
    let chunks = image.chunks(max_lines)?;
    let mut cmd = Vec::with_capacity(
        image.data().len() + chunks.len() * (CHUNK_HEADER_LEN + PRINT_BUFFER.len()),
    );
    for chunk in &chunks {
        cmd.extend_from_slice(&chunk.header()?);
        cmd.extend_from_slice(image.chunk_rows(chunk)?);
        cmd.extend_from_slice(&PRINT_BUFFER);
    }
    Ok(cmd)
}

/// # Graphics Function Frame (GS ( L pL pH m fn d1...dk)
///
/// `p = k + 2` counts the `m` and `fn` bytes.
///
/// ```
/// use escpos::protocol::graphics::{graphics_data, PRINT_BUFFER};
///
/// assert_eq!(graphics_data(b'0', b'2', &[]).unwrap(), PRINT_BUFFER.to_vec());
/// ```
pub fn graphics_data(m: u8, function: u8, data: &[u8]) -> Result<Vec<u8>, EscPosError> {
    let [pl, ph] = codec::encode_u16(data.len() + 2)?;
    let mut cmd = Vec::with_capacity(7 + data.len());
    cmd.extend_from_slice(&[GS, b'(', b'L', pl, ph, m, function]);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

/// Store an image in the graphics buffer with `GS ( L` function 112.
///
/// Single-frame variant of the chunk header, limited to 65 525 bytes of
/// pixel data by the 2-byte length.
pub fn store_graphics(image: &RasterImage) -> Result<Vec<u8>, EscPosError> {
    let [xl, xh] = codec::encode_u16(image.declared_width())?;
    let [yl, yh] = codec::encode_u16(image.height())?;

    let mut payload = Vec::with_capacity(8 + image.data().len());
    payload.extend_from_slice(&[b'0', 0x01, 0x01, b'1', xl, xh, yl, yh]);
    payload.extend_from_slice(image.data());
    graphics_data(b'0', b'p', &payload)
}

// ============================================================================
// TESTS
// ============================================================================
