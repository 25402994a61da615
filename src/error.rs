//! # Error Types
//!
//! This module defines error types used throughout the escpos library.
//!
//! Every validation error is raised before the first byte of the affected
//! command reaches the sink, so a rejected call never leaves a half-written
//! frame in the output stream.

use thiserror::Error;

/// Main error type for escpos operations
#[derive(Debug, Error)]
pub enum EscPosError {
    /// A named formatting parameter could not be parsed (e.g. `width=abc`)
    #[error("Invalid parameter {name}: {value:?}")]
    InvalidParameter { name: String, value: String },

    /// Font magnification outside the 1..=8 range
    #[error("Invalid font size {width}x{height}: both dimensions must be in 1..=8")]
    FontSize { width: u8, height: u8 },

    /// Raster chunk line limit outside what the graphics buffer accepts
    #[error("Invalid chunk size {0}: must be in 1..={max}", max = crate::protocol::graphics::MAX_CHUNK_LINES)]
    ChunkSize(u16),

    /// Integer cannot be represented in the requested number of bytes
    #[error("Cannot encode {value} in {bytes} byte(s)")]
    IntegerRange { value: u64, bytes: usize },

    /// Pixel buffer does not match the declared image geometry
    #[error("Raster size mismatch: {0}")]
    RasterSize(String),

    /// Barcode payload cannot be framed for the selected symbology
    #[error("Barcode error: {0}")]
    Barcode(String),

    /// Transport-level errors (connection setup)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Image loading or conversion error
    #[error("Image error: {0}")]
    Image(String),

    /// Font loading or text rendering error
    #[error("Font error: {0}")]
    Font(String),

    /// Configuration file could not be loaded or failed validation
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
