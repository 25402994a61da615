//! # Printer Configuration
//!
//! Per-session settings for a printer. A [`PrinterConfig`] is handed to
//! [`Printer::with_config`](super::Printer::with_config) and lives exactly as
//! long as the session; nothing is read from process-wide state.
//!
//! ## Usage
//!
//! ```
//! use escpos::printer::PrinterConfig;
//!
//! let config = PrinterConfig::default();
//! println!("{}: {} dots, {} lines per chunk",
//!          config.name,
//!          config.width_dots,
//!          config.max_chunk_lines);
//! ```
//!
//! Configurations can also be loaded from JSON; missing fields take their
//! default values:
//!
//! ```json
//! { "name": "TM-T20", "width_dots": 576, "raster_mode": "bit_image" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EscPosError;
use crate::protocol::graphics::{self, MAX_CHUNK_LINES, RasterMode};

/// # Printer Configuration
///
/// ## Fields
///
/// - **width_dots**: widest image the printer accepts; wider images are
///   scaled down by [`render::mono`](crate::render::mono)
/// - **max_chunk_lines**: rows per `GS 8 L` chunk (1-1662)
/// - **raster_mode**: transfer mode used when the caller does not pick one
/// - **threshold**: luminance cut-off in `0.0..=1.0` for monochrome
///   conversion; darker pixels print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: String,

    /// Maximum print width in dots
    pub width_dots: u16,

    /// Maximum rows per graphics-buffer chunk
    pub max_chunk_lines: u16,

    /// Default raster transfer mode
    pub raster_mode: RasterMode,

    /// Monochrome conversion threshold
    pub threshold: f32,
}

impl PrinterConfig {
    /// Generic 80mm printer limited to a 512-dot image width
    pub fn generic() -> Self {
        Self {
            name: "Generic ESC/POS".to_string(),
            width_dots: 512,
            max_chunk_lines: MAX_CHUNK_LINES,
            raster_mode: RasterMode::Graphics,
            threshold: 0.5,
        }
    }

    /// Check every field against protocol limits.
    ///
    /// ## Errors
    ///
    /// - [`EscPosError::ChunkSize`] for a chunk limit outside `1..=1662`
    /// - [`EscPosError::Config`] for a zero width or a threshold outside
    ///   `0.0..=1.0`
    pub fn validate(&self) -> Result<(), EscPosError> {
        graphics::validate_chunk_lines(self.max_chunk_lines)?;
        if self.width_dots == 0 {
            return Err(EscPosError::Config("width_dots must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(EscPosError::Config(format!(
                "threshold {} is outside 0.0..=1.0",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, EscPosError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EscPosError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EscPosError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            EscPosError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Print width in bytes
    #[inline]
    pub fn width_bytes(&self) -> usize {
        usize::from(self.width_dots).div_ceil(8)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::generic()
    }
}

// ============================================================================
// TESTS
// ============================================================================
