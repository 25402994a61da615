//! TTF text rendering for printing text as an image.
//!
//! Lays out each line with ab_glyph, accumulates glyph coverage into an
//! intensity buffer and thresholds it to a [`RasterImage`]. All settings
//! come from a [`TextRenderConfig`] owned by the renderer.

use std::fs;
use std::path::PathBuf;

use ab_glyph::{Font, FontArc, ScaleFont};
use log::debug;

use super::TextRenderer;
use super::mono::{self, Dither};
use crate::error::EscPosError;
use crate::protocol::graphics::RasterImage;

/// Font and layout settings for [`TtfTextRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct TextRenderConfig {
    /// TrueType/OpenType font file
    pub font_path: PathBuf,
    /// Glyph height in pixels
    pub size_px: f32,
    /// Line advance as a multiple of the font's line height
    pub line_spacing: f32,
    /// Print light text on a dark background
    pub white_on_black: bool,
    /// Canvas width in dots; text beyond it is clipped
    pub max_width: usize,
    /// Blank margin around the text, in dots
    pub padding: usize,
}

impl Default for TextRenderConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf"),
            size_px: 30.0,
            line_spacing: 1.5,
            white_on_black: false,
            max_width: 512,
            padding: 10,
        }
    }
}

/// Renders text with a TTF font
pub struct TtfTextRenderer {
    font: FontArc,
    config: TextRenderConfig,
}

impl std::fmt::Debug for TtfTextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfTextRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TtfTextRenderer {
    /// Load the font named by `config.font_path`.
    pub fn new(config: TextRenderConfig) -> Result<Self, EscPosError> {
        let bytes = fs::read(&config.font_path).map_err(|e| {
            EscPosError::Font(format!(
                "Failed to read {}: {}",
                config.font_path.display(),
                e
            ))
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| {
            EscPosError::Font(format!(
                "Failed to parse {}: {}",
                config.font_path.display(),
                e
            ))
        })?;
        Ok(Self::with_font(font, config))
    }

    /// Use an already loaded font; `config.font_path` is ignored.
    pub fn with_font(font: FontArc, config: TextRenderConfig) -> Self {
        Self { font, config }
    }

    pub fn config(&self) -> &TextRenderConfig {
        &self.config
    }

    /// Rasterize `text` to an intensity buffer (0.0 = white, 1.0 = black).
    ///
    /// Returns `(width, height, intensity)`.
    pub fn render_intensity(&self, text: &str) -> (usize, usize, Vec<f32>) {
        let cfg = &self.config;
        let scaled = self.font.as_scaled(cfg.size_px);
        let ascent = scaled.ascent();
        let line_height = scaled.ascent() - scaled.descent();
        let advance = line_height * cfg.line_spacing.max(1.0);

        let lines: Vec<&str> = text.lines().collect();
        let line_count = lines.len().max(1);

        let width = cfg.max_width.max(1);
        let text_height = advance * (line_count - 1) as f32 + line_height;
        let height = (text_height.ceil() as usize + 2 * cfg.padding).max(1);
        let mut data = vec![0.0f32; width * height];

        for (row, line) in lines.iter().enumerate() {
            let baseline = cfg.padding as f32 + ascent + advance * row as f32;
            let mut caret = cfg.padding as f32;
            let mut previous = None;

            for ch in line.chars() {
                let glyph_id = self.font.glyph_id(ch);
                if let Some(prev) = previous {
                    caret += scaled.kern(prev, glyph_id);
                }
                let glyph =
                    glyph_id.with_scale_and_position(cfg.size_px, ab_glyph::point(caret, baseline));
                caret += scaled.h_advance(glyph_id);
                previous = Some(glyph_id);

                if let Some(outlined) = self.font.outline_glyph(glyph) {
                    let bounds = outlined.px_bounds();
                    outlined.draw(|px, py, coverage| {
                        let x = px as i32 + bounds.min.x as i32;
                        let y = py as i32 + bounds.min.y as i32;
                        if x >= 0 && (x as usize) < width && y >= 0 && (y as usize) < height {
                            let idx = y as usize * width + x as usize;
                            data[idx] = (data[idx] + coverage).min(1.0);
                        }
                    });
                }
            }
        }

        if cfg.white_on_black {
            for v in &mut data {
                *v = 1.0 - *v;
            }
        }

        (width, height, data)
    }
}

impl TextRenderer for TtfTextRenderer {
    fn render(&self, text: &str) -> Result<RasterImage, EscPosError> {
        let (width, height, intensity) = self.render_intensity(text);
        debug!("rendered {:?} to {}x{}", text, width, height);
        mono::intensity_to_raster(width, height, &intensity, Dither::default())
    }
}
