//! # Printer State
//!
//! The character modes a session believes the printer is in. Every stateful
//! command is rendered from this record, so re-sending it
//! ([`PrinterState::frames`]) restores the printer after anything that may
//! have soft-reset it.

use crate::error::EscPosError;
use crate::protocol::text;

/// Mutable style record owned by one [`Printer`](super::Printer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterState {
    font_width: u8,
    font_height: u8,

    // ESC toggles
    pub(crate) underline: bool,
    pub(crate) emphasize: bool,
    pub(crate) upsidedown: bool,
    pub(crate) rotate: bool,

    // GS toggles
    pub(crate) reverse: bool,
    pub(crate) smooth: bool,
}

impl Default for PrinterState {
    fn default() -> Self {
        Self {
            font_width: 1,
            font_height: 1,
            underline: false,
            emphasize: false,
            upsidedown: false,
            rotate: false,
            reverse: false,
            smooth: false,
        }
    }
}

impl PrinterState {
    /// Restore the power-on defaults (1×1, all toggles off).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn font_width(&self) -> u8 {
        self.font_width
    }

    #[inline]
    pub fn font_height(&self) -> u8 {
        self.font_height
    }

    #[inline]
    pub fn underline(&self) -> bool {
        self.underline
    }

    #[inline]
    pub fn emphasize(&self) -> bool {
        self.emphasize
    }

    #[inline]
    pub fn upsidedown(&self) -> bool {
        self.upsidedown
    }

    #[inline]
    pub fn rotate(&self) -> bool {
        self.rotate
    }

    #[inline]
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    #[inline]
    pub fn smooth(&self) -> bool {
        self.smooth
    }

    /// Set both magnifications, leaving the state untouched on error.
    pub(crate) fn set_font_size(&mut self, width: u8, height: u8) -> Result<(), EscPosError> {
        if !text::valid_font_scale(width) || !text::valid_font_scale(height) {
            return Err(EscPosError::FontSize { width, height });
        }
        self.font_width = width;
        self.font_height = height;
        Ok(())
    }

    /// `GS ! n` for the current magnification
    pub fn font_size_frame(&self) -> Vec<u8> {
        text::packed_font_size(self.font_width, self.font_height)
    }

    /// Every stateful command, in refresh order: emphasize, rotate,
    /// smooth, reverse, underline, upside-down, font size.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        vec![
            text::emphasize(self.emphasize),
            text::rotate(self.rotate),
            text::smooth(self.smooth),
            text::reverse(self.reverse),
            text::underline(self.underline),
            text::upsidedown(self.upsidedown),
            self.font_size_frame(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = PrinterState::default();
        assert_eq!((state.font_width(), state.font_height()), (1, 1));
        assert!(!state.underline() && !state.emphasize() && !state.smooth());
        assert_eq!(state.font_size_frame(), vec![0x1D, 0x21, 0x00]);
    }

    #[test]
    fn test_set_font_size_rejects_out_of_range() {
        let mut state = PrinterState::default();
        state.set_font_size(3, 4).unwrap();

        for (w, h) in [(0, 1), (1, 0), (9, 1), (1, 9), (0, 0), (255, 255)] {
            assert!(state.set_font_size(w, h).is_err());
            assert_eq!((state.font_width(), state.font_height()), (3, 4));
        }
    }

    #[test]
    fn test_reset() {
        let mut state = PrinterState::default();
        state.set_font_size(8, 8).unwrap();
        state.underline = true;
        state.reverse = true;
        state.reset();
        assert_eq!(state, PrinterState::default());
    }

    #[test]
    fn test_frames_order() {
        let mut state = PrinterState::default();
        state.emphasize = true;
        state.set_font_size(2, 3).unwrap();
        let frames = state.frames();
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0], vec![0x1B, 0x47, 0x01]);
        assert_eq!(frames[6], vec![0x1D, 0x21, 0x12]);
    }

    #[test]
    fn test_font_size_frame_matches_builder() {
        let mut state = PrinterState::default();
        for width in 1..=8 {
            for height in 1..=8 {
                state.set_font_size(width, height).unwrap();
                assert_eq!(
                    state.font_size_frame(),
                    text::font_size(width, height).unwrap()
                );
            }
        }
    }
}
