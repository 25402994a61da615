//! # Print Call Options
//!
//! Typed formatting parameters for [`Printer::text`](super::Printer::text),
//! [`Printer::feed`](super::Printer::feed) and
//! [`Printer::feed_and_cut`](super::Printer::feed_and_cut).
//!
//! ## Example
//!
//! ```
//! use escpos::printer::TextStyle;
//! use escpos::protocol::text::Font;
//!
//! let style = TextStyle::new()
//!     .center()
//!     .emphasize()
//!     .font(Font::B)
//!     .size(2, 2);
//! ```

use crate::protocol::text::{Alignment, Font, Language};

/// Formatting applied before a text payload.
///
/// Toggles only switch a mode on; a later feed resets everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub align: Option<Alignment>,
    pub lang: Option<Language>,
    pub font: Option<Font>,
    pub smooth: bool,
    pub emphasize: bool,
    pub underline: bool,
    pub reverse: bool,
    pub rotate: bool,
    /// Double width (`dw`): width magnification 2
    pub double_width: bool,
    /// Double height (`dh`): height magnification 2
    pub double_height: bool,
    /// Width magnification 1-8
    pub width: Option<u8>,
    /// Height magnification 1-8
    pub height: Option<u8>,
    /// Absolute horizontal position in motion units
    pub x: Option<u16>,
    /// Absolute vertical position in motion units
    pub y: Option<u16>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn center(self) -> Self {
        self.align(Alignment::Center)
    }

    pub fn right(self) -> Self {
        self.align(Alignment::Right)
    }

    pub fn lang(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn smooth(mut self) -> Self {
        self.smooth = true;
        self
    }

    pub fn emphasize(mut self) -> Self {
        self.emphasize = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn rotate(mut self) -> Self {
        self.rotate = true;
        self
    }

    pub fn double_width(mut self) -> Self {
        self.double_width = true;
        self
    }

    pub fn double_height(mut self) -> Self {
        self.double_height = true;
        self
    }

    /// Set both magnifications (validated when the style is applied).
    pub fn size(mut self, width: u8, height: u8) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Move to an absolute position before printing.
    pub fn at(mut self, x: u16, y: u16) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }
}

/// Paper feed before the state reset that ends a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedOptions {
    /// Feed this many lines (`ESC d n`)
    pub lines: Option<u8>,
    /// Move to this vertical position in motion units (`GS $`)
    pub units: Option<u16>,
}

impl FeedOptions {
    pub fn lines(lines: u8) -> Self {
        Self {
            lines: Some(lines),
            units: None,
        }
    }

    pub fn units(units: u16) -> Self {
        Self {
            lines: None,
            units: Some(units),
        }
    }
}

/// Behaviour of [`Printer::feed_and_cut`](super::Printer::feed_and_cut)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CutOptions {
    /// Feed one line before cutting
    pub feed: bool,
}
