//! # ESC/POS Text Styling Commands
//!
//! This module implements the character formatting commands of ESC/POS.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Underline | ESC - n | Underlined text |
//! | Emphasize | ESC G n | Double-strike (bold) text |
//! | Upside down | ESC { n | 180° rotation |
//! | Rotate | ESC R n | 90° rotation |
//! | Reverse | GS B n | White on black |
//! | Smoothing | GS b n | Smoothed enlarged glyphs |
//! | Size | GS ! n | 1-8× width and height |
//!
//! Toggle commands take `n = 0` (off) or `n = 1` (on).
//!
//! ## Stateless Selections
//!
//! Alignment, international character set and font face are plain
//! enumerations mapped to a single byte. Parsing an unknown name through
//! [`Alignment::from_param`] (and friends) logs a warning and selects the
//! default rather than failing the print job.

use std::fmt;
use std::str::FromStr;

use log::warn;

use super::commands::{ESC, GS};
use crate::error::EscPosError;

/// Smallest font magnification
pub const MIN_FONT_SCALE: u8 = 1;

/// Largest font magnification
pub const MAX_FONT_SCALE: u8 = 8;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// Parse a parameter value, falling back to [`Alignment::Left`].
    pub fn from_param(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!("Invalid alignment: {:?}, defaulting to left", value);
            Self::default()
        })
    }
}

impl FromStr for Alignment {
    type Err = EscPosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(invalid("align", other)),
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// Takes effect at the start of the next line.
///
/// ```
/// use escpos::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// INTERNATIONAL CHARACTER SET
// ============================================================================

/// International character sets selectable with `ESC R n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English = 0,
    French = 1,
    German = 2,
    UnitedKingdom = 3,
    Danish = 4,
    Swedish = 5,
    Italian = 6,
    Spanish = 7,
    Japanese = 8,
    Norwegian = 9,
}

impl Language {
    /// Parse a parameter value, falling back to [`Language::English`].
    pub fn from_param(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!("Invalid language: {:?}, defaulting to en", value);
            Self::default()
        })
    }

    /// Two-letter code used in formatting parameters
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::German => "de",
            Self::UnitedKingdom => "uk",
            Self::Danish => "da",
            Self::Swedish => "sv",
            Self::Italian => "it",
            Self::Spanish => "es",
            Self::Japanese => "ja",
            Self::Norwegian => "no",
        }
    }
}

impl FromStr for Language {
    type Err = EscPosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::English),
            "fr" => Ok(Self::French),
            "de" => Ok(Self::German),
            "uk" => Ok(Self::UnitedKingdom),
            "da" => Ok(Self::Danish),
            "sv" => Ok(Self::Swedish),
            "it" => Ok(Self::Italian),
            "es" => Ok(Self::Spanish),
            "ja" => Ok(Self::Japanese),
            "no" => Ok(Self::Norwegian),
            other => Err(invalid("lang", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// # Select International Character Set (ESC R n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC R n |
/// | Hex     | 1B 52 n |
pub fn language(lang: Language) -> Vec<u8> {
    vec![ESC, b'R', lang as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots
    #[default]
    A = 0,
    /// Font B: 9×17 dots
    B = 1,
    /// Font C: printer dependent, usually 9×24 dots
    C = 2,
}

impl Font {
    /// Parse a parameter value, falling back to [`Font::A`].
    ///
    /// Accepts a bare letter (`"b"`) or the `font_X` form (`"font_b"`).
    pub fn from_param(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!("Invalid font: {:?}, defaulting to A", value);
            Self::default()
        })
    }
}

impl FromStr for Font {
    type Err = EscPosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letter = s.strip_prefix("font_").unwrap_or(s);
        match letter.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(invalid("font", s)),
        }
    }
}

/// # Select Character Font (ESC M n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC M n |
/// | Hex     | 1B 4D n |
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// STYLE TOGGLES
// ============================================================================

/// Underline on/off (ESC - n)
#[inline]
pub fn underline(on: bool) -> Vec<u8> {
    vec![ESC, b'-', u8::from(on)]
}

/// # Turn Emphasized Mode On/Off (ESC G n)
///
/// This is the double-strike command; on thermal heads it renders the same
/// as `ESC E`.
#[inline]
pub fn emphasize(on: bool) -> Vec<u8> {
    vec![ESC, b'G', u8::from(on)]
}

/// Upside-down printing on/off (ESC { n)
#[inline]
pub fn upsidedown(on: bool) -> Vec<u8> {
    vec![ESC, b'{', u8::from(on)]
}

/// 90° rotation on/off, sent as `ESC R n`
///
/// Shares its bytes with [`language`]; printers that follow the standard
/// table read it as a character set change.
#[inline]
pub fn rotate(on: bool) -> Vec<u8> {
    vec![ESC, b'R', u8::from(on)]
}

/// White/black reverse printing on/off (GS B n)
#[inline]
pub fn reverse(on: bool) -> Vec<u8> {
    vec![GS, b'B', u8::from(on)]
}

/// Smoothing on/off (GS b n)
#[inline]
pub fn smooth(on: bool) -> Vec<u8> {
    vec![GS, b'b', u8::from(on)]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Both magnifications are packed into one byte:
///
/// ```text
/// n = ((width - 1) << 4) | (height - 1)
///
/// bits 7..4: width - 1   (0-7)
/// bits 3..0: height - 1  (0-7)
/// ```
///
/// ## Errors
///
/// Returns [`EscPosError::FontSize`] unless both values are in `1..=8`.
///
/// ## Example
///
/// ```
/// use escpos::protocol::text::font_size;
///
/// assert_eq!(font_size(2, 3).unwrap(), vec![0x1D, 0x21, 0x12]);
/// assert!(font_size(0, 1).is_err());
/// ```
pub fn font_size(width: u8, height: u8) -> Result<Vec<u8>, EscPosError> {
    if !valid_font_scale(width) || !valid_font_scale(height) {
        return Err(EscPosError::FontSize { width, height });
    }
    Ok(packed_font_size(width, height))
}

/// `GS ! n` for magnifications already known to be in `1..=8`
#[inline]
pub(crate) fn packed_font_size(width: u8, height: u8) -> Vec<u8> {
    vec![GS, b'!', ((width - 1) << 4) | (height - 1)]
}

/// Check a single magnification factor against `1..=8`.
#[inline]
pub fn valid_font_scale(scale: u8) -> bool {
    (MIN_FONT_SCALE..=MAX_FONT_SCALE).contains(&scale)
}

// ============================================================================
// XML ENTITY DECODING
// ============================================================================

/// Entities recognised in text payloads, `&amp;` last so it is never
/// decoded twice.
const ENTITIES: [(&str, &str); 9] = [
    ("&#9;", "\t"),
    ("&#x9;", "\t"),
    ("&#10;", "\n"),
    ("&#xA;", "\n"),
    ("&apos;", "'"),
    ("&quot;", "\""),
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&amp;", "&"),
];

/// Decode the XML entities that may appear in a text node.
///
/// Single pass, leftmost match wins, so `&amp;lt;` becomes `&lt;` and not `<`.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'outer: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        for (entity, replacement) in ENTITIES {
            if let Some(after) = tail.strip_prefix(entity) {
                out.push_str(replacement);
                rest = after;
                continue 'outer;
            }
        }
        out.push('&');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

fn invalid(name: &str, value: &str) -> EscPosError {
    EscPosError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_alignment_fallback() {
        assert_eq!(Alignment::from_param("center"), Alignment::Center);
        assert_eq!(Alignment::from_param("justify"), Alignment::Left);
        assert!("justify".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_language_codes() {
        let codes = ["en", "fr", "de", "uk", "da", "sv", "it", "es", "ja", "no"];
        for (n, code) in codes.iter().enumerate() {
            let lang: Language = code.parse().unwrap();
            assert_eq!(language(lang), vec![0x1B, 0x52, n as u8]);
            assert_eq!(lang.code(), *code);
        }
        assert_eq!(Language::from_param("xx"), Language::English);
    }

    #[test]
    fn test_font_parsing() {
        assert_eq!("A".parse::<Font>().unwrap(), Font::A);
        assert_eq!("b".parse::<Font>().unwrap(), Font::B);
        assert_eq!("font_c".parse::<Font>().unwrap(), Font::C);
        assert_eq!(Font::from_param("Z"), Font::A);
        assert_eq!(font(Font::B), vec![0x1B, 0x4D, 0x01]);
    }

    #[test]
    fn test_toggles() {
        assert_eq!(underline(true), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(emphasize(false), vec![0x1B, 0x47, 0x00]);
        assert_eq!(upsidedown(true), vec![0x1B, 0x7B, 0x01]);
        assert_eq!(rotate(true), vec![0x1B, 0x52, 0x01]);
        assert_eq!(reverse(true), vec![0x1D, 0x42, 0x01]);
        assert_eq!(smooth(true), vec![0x1D, 0x62, 0x01]);
    }

    #[test]
    fn test_font_size_packing() {
        assert_eq!(font_size(1, 1).unwrap(), vec![0x1D, 0x21, 0x00]);
        assert_eq!(font_size(2, 3).unwrap(), vec![0x1D, 0x21, 0x12]);
        assert_eq!(font_size(8, 8).unwrap(), vec![0x1D, 0x21, 0x77]);
    }

    #[test]
    fn test_font_size_range() {
        assert!(matches!(
            font_size(0, 1),
            Err(EscPosError::FontSize { width: 0, height: 1 })
        ));
        assert!(font_size(1, 9).is_err());
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a&#9;b&#xA;c"), "a\tb\nc");
        assert_eq!(decode_entities("&lt;tag&gt; &quot;x&quot; &apos;y&apos;"), "<tag> \"x\" 'y'");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
    }
}
