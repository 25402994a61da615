//! # ESC/POS 1D Barcode Commands
//!
//! `GS k` prints a linear barcode. The symbology byte `m` selects both the
//! barcode type and the framing of its data, because two firmware
//! generations coexist in the protocol:
//!
//! | Function | `m` range | Framing |
//! |----------|-----------|---------|
//! | A | 0-6 | `GS k m d1...dk NUL` |
//! | B | 65-73 | `GS k m n d1...dn` |
//!
//! Codes above [`LENGTH_PREFIX_THRESHOLD`] use the length-prefixed form,
//! codes below it the NUL-terminated form.

use std::fmt;

use log::warn;

use super::commands::{GS, NUL};
use crate::error::EscPosError;

/// Symbology codes above this value use length-prefixed framing
pub const LENGTH_PREFIX_THRESHOLD: u8 = 69;

/// Barcode symbologies and their `GS k` selector byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Symbology {
    /// UPC-A (11-12 digits)
    #[default]
    UpcA = 0,
    /// UPC-E (compressed UPC-A)
    UpcE = 1,
    /// EAN-13 / JAN-13
    Ean13 = 2,
    /// EAN-8 / JAN-8
    Ean8 = 3,
    /// Code39
    Code39 = 4,
    /// Interleaved 2 of 5
    Itf = 5,
    /// Codabar / NW-7
    Codabar = 6,
    /// Code93 (function B only)
    Code93 = 72,
    /// Code128 (function B only)
    Code128 = 73,
}

impl Symbology {
    /// Look up a symbology by its selector byte.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::UpcA),
            1 => Some(Self::UpcE),
            2 => Some(Self::Ean13),
            3 => Some(Self::Ean8),
            4 => Some(Self::Code39),
            5 => Some(Self::Itf),
            6 => Some(Self::Codabar),
            72 => Some(Self::Code93),
            73 => Some(Self::Code128),
            _ => None,
        }
    }

    /// Like [`Symbology::from_code`], but unknown codes select UPC-A.
    pub fn from_code_or_default(code: u8) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            warn!("Unknown barcode symbology {}, defaulting to UPC-A", code);
            Self::default()
        })
    }

    /// Selector byte sent as `m`
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the payload is sent with a length byte instead of a NUL.
    #[inline]
    pub fn is_length_prefixed(self) -> bool {
        self.code() > LENGTH_PREFIX_THRESHOLD
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UpcA => "UPC-A",
            Self::UpcE => "UPC-E",
            Self::Ean13 => "EAN13",
            Self::Ean8 => "EAN8",
            Self::Code39 => "CODE39",
            Self::Itf => "ITF",
            Self::Codabar => "CODABAR",
            Self::Code93 => "CODE93",
            Self::Code128 => "CODE128",
        };
        f.write_str(name)
    }
}

/// # Print Barcode (GS k)
///
/// ## Errors
///
/// - length-prefixed symbologies: data longer than 255 bytes
/// - NUL-terminated symbologies: data containing a NUL byte
///
/// ## Example
///
/// ```
/// use escpos::protocol::barcode::{barcode, Symbology};
///
/// let cmd = barcode(Symbology::Code128, b"AB1").unwrap();
/// assert_eq!(cmd, vec![0x1D, 0x6B, 73, 3, b'A', b'B', b'1']);
///
/// let cmd = barcode(Symbology::Code39, b"AB1").unwrap();
/// assert_eq!(cmd, vec![0x1D, 0x6B, 4, b'A', b'B', b'1', 0x00]);
/// ```
pub fn barcode(symbology: Symbology, data: &[u8]) -> Result<Vec<u8>, EscPosError> {
    let mut cmd = Vec::with_capacity(4 + data.len());
    cmd.extend_from_slice(&[GS, b'k', symbology.code()]);

    if symbology.is_length_prefixed() {
        let len = u8::try_from(data.len()).map_err(|_| {
            EscPosError::Barcode(format!(
                "{} data is {} bytes, at most 255 allowed",
                symbology,
                data.len()
            ))
        })?;
        cmd.push(len);
        cmd.extend_from_slice(data);
    } else {
        if data.contains(&NUL) {
            return Err(EscPosError::Barcode(format!(
                "{} data must not contain NUL",
                symbology
            )));
        }
        cmd.extend_from_slice(data);
        cmd.push(NUL);
    }

    Ok(cmd)
}
