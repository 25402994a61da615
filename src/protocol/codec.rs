//! # Little-Endian Integer Codec
//!
//! ESC/POS encodes every multi-byte length and dimension as an unsigned
//! little-endian integer of a fixed width:
//!
//! | Field | Width | Example |
//! |-------|-------|---------|
//! | `xL xH` (image width) | 2 bytes | 72 → `[0x48, 0x00]` |
//! | `yL yH` (image height) | 2 bytes | 300 → `[0x2C, 0x01]` |
//! | `p1 p2 p3 p4` (GS 8 L payload) | 4 bytes | 17_002 → `[0x6A, 0x42, 0x00, 0x00]` |
//!
//! Values that do not fit the requested width are rejected, never truncated.

use log::warn;

use crate::error::EscPosError;

/// Smallest supported field width in bytes
pub const MIN_BYTES: usize = 1;

/// Largest supported field width in bytes
pub const MAX_BYTES: usize = 4;

/// Encode `value` as exactly `byte_count` little-endian bytes.
///
/// ## Errors
///
/// Returns [`EscPosError::IntegerRange`] when `byte_count` is outside `1..=4`
/// or when `value` exceeds `256^byte_count - 1`.
///
/// ## Example
///
/// ```
/// use escpos::protocol::codec;
///
/// assert_eq!(codec::encode(300, 2).unwrap(), vec![0x2C, 0x01]);
/// assert!(codec::encode(256, 1).is_err());
/// ```
pub fn encode(value: u64, byte_count: usize) -> Result<Vec<u8>, EscPosError> {
    if !(MIN_BYTES..=MAX_BYTES).contains(&byte_count) || value > max_value(byte_count) {
        warn!("cannot encode {} in {} byte(s)", value, byte_count);
        return Err(EscPosError::IntegerRange {
            value,
            bytes: byte_count,
        });
    }

    Ok(value.to_le_bytes()[..byte_count].to_vec())
}

/// Encode a two-byte `nL nH` field.
///
/// Convenience wrapper over [`encode`] for the most common field width.
pub fn encode_u16(value: usize) -> Result<[u8; 2], EscPosError> {
    let bytes = encode(value as u64, 2)?;
    Ok([bytes[0], bytes[1]])
}

/// Encode a four-byte `p1 p2 p3 p4` field.
pub fn encode_u32(value: usize) -> Result<[u8; 4], EscPosError> {
    let bytes = encode(value as u64, 4)?;
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Largest value representable in `byte_count` bytes.
#[inline]
pub const fn max_value(byte_count: usize) -> u64 {
    (1u64 << (byte_count * 8)) - 1
}
