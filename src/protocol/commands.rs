//! # ESC/POS Basic Commands
//!
//! This module implements the fixed, state-free commands of the ESC/POS
//! protocol: initialization, paper feed, cutting, cash drawer kick and
//! absolute positioning.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `0xFA` (end of session)
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `GS V A n`, `ESC $ nL nH`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding, see
//! [`codec`](super::codec).

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, graphics, barcodes and cutter control.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// NUL - Terminator for function-A barcode data
pub const NUL: u8 = 0x00;

/// End-of-session marker sent when a printer session terminates
pub const END: u8 = 0xFA;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets the printer to its power-on modes.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use escpos::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// End-of-session byte (`0xFA`).
#[inline]
pub fn end() -> Vec<u8> {
    vec![END]
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// Print the line buffer and advance one line (LF).
#[inline]
pub fn linefeed() -> Vec<u8> {
    vec![LF]
}

/// # Print and Feed n Lines (ESC d n)
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC d n |
/// | Hex     | 1B 64 n |
///
/// Some firmware treats this as a soft reset of character modes.
#[inline]
pub fn formfeed_n(lines: u8) -> Vec<u8> {
    vec![ESC, b'd', lines]
}

/// Feed exactly one line (ESC d 1).
#[inline]
pub fn formfeed() -> Vec<u8> {
    formfeed_n(1)
}

// ============================================================================
// CUTTER AND DRAWER
// ============================================================================

/// # Select Cut Mode and Cut Paper (GS V A 0)
///
/// | Format  | Bytes        |
/// |---------|--------------|
/// | ASCII   | GS V A 0     |
/// | Hex     | 1D 56 41 30  |
///
/// Function B form: feeds to the cutting position (plus `n = '0'` dots) and
/// performs a full cut.
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', b'A', b'0']
}

/// Cash drawer kick on pin 2 with 10ms on / 510ms off (ESC p 0 10 255).
#[inline]
pub fn cash() -> Vec<u8> {
    vec![ESC, b'p', 0x00, 0x0A, 0xFF]
}

/// # Generate Pulse (ESC p 2)
///
/// Short drawer pulse, `t = 2` meaning 2 × 2ms on time.
#[inline]
pub fn pulse() -> Vec<u8> {
    vec![ESC, b'p', 0x02]
}

// ============================================================================
// POSITIONING
// ============================================================================

/// # Set Absolute Print Position (ESC $ nL nH)
///
/// Moves the horizontal print position to `x` motion units from the start
/// of the line.
#[inline]
pub fn move_x(x: u16) -> Vec<u8> {
    let [xl, xh] = x.to_le_bytes();
    vec![ESC, b'$', xl, xh]
}

/// # Set Absolute Vertical Print Position (GS $ nL nH)
///
/// Only honoured in page mode; standard mode printers ignore it.
#[inline]
pub fn move_y(y: u16) -> Vec<u8> {
    let [yl, yh] = y.to_le_bytes();
    vec![GS, b'$', yl, yh]
}

// ============================================================================
// TESTS
// ============================================================================
