//! # ESC/POS Printer Control
//!
//! Initialization, paper movement, cutting and the cash drawer kick.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - extended command prefix
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - print buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets modes to power-on defaults.
///
/// | Format | Bytes |
/// |--------|-------|
/// | ASCII  | ESC @ |
/// | Hex    | 1B 40 |
///
/// ```
/// use struk::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Set Left Margin (GS L nL nH)
///
/// Margin in dots from the left edge of the printable area.
#[inline]
pub fn left_margin(dots: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(dots);
    vec![GS, b'L', lo, hi]
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// Prints the buffer and advances `n` lines. `n = 0` only flushes the
/// current line.
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// CUTTER
// ============================================================================

/// Lines fed before cutting so the last row clears the blade.
pub const CUT_FEED_LINES: u8 = 3;

/// # Feed and Full Cut (GS V A n)
///
/// Feeds `n` lines past the cutter position, then performs a full cut.
///
/// | Format | Bytes      |
/// |--------|------------|
/// | ASCII  | GS V A n   |
/// | Hex    | 1D 56 41 n |
#[inline]
pub fn cut_full_feed(lines: u8) -> Vec<u8> {
    vec![GS, b'V', b'A', lines]
}

/// Full cut after the default feed.
#[inline]
pub fn cut() -> Vec<u8> {
    cut_full_feed(CUT_FEED_LINES)
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// # Generate Pulse (ESC p m t1 t2)
///
/// Kicks the cash drawer solenoid on connector `pin` (0 = pin 2,
/// 1 = pin 5). On and off times are sent in 2 ms units, so 120/240 ms
/// become `t1 = 60`, `t2 = 120`. Times above 510 ms saturate.
///
/// ```
/// use struk::protocol::commands;
///
/// assert_eq!(commands::pulse(0, 120, 240), vec![0x1B, b'p', b'0', 60, 120]);
/// ```
pub fn pulse(pin: u8, on_ms: u16, off_ms: u16) -> Vec<u8> {
    let m = b'0' + pin.min(1);
    let t1 = (on_ms / 2).min(255) as u8;
    let t2 = (off_ms / 2).min(255) as u8;
    vec![ESC, b'p', m, t1, t2]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}
