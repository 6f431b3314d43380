//! # ESC/POS Text Styling
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Justification | ESC a n | left / center / right |
//! | Emphasis | ESC E n | bold |
//! | Print mode | ESC ! n | font B, emphasis, double height/width, underline |
//! | Character size | GS ! n | 1× to 8× in each direction |
//!
//! Print mode and character size both change glyph scale. `ESC !` is the
//! coarse switch the receipt layout uses for its double-width header and
//! total; `GS !` is the fine-grained text size scale.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use super::commands::{ESC, GS};

// ============================================================================
// JUSTIFICATION
// ============================================================================

/// Line justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Select Justification (ESC a n)
///
/// ```
/// use struk::protocol::text::{justify, Justification};
///
/// assert_eq!(justify(Justification::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn justify(justification: Justification) -> Vec<u8> {
    vec![ESC, b'a', justification as u8]
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Emphasized Mode (ESC E n)
pub fn emphasis(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', u8::from(enabled)]
}

// ============================================================================
// PRINT MODE
// ============================================================================

/// Flags for `ESC !`.
///
/// ```
/// use struk::protocol::text::PrintMode;
///
/// let mode = PrintMode::DOUBLE_WIDTH | PrintMode::EMPHASIZED;
/// assert!(mode.contains(PrintMode::DOUBLE_WIDTH));
/// assert_eq!(mode.bits(), 0x28);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PrintMode(u8);

impl PrintMode {
    pub const NORMAL: Self = Self(0);
    pub const FONT_B: Self = Self(0x01);
    pub const EMPHASIZED: Self = Self(0x08);
    pub const DOUBLE_HEIGHT: Self = Self(0x10);
    pub const DOUBLE_WIDTH: Self = Self(0x20);
    pub const UNDERLINE: Self = Self(0x80);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PrintMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// # Select Print Mode (ESC ! n)
///
/// Replaces all print mode flags at once; `PrintMode::NORMAL` clears them.
pub fn select_print_mode(mode: PrintMode) -> Vec<u8> {
    vec![ESC, b'!', mode.bits()]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Largest character multiplier accepted by `GS !`.
pub const MAX_TEXT_SCALE: u8 = 8;

/// Clamp a text scale multiplier to `1..=8`.
#[inline]
pub fn clamp_scale(scale: u8) -> u8 {
    scale.clamp(1, MAX_TEXT_SCALE)
}

/// # Select Character Size (GS ! n)
///
/// Width multiplier goes in the high nibble, height in the low nibble, each
/// stored as `multiplier - 1`. Multipliers are clamped to `1..=8`.
///
/// ```
/// use struk::protocol::text::text_size;
///
/// assert_eq!(text_size(2, 2), vec![0x1D, 0x21, 0x11]);
/// assert_eq!(text_size(0, 9), vec![0x1D, 0x21, 0x07]);
/// ```
pub fn text_size(width: u8, height: u8) -> Vec<u8> {
    let w = clamp_scale(width) - 1;
    let h = clamp_scale(height) - 1;
    vec![GS, b'!', (w << 4) | h]
}
