//! # IR Opcodes
//!
//! One op per driver call. Ops are plain data so a print run can be
//! recorded, compared in tests and encoded later.

use std::path::PathBuf;

use crate::protocol::graphics::ImageMode;
use crate::protocol::qr::QrErrorLevel;
use crate::protocol::text::{Justification, PrintMode};

/// Abstract printer commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Reset the printer to its power-on state.
    Init,

    /// Print and feed `n` lines.
    Feed(u8),

    /// Feed past the cutter and cut.
    Cut,

    /// Cash drawer kick on `pin` with on/off times in milliseconds.
    Pulse { pin: u8, on_ms: u16, off_ms: u16 },

    // ========== Style Changes ==========
    SetJustification(Justification),

    SetEmphasis(bool),

    /// Replace all print mode flags.
    SelectPrintMode(PrintMode),

    /// Character scale, each multiplier already clamped to 1..=8.
    SetTextSize { width: u8, height: u8 },

    /// Left margin in dots.
    SetLeftMargin(u16),

    // ========== Content ==========
    /// Text, newlines included.
    Text(String),

    /// Image file printed with a device mode hint.
    Image { path: PathBuf, mode: ImageMode },

    /// QR code built by the printer.
    QrCode {
        data: String,
        error_level: QrErrorLevel,
        module_size: u8,
    },
}

/// A recorded sequence of ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Concatenated text of every `Text` op.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
