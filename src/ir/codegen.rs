//! # Code Generation
//!
//! Converts ops to ESC/POS bytes.

use super::ops::{Op, Program};
use crate::error::Result;
use crate::protocol::graphics::{MAX_LOGO_WIDTH, RasterImage};
use crate::protocol::{commands, qr, text};

impl Op {
    /// Encode this op as ESC/POS bytes.
    ///
    /// Only `Image` can fail, when the file cannot be read or decoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            // ===== Printer Control =====
            Op::Init => commands::init(),
            Op::Feed(n) => commands::feed_lines(*n),
            Op::Cut => commands::cut(),
            Op::Pulse { pin, on_ms, off_ms } => commands::pulse(*pin, *on_ms, *off_ms),

            // ===== Style Changes =====
            Op::SetJustification(j) => text::justify(*j),
            Op::SetEmphasis(enabled) => text::emphasis(*enabled),
            Op::SelectPrintMode(mode) => text::select_print_mode(*mode),
            Op::SetTextSize { width, height } => text::text_size(*width, *height),
            Op::SetLeftMargin(dots) => commands::left_margin(*dots),

            // ===== Content =====
            Op::Text(s) => s.as_bytes().to_vec(),
            Op::Image { path, mode } => RasterImage::load(path, MAX_LOGO_WIDTH)?.encode(*mode),
            Op::QrCode {
                data,
                error_level,
                module_size,
            } => qr::qr_code(data, *error_level, *module_size),
        };
        Ok(bytes)
    }
}

impl Program {
    /// Compile the whole program to ESC/POS bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for op in &self.ops {
            out.extend(op.to_bytes()?);
        }
        Ok(out)
    }
}
