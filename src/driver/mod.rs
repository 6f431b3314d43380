//! # Printer Drivers
//!
//! The sequencer talks to a [`PrinterDriver`], never to bytes or sockets.
//! Every call becomes one [`Op`]; a driver only has to decide what to do
//! with an op and how to release the device.
//!
//! ## Available Drivers
//!
//! | Driver | Output |
//! |--------|--------|
//! | [`EscPosDriver`] | ESC/POS bytes into any [`PrintSink`](crate::transport::PrintSink) |
//! | [`RecordingDriver`] | an in-memory [`Program`](crate::ir::Program) |

pub mod escpos;
pub mod recording;

use std::path::Path;

use crate::error::Result;
use crate::ir::Op;
use crate::protocol::graphics::ImageMode;
use crate::protocol::qr::QrErrorLevel;
use crate::protocol::text::{Justification, PrintMode, clamp_scale};

pub use escpos::EscPosDriver;
pub use recording::RecordingDriver;

/// A device that executes printer ops in program order.
///
/// Implementors provide [`execute`](Self::execute) and
/// [`close`](Self::close); the named commands are thin wrappers that build
/// the matching [`Op`].
pub trait PrinterDriver {
    /// Run a single op.
    fn execute(&mut self, op: Op) -> Result<()>;

    /// Release the device. Called once per print run.
    fn close(&mut self) -> Result<()>;

    fn initialize(&mut self) -> Result<()> {
        self.execute(Op::Init)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.execute(Op::Text(text.to_string()))
    }

    fn feed(&mut self, lines: u8) -> Result<()> {
        self.execute(Op::Feed(lines))
    }

    fn set_justification(&mut self, justification: Justification) -> Result<()> {
        self.execute(Op::SetJustification(justification))
    }

    fn set_emphasis(&mut self, enabled: bool) -> Result<()> {
        self.execute(Op::SetEmphasis(enabled))
    }

    fn select_print_mode(&mut self, mode: PrintMode) -> Result<()> {
        self.execute(Op::SelectPrintMode(mode))
    }

    /// Character scale; each multiplier is clamped to 1..=8.
    fn set_text_size(&mut self, width: u8, height: u8) -> Result<()> {
        self.execute(Op::SetTextSize {
            width: clamp_scale(width),
            height: clamp_scale(height),
        })
    }

    fn set_left_margin(&mut self, dots: u16) -> Result<()> {
        self.execute(Op::SetLeftMargin(dots))
    }

    fn graphics_image(&mut self, path: &Path, mode: ImageMode) -> Result<()> {
        self.execute(Op::Image {
            path: path.to_path_buf(),
            mode,
        })
    }

    fn qr_code(&mut self, data: &str, error_level: QrErrorLevel, module_size: u8) -> Result<()> {
        self.execute(Op::QrCode {
            data: data.to_string(),
            error_level,
            module_size,
        })
    }

    fn cut(&mut self) -> Result<()> {
        self.execute(Op::Cut)
    }

    fn pulse(&mut self, pin: u8, on_ms: u16, off_ms: u16) -> Result<()> {
        self.execute(Op::Pulse { pin, on_ms, off_ms })
    }
}

impl<D: PrinterDriver + ?Sized> PrinterDriver for &mut D {
    fn execute(&mut self, op: Op) -> Result<()> {
        (**self).execute(op)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
