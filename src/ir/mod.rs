//! # Print Commands (IR)
//!
//! Abstract printer commands that sit between the receipt sequencer and a
//! concrete driver.
//!
//! ```text
//! ┌───────────┐     ┌──────────────┐     ┌─────────────┐     ┌───────────┐
//! │ Sequencer │ ──► │ PrinterDriver│ ──► │  Op (IR)    │ ──► │ Codegen   │
//! │           │     │   methods    │     │             │     │ (ESC/POS) │
//! └───────────┘     └──────────────┘     └─────────────┘     └───────────┘
//! ```
//!
//! The recording driver keeps the ops as a [`Program`] so a print run can be
//! inspected without a printer (`struk print --dry-run`, tests).
//!
//! ## Example
//!
//! ```
//! use struk::ir::{Op, Program};
//! use struk::protocol::text::Justification;
//!
//! let mut program = Program::new();
//! program.push(Op::Init);
//! program.push(Op::SetJustification(Justification::Center));
//! program.push(Op::Text("HELLO\n".into()));
//! program.push(Op::Cut);
//!
//! let bytes = program.to_bytes().unwrap();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```

mod codegen;
mod ops;

pub use ops::*;
