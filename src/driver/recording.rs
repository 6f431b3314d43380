//! In-memory driver that keeps every op. Used for dry runs and tests.

use super::PrinterDriver;
use crate::error::{Result, StrukError};
use crate::ir::{Op, Program};

/// Records ops into a [`Program`] instead of printing.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    program: Program,
    close_calls: usize,
    text_calls: usize,
    fail_on_text: Option<usize>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`-th `Text` op (1-based) fail with a transport error.
    pub fn fail_on_text(mut self, n: usize) -> Self {
        self.fail_on_text = Some(n);
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    /// How many times `close` was called.
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    pub fn is_closed(&self) -> bool {
        self.close_calls > 0
    }
}

impl PrinterDriver for RecordingDriver {
    fn execute(&mut self, op: Op) -> Result<()> {
        if self.is_closed() {
            return Err(StrukError::Transport("driver already closed".to_string()));
        }
        if let Op::Text(_) = op {
            self.text_calls += 1;
            if self.fail_on_text == Some(self.text_calls) {
                return Err(StrukError::Transport(format!(
                    "simulated failure on text call {}",
                    self.text_calls
                )));
            }
        }
        self.program.push(op);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        Ok(())
    }
}
