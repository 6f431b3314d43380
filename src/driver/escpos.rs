//! ESC/POS driver: encodes each op and writes it straight to a sink.

use tracing::{debug, info};

use super::PrinterDriver;
use crate::error::Result;
use crate::ir::Op;
use crate::transport::PrintSink;

/// Streams ESC/POS bytes into a [`PrintSink`].
///
/// Ops are written as they arrive, so a failure mid-receipt leaves the
/// earlier commands on the wire.
pub struct EscPosDriver<S: PrintSink> {
    sink: S,
    bytes_written: usize,
}

impl<S: PrintSink> EscPosDriver<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: PrintSink> PrinterDriver for EscPosDriver<S> {
    fn execute(&mut self, op: Op) -> Result<()> {
        let bytes = op.to_bytes()?;
        debug!(?op, len = bytes.len(), "escpos");
        self.sink.write_all(&bytes)?;
        self.bytes_written += bytes.len();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        info!(bytes = self.bytes_written, "closing printer");
        self.sink.finish()
    }
}
