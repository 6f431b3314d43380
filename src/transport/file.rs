//! # File Transport
//!
//! Writes raw print data to a file or to standard output. Useful with
//! printers exposed as device files (`/dev/usb/lp0`) and for debugging.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Result, StrukError};

enum Target {
    Stdout(io::Stdout),
    File(File),
}

/// File or stdout sink
pub struct FileTransport {
    target: Target,
}

impl FileTransport {
    /// Open `path` for writing. Empty or `-` means standard output.
    ///
    /// Regular files are truncated; device files are written as-is.
    pub fn open(path: &str) -> Result<Self> {
        if path.is_empty() || path == "-" {
            return Ok(Self::stdout());
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(Path::new(path))
            .map_err(|e| {
                StrukError::InvalidTransportDescriptor(format!("Failed to open {}: {}", path, e))
            })?;

        Ok(Self {
            target: Target::File(file),
        })
    }

    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout(io::stdout()),
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self.target, Target::Stdout(_))
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let result = match &mut self.target {
            Target::Stdout(out) => out.write_all(data),
            Target::File(file) => file.write_all(data),
        };
        result.map_err(|e| StrukError::Transport(format!("Write failed: {}", e)))
    }

    pub fn finish(&mut self) -> Result<()> {
        let result = match &mut self.target {
            Target::Stdout(out) => out.flush(),
            Target::File(file) => file.flush(),
        };
        result.map_err(|e| StrukError::Transport(format!("Flush failed: {}", e)))
    }
}
