//! # CUPS Transport
//!
//! Submits a raw job with `lp -d <queue> -o raw`, streaming print data to
//! its standard input. The job is queued when the pipe closes.

use std::io::{Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, info};

use crate::error::{Result, StrukError};

/// CUPS submission command
const LP: &str = "lp";

/// Raw job piped into `lp`
pub struct CupsTransport {
    queue: String,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl CupsTransport {
    /// Start a raw job on CUPS queue `queue`.
    pub fn open(queue: &str) -> Result<Self> {
        Self::open_with(LP, queue)
    }

    fn open_with(program: &str, queue: &str) -> Result<Self> {
        let queue = queue.trim();
        if queue.is_empty() {
            return Err(StrukError::InvalidTransportDescriptor(
                "cups transport needs a queue name".to_string(),
            ));
        }

        let mut child = Command::new(program)
            .args(["-d", queue, "-o", "raw"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StrukError::Transport(format!("Failed to run {}: {}", program, e)))?;

        let stdin = child.stdin.take();
        debug!(queue, "lp started");

        Ok(Self {
            queue: queue.to_string(),
            child,
            stdin,
        })
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| StrukError::Transport("CUPS job already submitted".to_string()))?;
        stdin
            .write_all(data)
            .map_err(|e| StrukError::Transport(format!("Write to lp failed: {}", e)))
    }

    /// Close the pipe and wait for `lp` to accept the job.
    pub fn finish(&mut self) -> Result<()> {
        let Some(stdin) = self.stdin.take() else {
            return Ok(());
        };
        drop(stdin);

        let status = self
            .child
            .wait()
            .map_err(|e| StrukError::Transport(format!("Waiting for lp failed: {}", e)))?;

        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = self.child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            return Err(StrukError::Transport(format!(
                "lp exited with {}: {}",
                status,
                stderr.trim()
            )));
        }

        info!(queue = %self.queue, "job queued");
        Ok(())
    }
}
