//! # Network Transport
//!
//! Raw TCP printing. Most receipt printers accept ESC/POS on port 9100.

use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, StrukError};

/// Connect and write timeout
const TIMEOUT: Duration = Duration::from_secs(5);

/// TCP connection to a network printer
pub struct NetworkTransport {
    addr: SocketAddr,
    stream: TcpStream,
    finished: bool,
}

impl NetworkTransport {
    /// Connect to `descriptor`.
    ///
    /// The descriptor is either `host` (combined with `port`) or a full
    /// `host:port`.
    pub fn connect(descriptor: &str, port: u16) -> Result<Self> {
        let addr = resolve(descriptor, port)?;

        info!(%addr, "connecting to printer");
        let stream = TcpStream::connect_timeout(&addr, TIMEOUT)
            .map_err(|e| StrukError::Transport(format!("{}: {}", addr, e)))?;
        stream
            .set_write_timeout(Some(TIMEOUT))
            .map_err(|e| StrukError::Transport(format!("{}: {}", addr, e)))?;

        Ok(Self {
            addr,
            stream,
            finished: false,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(data)
            .map_err(|e| StrukError::Transport(format!("Write failed: {}", e)))
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        self.stream
            .flush()
            .map_err(|e| StrukError::Transport(format!("Flush failed: {}", e)))?;
        // the printer may already have closed its side
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            debug!(error = %e, "shutdown after print");
        }
        Ok(())
    }
}

/// Resolve `host` or `host:port` to a socket address.
pub fn resolve(descriptor: &str, port: u16) -> Result<SocketAddr> {
    let descriptor = descriptor.trim();
    if descriptor.is_empty() {
        return Err(StrukError::InvalidTransportDescriptor(
            "network transport needs a host".to_string(),
        ));
    }

    if let Ok(addr) = descriptor.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let lookup = match descriptor.rsplit_once(':') {
        Some((host, p)) if !host.contains(':') && p.parse::<u16>().is_ok() => {
            descriptor.to_socket_addrs()
        }
        _ => (descriptor, port).to_socket_addrs(),
    };

    lookup
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| {
            StrukError::InvalidTransportDescriptor(format!("Invalid address: {}", descriptor))
        })
}
