//! # Printer Transport Layer
//!
//! Byte sinks that carry encoded print data to a device.
//!
//! ## Available Transports
//!
//! | Selector | Descriptor | Transport |
//! |----------|------------|-----------|
//! | `cups` | CUPS queue name | [`cups::CupsTransport`] (`lp -o raw`) |
//! | `windows` | spooler printer name | [`windows::WindowsTransport`] |
//! | `network` | `host` or `host:port` | [`network::NetworkTransport`] |
//! | `file` | path, `-` for stdout | [`file::FileTransport`] |
//!
//! ## Unknown Selectors
//!
//! By default an unknown selector falls back to the file transport writing
//! to standard output, which is handy when piping a receipt into a hexdump.
//! Set [`TransportConfig::strict`] to turn that into
//! [`StrukError::InvalidTransportDescriptor`].

pub mod cups;
pub mod file;
pub mod network;
pub mod windows;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{Result, StrukError};

pub use cups::CupsTransport;
pub use file::FileTransport;
pub use network::NetworkTransport;
pub use windows::WindowsTransport;

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Destination for encoded print data.
///
/// `finish` ends the job: flushes buffers, waits for spoolers and releases
/// the connection. Calling it twice is harmless.
pub trait PrintSink {
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

impl PrintSink for Vec<u8> {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Transport selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Cups,
    Windows,
    Network,
    #[default]
    File,
}

impl TransportKind {
    /// Parse a selector, falling back to [`TransportKind::File`] for
    /// anything unrecognized.
    pub fn from_selector(selector: &str) -> Self {
        selector.parse().unwrap_or_else(|_| {
            warn!(selector, "unknown transport selector, writing to stdout");
            Self::File
        })
    }
}

impl FromStr for TransportKind {
    type Err = StrukError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cups" => Ok(Self::Cups),
            "windows" => Ok(Self::Windows),
            "network" => Ok(Self::Network),
            "file" => Ok(Self::File),
            other => Err(StrukError::InvalidTransportDescriptor(format!(
                "Unknown transport '{}'. Use cups, windows, network or file",
                other
            ))),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cups => "cups",
            Self::Windows => "windows",
            Self::Network => "network",
            Self::File => "file",
        };
        f.write_str(name)
    }
}

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Selector string (`cups`, `windows`, `network`, `file`)
    pub kind: String,
    /// Queue name, host or path depending on `kind`
    pub descriptor: String,
    /// Port for network printers without an explicit `host:port`
    pub port: u16,
    /// Reject unknown selectors instead of falling back to stdout
    pub strict: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::File.to_string(),
            descriptor: String::new(),
            port: DEFAULT_PORT,
            strict: false,
        }
    }
}

impl TransportConfig {
    pub fn new(kind: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            descriptor: descriptor.into(),
            ..Self::default()
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve the selector, honoring `strict`.
    ///
    /// Returns the kind plus whether it was a fallback (in which case the
    /// descriptor is ignored and stdout is used).
    pub fn resolve(&self) -> Result<(TransportKind, bool)> {
        if self.strict {
            return Ok((self.kind.parse()?, false));
        }
        match self.kind.parse() {
            Ok(kind) => Ok((kind, false)),
            Err(_) => Ok((TransportKind::from_selector(&self.kind), true)),
        }
    }
}

/// An open connection to a printer.
pub enum Transport {
    Cups(CupsTransport),
    Windows(WindowsTransport),
    Network(NetworkTransport),
    File(FileTransport),
}

impl Transport {
    /// Open the transport described by `config`.
    #[instrument(skip(config), fields(kind = %config.kind, descriptor = %config.descriptor))]
    pub fn open(config: &TransportConfig) -> Result<Self> {
        let (kind, fallback) = config.resolve()?;

        let transport = match kind {
            TransportKind::Cups => Self::Cups(CupsTransport::open(&config.descriptor)?),
            TransportKind::Windows => Self::Windows(WindowsTransport::open(&config.descriptor)?),
            TransportKind::Network => {
                Self::Network(NetworkTransport::connect(&config.descriptor, config.port)?)
            }
            TransportKind::File if fallback => Self::File(FileTransport::stdout()),
            TransportKind::File => Self::File(FileTransport::open(&config.descriptor)?),
        };

        info!(%kind, "transport open");
        Ok(transport)
    }

    pub fn kind(&self) -> TransportKind {
        match self {
            Self::Cups(_) => TransportKind::Cups,
            Self::Windows(_) => TransportKind::Windows,
            Self::Network(_) => TransportKind::Network,
            Self::File(_) => TransportKind::File,
        }
    }
}

impl PrintSink for Transport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        match self {
            Self::Cups(t) => t.write_all(data),
            Self::Windows(t) => t.write_all(data),
            Self::Network(t) => t.write_all(data),
            Self::File(t) => t.write_all(data),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self {
            Self::Cups(t) => t.finish(),
            Self::Windows(t) => t.finish(),
            Self::Network(t) => t.finish(),
            Self::File(t) => t.finish(),
        }
    }
}
