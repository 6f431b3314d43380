//! # Printer Module
//!
//! Printer-side settings: layout widths, drawer pulse, QR parameters,
//! receipt labels and the transport to use.
//!
//! ## Modules
//!
//! - [`config`]: settings and JSON loading

pub mod config;

pub use config::{DrawerPulse, PrinterConfig, QrSettings, ReceiptLabels};
