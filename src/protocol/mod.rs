//! # ESC/POS Command Builders
//!
//! Byte builders for the small ESC/POS subset the receipt driver needs.
//! Each function returns the bytes for one command; nothing here does I/O.
//!
//! ## Module Structure
//!
//! - [`commands`]: initialize, feed, cut, cash drawer pulse, margins
//! - [`text`]: justification, emphasis, print modes, character size
//! - [`graphics`]: raster bit images for logos
//! - [`qr`]: the printer's native QR code function
//!
//! ## Usage Example
//!
//! ```
//! use struk::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::justify(text::Justification::Center));
//! data.extend(text::emphasis(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::emphasis(false));
//! data.extend(commands::cut());
//! ```
//!
//! Multi-byte integers are little-endian, as in the rest of the protocol.

pub mod commands;
pub mod graphics;
pub mod qr;
pub mod text;
