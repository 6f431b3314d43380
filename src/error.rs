//! # Error Types
//!
//! This module defines error types used throughout the struk library.

use thiserror::Error;

/// Main error type for struk operations
#[derive(Debug, Error)]
pub enum StrukError {
    /// A print operation was requested before a driver was attached
    #[error("Printer driver not initialized")]
    DriverNotInitialized,

    /// Transport selector or descriptor could not be used to open a connection
    #[error("Invalid transport descriptor: {0}")]
    InvalidTransportDescriptor(String),

    /// Item column too narrow for the paper width.
    ///
    /// Only surfaced by `LineItemFormatter::try_format`; regular formatting
    /// falls back to a narrower name column.
    #[error(
        "Formatting overflow: column {column_width} + subtotal {subtotal_width} exceeds {line_width} columns"
    )]
    FormattingOverflow {
        column_width: usize,
        subtotal_width: usize,
        line_width: usize,
    },

    /// Transport-level errors (connection, write, spooler)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Logo or image could not be loaded
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration or order file problems
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for struk operations
pub type Result<T> = std::result::Result<T, StrukError>;
