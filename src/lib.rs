//! # Struk - Sale Receipts for ESC/POS Printers
//!
//! Struk lays a sale out as a fixed-width receipt and prints it on an
//! ESC/POS thermal printer. It provides:
//!
//! - **Layout**: wrapped item names with right-aligned subtotals, summary rows
//! - **Receipt data**: items, totals and the derived discount and tax
//! - **Sequencing**: a fixed command order from initialize to drawer kick
//! - **Transport**: CUPS, Windows spooler, raw TCP and file output
//!
//! ## Quick Start
//!
//! ```no_run
//! use struk::{EscPosDriver, PrinterConfig, Receipt, Sequencer};
//! use struk::transport::{Transport, TransportConfig};
//!
//! let mut receipt = Receipt::new();
//! receipt.set_store("123-456", "Warung Kopi", "Jl. Braga 12", "", "");
//! receipt.set_currency("Rp");
//! receipt.add_item("Kopi Susu", 2, 15000, 0);
//! receipt.set_subtotal(30000);
//! receipt.set_tax(10.0);
//! receipt.set_total(33000);
//! receipt.stamp_now();
//!
//! let mut sequencer: Sequencer<EscPosDriver<Transport>> = Sequencer::new(PrinterConfig::default());
//! sequencer.connect(&TransportConfig::new("network", "192.168.1.50"))?;
//! sequencer.print_receipt(&mut receipt, true)?;
//!
//! # Ok::<(), struk::StrukError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`money`] | Amount grouping and currency suffix |
//! | [`model`] | Store and item records |
//! | [`layout`] | Fixed-width text layout |
//! | [`receipt`] | Receipt data and order files |
//! | [`sequencer`] | Print state machine |
//! | [`driver`] | Printer driver trait and implementations |
//! | [`ir`] | Printer ops and ESC/POS code generation |
//! | [`protocol`] | ESC/POS command builders |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Printer settings |
//! | [`error`] | Error types |

pub mod driver;
pub mod error;
pub mod ir;
pub mod layout;
pub mod model;
pub mod money;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod sequencer;
pub mod transport;

// Re-exports for convenience
pub use driver::{EscPosDriver, PrinterDriver, RecordingDriver};
pub use error::StrukError;
pub use printer::PrinterConfig;
pub use receipt::{Order, Receipt};
pub use sequencer::{SequenceState, Sequencer};
