//! # Print Sequencer
//!
//! Turns a [`Receipt`] into an ordered run of driver calls:
//!
//! ```text
//! initialize → logo → store header → title → items → totals → QR
//!            → footer → cut → drawer pulse → close
//! ```
//!
//! ## States
//!
//! ```text
//! Uninitialized ─attach/connect─▶ Connected ─▶ HeaderEmitted ─▶ BodyEmitted
//!                                                                   │
//!        Closed ◀── Finalized ◀── TotalsEmitted ◀──────────────────┘
//! ```
//!
//! States only move forward. A print run owns the driver until it ends and
//! closes it exactly once, whether the run succeeded or not. After that the
//! sequencer is `Closed`; attach a new driver to print again.
//!
//! A driver that is still attached when it is replaced, or when the
//! sequencer is dropped, is closed at that point.
//!
//! ## Line Endings
//!
//! Summary rows and the date are sent without a newline; the feed that
//! follows ends the line. Header and item text carry their own `\n`.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::driver::{EscPosDriver, PrinterDriver};
use crate::error::{Result, StrukError};
use crate::layout::{LineItemFormatter, dashed_line, pad_right, summary_line};
use crate::model::Store;
use crate::printer::PrinterConfig;
use crate::protocol::graphics::ImageMode;
use crate::protocol::text::{Justification, PrintMode};
use crate::receipt::Receipt;
use crate::transport::{Transport, TransportConfig};

/// Width of the merchant id header line.
const MID_COLUMNS: usize = 16;

/// Where a sequencer is in its print run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SequenceState {
    Uninitialized,
    Connected,
    HeaderEmitted,
    BodyEmitted,
    TotalsEmitted,
    Finalized,
    Closed,
}

/// Drives a [`PrinterDriver`] through a receipt.
pub struct Sequencer<D: PrinterDriver> {
    driver: Option<D>,
    state: SequenceState,
    config: PrinterConfig,
}

impl<D: PrinterDriver> Sequencer<D> {
    pub fn new(config: PrinterConfig) -> Self {
        Self {
            driver: None,
            state: SequenceState::Uninitialized,
            config,
        }
    }

    /// Use `driver` for the next print run, closing any driver it replaces.
    pub fn attach(&mut self, driver: D) {
        if let Some(mut previous) = self.driver.replace(driver) {
            if let Err(err) = previous.close() {
                warn!(%err, "closing replaced driver failed");
            }
        }
        self.state = SequenceState::Connected;
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn driver(&self) -> Option<&D> {
        self.driver.as_ref()
    }

    // ========================================================================
    // Receipts
    // ========================================================================

    /// Print a full receipt, then cut, kick the drawer and close.
    #[instrument(skip(self, receipt), fields(items = receipt.items().len()))]
    pub fn print_receipt(&mut self, receipt: &mut Receipt, with_items: bool) -> Result<()> {
        let mut driver = self.driver.take().ok_or(StrukError::DriverNotInitialized)?;
        let result = self.full_run(&mut driver, receipt, with_items);
        self.finish(driver, result)
    }

    /// Print only the item rows, then cut and close.
    #[instrument(skip(self, receipt), fields(items = receipt.items().len()))]
    pub fn print_receipt_v(&mut self, receipt: &mut Receipt, with_items: bool) -> Result<()> {
        let mut driver = self.driver.take().ok_or(StrukError::DriverNotInitialized)?;
        let result = self.compact_run(&mut driver, receipt, with_items);
        self.finish(driver, result)
    }

    fn full_run(&mut self, driver: &mut D, receipt: &mut Receipt, with_items: bool) -> Result<()> {
        let labels = self.config.labels.clone();
        let fmt = self.config.number_format;
        let currency = receipt.currency().to_string();

        // Setup
        driver.initialize()?;
        driver.select_print_mode(PrintMode::NORMAL)?;
        driver.set_left_margin(self.config.left_margin)?;
        driver.set_justification(Justification::Center)?;
        let text_size = receipt.text_size();
        apply_text_size(driver, text_size)?;

        if let Some(logo) = receipt.logo() {
            driver.feed(1)?;
            driver.graphics_image(logo, self.config.image_mode)?;
            driver.feed(1)?;
        }

        // Store header
        let store = match receipt.store() {
            Some(store) => store.clone(),
            None => {
                warn!("receipt has no store, printing an empty header");
                Store::default()
            }
        };
        driver.select_print_mode(PrintMode::DOUBLE_WIDTH)?;
        driver.feed(2)?;
        driver.text(&format!("{}\n", store.name()))?;
        normal_mode(driver, text_size)?;
        driver.text(&format!("{}\n", store.address()))?;
        for phone in receipt.phones() {
            driver.text(&format!("{}\n", phone))?;
        }
        let mid = format!("{}{}", labels.merchant_id, store.mid());
        driver.text(&format!("{}\n", pad_right(&mid, MID_COLUMNS)))?;
        driver.feed(1)?;

        driver.set_emphasis(true)?;
        driver.text(&format!("{}\n", labels.title))?;
        driver.set_emphasis(false)?;
        driver.feed(1)?;
        self.advance(SequenceState::HeaderEmitted);

        if with_items {
            self.emit_items(driver, receipt)?;
        }
        self.advance(SequenceState::BodyEmitted);

        // Totals
        let discount = receipt.calculate_discount();
        driver.set_emphasis(true)?;
        driver.text(&summary_line(
            &labels.subtotal,
            receipt.subtotal(),
            &currency,
            false,
            &fmt,
        ))?;
        driver.set_emphasis(false)?;
        driver.feed(1)?;
        driver.text(&summary_line(&labels.discount, discount, &currency, false, &fmt))?;
        if receipt.tax() != 0 {
            driver.feed(1)?;
            driver.text(&summary_line(&labels.tax, receipt.tax(), &currency, false, &fmt))?;
        }
        driver.feed(2)?;

        driver.select_print_mode(PrintMode::DOUBLE_WIDTH)?;
        driver.text(&summary_line(&labels.total, receipt.total(), &currency, true, &fmt))?;
        driver.feed(1)?;
        normal_mode(driver, text_size)?;

        if let Some(payload) = receipt.qr_code() {
            driver.qr_code(payload, self.config.qr.error_level, self.config.qr.module_size)?;
        }
        self.advance(SequenceState::TotalsEmitted);

        // Footer
        driver.feed(1)?;
        driver.set_justification(Justification::Center)?;
        driver.text(&format!("{}\n", labels.footer))?;
        driver.feed(1)?;
        driver.text(receipt.date())?;
        driver.feed(2)?;

        driver.cut()?;
        let drawer = self.config.drawer;
        driver.pulse(drawer.pin, drawer.on_ms, drawer.off_ms)?;
        self.advance(SequenceState::Finalized);
        Ok(())
    }

    fn compact_run(&mut self, driver: &mut D, receipt: &mut Receipt, with_items: bool) -> Result<()> {
        self.advance(SequenceState::HeaderEmitted);
        if with_items {
            self.emit_items(driver, receipt)?;
        }
        self.advance(SequenceState::BodyEmitted);
        self.advance(SequenceState::TotalsEmitted);
        driver.cut()?;
        self.advance(SequenceState::Finalized);
        Ok(())
    }

    fn emit_items(&self, driver: &mut D, receipt: &mut Receipt) -> Result<()> {
        receipt.calculate_discount();

        let mut formatter = LineItemFormatter::new(self.config.item_column_width)
            .number_format(self.config.number_format);
        if let Some(columns) = self.config.paper_columns {
            formatter = formatter.line_width(columns);
        }

        driver.set_justification(Justification::Left)?;
        for item in receipt.items() {
            let rows = formatter.format(item);
            driver.text(&format!("{}\n", rows.join("\n")))?;
        }
        driver.feed(1)
    }

    /// Close the driver once and settle on `Closed`.
    fn finish(&mut self, mut driver: D, result: Result<()>) -> Result<()> {
        let closed = driver.close();
        self.state = SequenceState::Closed;

        match (result, closed) {
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(%close_err, "close failed after print error");
                Err(err)
            }
            (Ok(()), Err(close_err)) => Err(close_err),
            (Ok(()), Ok(())) => {
                info!("receipt printed");
                Ok(())
            }
        }
    }

    fn advance(&mut self, next: SequenceState) {
        debug_assert!(next > self.state, "{:?} -> {:?}", self.state, next);
        debug!(from = ?self.state, to = ?next, "sequence");
        self.state = next;
    }

    // ========================================================================
    // Ad-hoc operations
    // ========================================================================

    fn driver_mut(&mut self) -> Result<&mut D> {
        self.driver.as_mut().ok_or(StrukError::DriverNotInitialized)
    }

    pub fn feed(&mut self, lines: u8) -> Result<()> {
        self.driver_mut()?.feed(lines)
    }

    pub fn cut(&mut self) -> Result<()> {
        self.driver_mut()?.cut()
    }

    /// Print a separator of configured width.
    pub fn print_dashed_line(&mut self) -> Result<()> {
        let line = dashed_line(self.config.dashed_line_width);
        self.driver_mut()?.text(&format!("{}\n", line))
    }

    /// Print the receipt's logo, if it has one.
    pub fn print_logo(&mut self, receipt: &Receipt) -> Result<()> {
        let mode = self.config.image_mode;
        match receipt.logo() {
            Some(logo) => self.print_image(logo, mode),
            None => Ok(()),
        }
    }

    pub fn print_image(&mut self, path: &Path, mode: ImageMode) -> Result<()> {
        let driver = self.driver_mut()?;
        driver.feed(1)?;
        driver.graphics_image(path, mode)?;
        driver.feed(1)
    }

    /// Print the receipt's QR code, if it has one.
    pub fn print_qr_code(&mut self, receipt: &Receipt) -> Result<()> {
        let qr = self.config.qr;
        match receipt.qr_code() {
            Some(payload) => self
                .driver_mut()?
                .qr_code(payload, qr.error_level, qr.module_size),
            None => Ok(()),
        }
    }

    pub fn open_drawer(&mut self, pin: u8, on_ms: u16, off_ms: u16) -> Result<()> {
        self.driver_mut()?.pulse(pin, on_ms, off_ms)
    }

    /// Apply a text scale; factors outside 1..=8 are clamped.
    pub fn set_text_size(&mut self, width: u8, height: u8) -> Result<()> {
        self.driver_mut()?.set_text_size(width, height)
    }

    /// Close the attached driver.
    pub fn close(&mut self) -> Result<()> {
        let driver = self.driver.take().ok_or(StrukError::DriverNotInitialized)?;
        self.finish(driver, Ok(()))
    }
}

impl<D: PrinterDriver> Drop for Sequencer<D> {
    fn drop(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            debug!("closing driver left attached");
            if let Err(err) = driver.close() {
                warn!(%err, "closing driver on drop failed");
            }
        }
    }
}

/// Scale text when the receipt asks for more than 1×1.
fn apply_text_size<D: PrinterDriver>(driver: &mut D, (width, height): (u8, u8)) -> Result<()> {
    if (width, height) != (1, 1) {
        driver.set_text_size(width, height)?;
    }
    Ok(())
}

/// `ESC !` also resets the character size, so the receipt scale is sent again.
fn normal_mode<D: PrinterDriver>(driver: &mut D, text_size: (u8, u8)) -> Result<()> {
    driver.select_print_mode(PrintMode::NORMAL)?;
    apply_text_size(driver, text_size)
}

impl Sequencer<EscPosDriver<Transport>> {
    /// Open a transport and attach an ESC/POS driver on top of it.
    pub fn connect(&mut self, transport: &TransportConfig) -> Result<()> {
        let transport = Transport::open(transport)?;
        self.attach(EscPosDriver::new(transport));
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::RecordingDriver;
    use crate::ir::Op;
    use pretty_assertions::assert_eq;

    fn sample_receipt() -> Receipt {
        let mut receipt = Receipt::new();
        receipt.set_store("123-456", "Warung Kopi", "Jl. Braga 12", "", "");
        receipt.set_currency("Rp");
        receipt.set_date("2026-01-20 12:00:00");
        receipt.add_item("Kopi Susu", 2, 15000, 0);
        receipt.set_subtotal(30000);
        receipt.set_total(30000);
        receipt
    }

    #[test]
    fn test_new_is_uninitialized() {
        let sequencer: Sequencer<RecordingDriver> = Sequencer::new(PrinterConfig::default());
        assert_eq!(sequencer.state(), SequenceState::Uninitialized);
        assert!(sequencer.driver().is_none());
    }

    #[test]
    fn test_attach_connects() {
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(RecordingDriver::new());
        assert_eq!(sequencer.state(), SequenceState::Connected);
    }

    #[test]
    fn test_print_without_driver() {
        let mut sequencer: Sequencer<RecordingDriver> = Sequencer::new(PrinterConfig::default());
        let err = sequencer.print_receipt(&mut sample_receipt(), true).unwrap_err();
        assert!(matches!(err, StrukError::DriverNotInitialized));
        assert!(matches!(sequencer.feed(1), Err(StrukError::DriverNotInitialized)));
        assert_eq!(sequencer.state(), SequenceState::Uninitialized);
    }

    #[test]
    fn test_full_run_ends_closed() {
        let mut driver = RecordingDriver::new();
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);
        sequencer.print_receipt(&mut sample_receipt(), true).unwrap();
        assert_eq!(sequencer.state(), SequenceState::Closed);
        assert!(matches!(
            sequencer.print_receipt(&mut sample_receipt(), true),
            Err(StrukError::DriverNotInitialized)
        ));
        drop(sequencer);

        assert_eq!(driver.close_calls(), 1);
        let ops = &driver.program().ops;
        assert_eq!(ops[0], Op::Init);
        assert_eq!(
            &ops[ops.len() - 2..],
            &[
                Op::Cut,
                Op::Pulse {
                    pin: 0,
                    on_ms: 120,
                    off_ms: 240
                }
            ]
        );
    }

    #[test]
    fn test_text_size_applied_only_when_scaled() {
        let mut driver = RecordingDriver::new();
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);
        sequencer.print_receipt(&mut sample_receipt(), false).unwrap();
        drop(sequencer);
        assert!(
            !driver
                .program()
                .iter()
                .any(|op| matches!(op, Op::SetTextSize { .. }))
        );
    }

    #[test]
    fn test_text_size_follows_every_normal_mode() {
        let mut receipt = sample_receipt();
        receipt.set_text_size(2, 2);
        let mut driver = RecordingDriver::new();
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);
        sequencer.print_receipt(&mut receipt, false).unwrap();
        drop(sequencer);

        let scaled = Op::SetTextSize {
            width: 2,
            height: 2,
        };
        let ops = &driver.program().ops;
        assert_eq!(ops[4], scaled);

        let normal_modes: Vec<usize> = ops
            .iter()
            .enumerate()
            .skip(5)
            .filter(|(_, op)| **op == Op::SelectPrintMode(PrintMode::NORMAL))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(normal_modes.len(), 2);
        for i in normal_modes {
            assert_eq!(ops[i + 1], scaled, "after op {}", i);
        }
    }

    #[test]
    fn test_compact_without_items() {
        let mut driver = RecordingDriver::new();
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);
        sequencer.print_receipt_v(&mut sample_receipt(), false).unwrap();
        drop(sequencer);
        assert_eq!(driver.program().ops, vec![Op::Cut]);
        assert_eq!(driver.close_calls(), 1);
    }

    #[test]
    fn test_failed_step_still_closes_once() {
        let mut driver = RecordingDriver::new().fail_on_text(3);
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);
        let err = sequencer.print_receipt(&mut sample_receipt(), true).unwrap_err();
        assert!(matches!(err, StrukError::Transport(_)));
        assert_eq!(sequencer.state(), SequenceState::Closed);
        drop(sequencer);
        assert_eq!(driver.close_calls(), 1);
        assert!(!driver.program().iter().any(|op| *op == Op::Cut));
    }

    #[test]
    fn test_replaced_driver_is_closed() {
        let mut first = RecordingDriver::new();
        let mut second = RecordingDriver::new();
        let mut sequencer = Sequencer::new(PrinterConfig::default());

        sequencer.attach(&mut first);
        sequencer.cut().unwrap();
        sequencer.attach(&mut second);
        sequencer.cut().unwrap();
        assert_eq!(sequencer.state(), SequenceState::Connected);
        drop(sequencer);

        assert_eq!(first.close_calls(), 1);
        assert_eq!(second.close_calls(), 1);
        assert_eq!(first.program().ops, vec![Op::Cut]);
        assert_eq!(second.program().ops, vec![Op::Cut]);
    }

    #[test]
    fn test_drop_after_print_does_not_close_again() {
        let mut driver = RecordingDriver::new();
        {
            let mut sequencer = Sequencer::new(PrinterConfig::default());
            sequencer.attach(&mut driver);
            sequencer.print_receipt_v(&mut sample_receipt(), true).unwrap();
        }
        assert_eq!(driver.close_calls(), 1);
    }

    #[test]
    fn test_ad_hoc_operations() {
        let mut driver = RecordingDriver::new();
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);

        let mut receipt = Receipt::new();
        receipt.set_qr_code("INV-1");
        sequencer.print_dashed_line().unwrap();
        sequencer.print_logo(&receipt).unwrap();
        sequencer.print_qr_code(&receipt).unwrap();
        sequencer.open_drawer(1, 50, 100).unwrap();
        sequencer.set_text_size(9, 0).unwrap();
        sequencer.feed(3).unwrap();
        sequencer.cut().unwrap();
        sequencer.close().unwrap();
        assert!(matches!(sequencer.close(), Err(StrukError::DriverNotInitialized)));
        drop(sequencer);

        assert_eq!(
            driver.program().ops,
            vec![
                Op::Text(format!("{}\n", "-".repeat(32))),
                Op::QrCode {
                    data: "INV-1".into(),
                    error_level: Default::default(),
                    module_size: 8
                },
                Op::Pulse {
                    pin: 1,
                    on_ms: 50,
                    off_ms: 100
                },
                Op::SetTextSize {
                    width: 8,
                    height: 1
                },
                Op::Feed(3),
                Op::Cut,
            ]
        );
        assert_eq!(driver.close_calls(), 1);
    }

    #[test]
    fn test_print_image_feeds_around() {
        let mut driver = RecordingDriver::new();
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);
        sequencer
            .print_image(Path::new("logo.png"), ImageMode::BitImage)
            .unwrap();
        drop(sequencer);
        assert_eq!(
            driver.program().ops,
            vec![
                Op::Feed(1),
                Op::Image {
                    path: "logo.png".into(),
                    mode: ImageMode::BitImage
                },
                Op::Feed(1),
            ]
        );
        assert_eq!(driver.close_calls(), 1);
    }
}
