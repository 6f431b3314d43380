//! # Receipt Sequence Tests
//!
//! End-to-end checks of the command order the sequencer emits for a
//! receipt, using the recording driver, plus one pass through the ESC/POS
//! driver into an in-memory sink.

use pretty_assertions::assert_eq;

use struk::driver::{EscPosDriver, RecordingDriver};
use struk::ir::Op;
use struk::printer::{PrinterConfig, ReceiptLabels};
use struk::protocol::qr::QrErrorLevel;
use struk::protocol::text::{Justification, PrintMode};
use struk::receipt::{Order, Receipt};
use struk::{SequenceState, Sequencer, StrukError};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn warung_kopi() -> Receipt {
    let mut receipt = Receipt::new();
    receipt.set_store("123-456", "Warung Kopi", "Jl. Braga 12", "kopi@example.com", "");
    receipt.set_currency("Rp");
    receipt.set_date("2026-01-20 12:00:00");
    receipt.add_phones(["022-123"]);
    receipt.add_item("Kopi Susu", 2, 15000, 0);
    receipt.set_subtotal(30000);
    receipt.set_total(33000);
    receipt
}

fn record(config: PrinterConfig, receipt: &mut Receipt, with_items: bool) -> RecordingDriver {
    let mut driver = RecordingDriver::new();
    let mut sequencer = Sequencer::new(config);
    sequencer.attach(&mut driver);
    sequencer.print_receipt(receipt, with_items).unwrap();
    drop(sequencer);
    driver
}

fn text(s: impl Into<String>) -> Op {
    Op::Text(s.into())
}

fn summary(label: &str, value: &str) -> Op {
    text(format!("{:<12}{:>20}", label, value))
}

// ============================================================================
// FULL RECEIPT
// ============================================================================

#[test]
fn test_full_receipt_op_order() {
    let mut receipt = warung_kopi();
    receipt.set_tax(10.0);
    receipt.set_qr_code("INV-001");

    let driver = record(PrinterConfig::default(), &mut receipt, true);

    let expected = vec![
        // setup
        Op::Init,
        Op::SelectPrintMode(PrintMode::NORMAL),
        Op::SetLeftMargin(1),
        Op::SetJustification(Justification::Center),
        // store header
        Op::SelectPrintMode(PrintMode::DOUBLE_WIDTH),
        Op::Feed(2),
        text("Warung Kopi\n"),
        Op::SelectPrintMode(PrintMode::NORMAL),
        text("Jl. Braga 12\n"),
        text("022-123\n"),
        text(format!("{:<16}\n", "No: 123-456")),
        Op::Feed(1),
        Op::SetEmphasis(true),
        text("RECEIPT\n"),
        Op::SetEmphasis(false),
        Op::Feed(1),
        // items
        Op::SetJustification(Justification::Left),
        text(format!("{:<35} 30.000 Rp\n", "2  Kopi Susu")),
        Op::Feed(1),
        // totals
        Op::SetEmphasis(true),
        summary("Subtotal:", "30.000 Rp"),
        Op::SetEmphasis(false),
        Op::Feed(1),
        summary("Discount:", "0 Rp"),
        Op::Feed(1),
        summary("Tax:", "3.000 Rp"),
        Op::Feed(2),
        Op::SelectPrintMode(PrintMode::DOUBLE_WIDTH),
        text("TOTAL: 33.000 Rp"),
        Op::Feed(1),
        Op::SelectPrintMode(PrintMode::NORMAL),
        Op::QrCode {
            data: "INV-001".into(),
            error_level: QrErrorLevel::L,
            module_size: 8,
        },
        // footer
        Op::Feed(1),
        Op::SetJustification(Justification::Center),
        text("Thank you for your visit\n"),
        Op::Feed(1),
        text("2026-01-20 12:00:00"),
        Op::Feed(2),
        Op::Cut,
        Op::Pulse {
            pin: 0,
            on_ms: 120,
            off_ms: 240,
        },
    ];

    assert_eq!(driver.program().ops, expected);
    assert_eq!(driver.close_calls(), 1);
}

#[test]
fn test_zero_tax_line_is_omitted() {
    let mut receipt = warung_kopi();
    let driver = record(PrinterConfig::default(), &mut receipt, true);

    let printed = driver.program().text();
    assert!(printed.contains("Discount:"));
    assert!(!printed.contains("Tax:"));
    assert!(
        !driver
            .program()
            .iter()
            .any(|op| matches!(op, Op::QrCode { .. }))
    );
}

#[test]
fn test_without_items_skips_body() {
    let mut receipt = warung_kopi();
    let driver = record(PrinterConfig::default(), &mut receipt, false);

    assert!(!driver.program().text().contains("Kopi Susu"));
    assert!(
        !driver
            .program()
            .iter()
            .any(|op| *op == Op::SetJustification(Justification::Left))
    );
}

#[test]
fn test_logo_is_framed_by_feeds() {
    let mut receipt = warung_kopi();
    receipt.set_logo("logo.png");
    let driver = record(PrinterConfig::default(), &mut receipt, false);

    let ops = &driver.program().ops;
    assert_eq!(ops[4], Op::Feed(1));
    assert!(matches!(&ops[5], Op::Image { path, .. } if path.as_os_str() == "logo.png"));
    assert_eq!(ops[6], Op::Feed(1));
}

#[test]
fn test_wrapped_item_rows() {
    let mut receipt = Receipt::new();
    receipt.set_currency("Rp");
    receipt.add_item(
        "Nasi Goreng Spesial Dengan Telur Mata Sapi Dan Kerupuk Udang",
        1,
        25000,
        0,
    );
    let driver = record(PrinterConfig::default(), &mut receipt, true);

    let row = driver
        .program()
        .iter()
        .find_map(|op| match op {
            Op::Text(s) if s.starts_with("1  Nasi") => Some(s.clone()),
            _ => None,
        })
        .unwrap();
    let lines: Vec<&str> = row.trim_end_matches('\n').split('\n').collect();

    assert!(lines.len() > 1);
    assert!(lines[0].ends_with(" 25.000 Rp"));
    assert_eq!(lines[0].chars().count(), 35 + 1 + "25.000 Rp".len());
    for line in &lines[1..] {
        assert!(line.starts_with("   "));
        assert!(line.chars().count() >= 35);
    }
}

#[test]
fn test_custom_labels_and_drawer() {
    let mut config = PrinterConfig::default();
    config.labels = ReceiptLabels::french();
    config.drawer.pin = 1;

    let mut receipt = warung_kopi();
    let driver = record(config, &mut receipt, false);

    let printed = driver.program().text();
    assert!(printed.contains("REÇU\n"));
    assert!(printed.contains(&format!("{:<16}\n", "N°: 123-456")));
    assert!(printed.contains("Merci pour votre visite\n"));
    assert_eq!(
        driver.program().ops.last(),
        Some(&Op::Pulse {
            pin: 1,
            on_ms: 120,
            off_ms: 240
        })
    );
}

// ============================================================================
// COMPACT RECEIPT
// ============================================================================

#[test]
fn test_compact_without_items_is_cut_and_close() {
    let mut driver = RecordingDriver::new();
    let mut sequencer = Sequencer::new(PrinterConfig::default());
    sequencer.attach(&mut driver);
    sequencer.print_receipt_v(&mut warung_kopi(), false).unwrap();
    drop(sequencer);

    assert_eq!(driver.program().ops, vec![Op::Cut]);
    assert_eq!(driver.close_calls(), 1);
}

#[test]
fn test_compact_with_items() {
    let mut driver = RecordingDriver::new();
    let mut sequencer = Sequencer::new(PrinterConfig::default());
    sequencer.attach(&mut driver);
    sequencer.print_receipt_v(&mut warung_kopi(), true).unwrap();
    drop(sequencer);

    assert_eq!(
        driver.program().ops,
        vec![
            Op::SetJustification(Justification::Left),
            text(format!("{:<35} 30.000 Rp\n", "2  Kopi Susu")),
            Op::Feed(1),
            Op::Cut,
        ]
    );
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_print_without_driver() {
    let mut sequencer: Sequencer<RecordingDriver> = Sequencer::new(PrinterConfig::default());
    assert!(matches!(
        sequencer.print_receipt(&mut warung_kopi(), true),
        Err(StrukError::DriverNotInitialized)
    ));
    assert!(matches!(
        sequencer.print_receipt_v(&mut warung_kopi(), true),
        Err(StrukError::DriverNotInitialized)
    ));
}

#[test]
fn test_failure_mid_sequence_closes_once() {
    for nth in 1..=8 {
        let mut driver = RecordingDriver::new().fail_on_text(nth);
        let mut sequencer = Sequencer::new(PrinterConfig::default());
        sequencer.attach(&mut driver);

        let result = sequencer.print_receipt(&mut warung_kopi(), true);
        assert!(result.is_err(), "text call {} should fail", nth);
        assert_eq!(sequencer.state(), SequenceState::Closed);
        drop(sequencer);
        assert_eq!(driver.close_calls(), 1, "text call {}", nth);
    }
}

#[test]
fn test_escpos_missing_logo_aborts() {
    let mut receipt = warung_kopi();
    receipt.set_logo("/nonexistent/logo.png");

    let mut driver = EscPosDriver::new(Vec::<u8>::new());
    let mut sequencer = Sequencer::new(PrinterConfig::default());
    sequencer.attach(&mut driver);
    let err = sequencer.print_receipt(&mut receipt, true).unwrap_err();
    drop(sequencer);

    assert!(matches!(err, StrukError::Image(_)));
    // init, print mode, margin, center, feed
    assert_eq!(driver.sink().len(), 2 + 3 + 4 + 3 + 3);
}

// ============================================================================
// ESC/POS OUTPUT
// ============================================================================

#[test]
fn test_escpos_compact_bytes() {
    let mut receipt = Receipt::new();
    receipt.set_currency("Rp");
    receipt.add_item("Teh", 1, 5000, 0);

    let mut driver = EscPosDriver::new(Vec::<u8>::new());
    let mut sequencer = Sequencer::new(PrinterConfig::default());
    sequencer.attach(&mut driver);
    sequencer.print_receipt_v(&mut receipt, true).unwrap();
    drop(sequencer);

    let mut expected = vec![0x1B, 0x61, 0x00];
    expected.extend(format!("{:<35} 5.000 Rp\n", "1  Teh").into_bytes());
    expected.extend([0x1B, 0x64, 0x01]);
    expected.extend([0x1D, 0x56, 0x41, 0x03]);
    assert_eq!(driver.sink(), &expected);
}

#[test]
fn test_summary_rows_end_with_the_feed() {
    let mut receipt = warung_kopi();
    receipt.set_tax(10.0);

    let mut driver = EscPosDriver::new(Vec::<u8>::new());
    let mut sequencer = Sequencer::new(PrinterConfig::default());
    sequencer.attach(&mut driver);
    sequencer.print_receipt(&mut receipt, false).unwrap();
    drop(sequencer);
    let bytes = driver.into_sink();

    let mut subtotal = format!("{:<12}{:>20}", "Subtotal:", "30.000 Rp").into_bytes();
    subtotal.extend([0x1B, 0x45, 0x00, 0x1B, 0x64, 0x01]);
    assert!(bytes.windows(subtotal.len()).any(|w| w == subtotal.as_slice()));

    let mut total = b"TOTAL: 33.000 Rp".to_vec();
    total.extend([0x1B, 0x64, 0x01]);
    assert!(bytes.windows(total.len()).any(|w| w == total.as_slice()));

    let mut date = b"2026-01-20 12:00:00".to_vec();
    date.extend([0x1B, 0x64, 0x02]);
    assert!(bytes.windows(date.len()).any(|w| w == date.as_slice()));
}

#[test]
fn test_order_file_prints() {
    let order = Order::from_json(
        r#"{
            "store": { "mid": "9", "name": "Toko Roti", "address": "Jl. Riau 5" },
            "currency": "Rp",
            "date": "2026-02-01 08:30:00",
            "items": [
                { "name": "Roti Tawar", "quantity": 2, "price": 12000, "discount": 1000 },
                { "name": "Donat", "quantity": 3, "price": 5000 }
            ],
            "subtotal": 37000,
            "total": 37000
        }"#,
    )
    .unwrap();
    let mut receipt = order.into_receipt();
    let driver = record(PrinterConfig::default(), &mut receipt, true);

    let printed = driver.program().text();
    assert!(printed.contains(&format!("{:<35} 22.000 Rp\n", "2  Roti Tawar")));
    assert!(printed.contains(&format!("{:<35} 15.000 Rp\n", "3  Donat")));
    assert!(printed.contains(&format!("{:<12}{:>20}", "Discount:", "2.000 Rp")));
    assert!(printed.ends_with("2026-02-01 08:30:00"));
}
