//! # Printer Configuration
//!
//! Everything the sequencer needs to know about the device and the shop's
//! conventions, loadable from a JSON settings file. Every field has a
//! default, so a settings file only lists what differs:
//!
//! ```json
//! {
//!   "name": "Kasir Depan",
//!   "labels": { "footer": "Terima kasih" },
//!   "transport": { "kind": "network", "descriptor": "192.168.1.50" }
//! }
//! ```
//!
//! ## Defaults
//!
//! | Setting | Value |
//! |---------|-------|
//! | Item name column | 35 characters |
//! | Paper limit | none |
//! | Left margin | 1 dot |
//! | Image mode | auto |
//! | Drawer pulse | pin 0, 120 ms on, 240 ms off |
//! | QR | level L, module size 8 |
//! | Dashed line | 32 characters |
//! | Transport | file, stdout |

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrukError};
use crate::money::NumberFormat;
use crate::protocol::graphics::ImageMode;
use crate::protocol::qr::QrErrorLevel;
use crate::transport::TransportConfig;

/// Cash drawer kick parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerPulse {
    pub pin: u8,
    pub on_ms: u16,
    pub off_ms: u16,
}

impl Default for DrawerPulse {
    fn default() -> Self {
        Self {
            pin: 0,
            on_ms: 120,
            off_ms: 240,
        }
    }
}

/// QR code parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSettings {
    pub error_level: QrErrorLevel,
    pub module_size: u8,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            error_level: QrErrorLevel::L,
            module_size: 8,
        }
    }
}

/// Fixed texts printed on every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptLabels {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    /// Prefix of the merchant id header line
    pub merchant_id: String,
    pub title: String,
    pub footer: String,
}

impl Default for ReceiptLabels {
    fn default() -> Self {
        Self {
            subtotal: "Subtotal:".to_string(),
            discount: "Discount:".to_string(),
            tax: "Tax:".to_string(),
            total: "TOTAL:".to_string(),
            merchant_id: "No: ".to_string(),
            title: "RECEIPT".to_string(),
            footer: "Thank you for your visit".to_string(),
        }
    }
}

impl ReceiptLabels {
    /// French labels.
    pub fn french() -> Self {
        Self {
            subtotal: "Sous-Total:".to_string(),
            discount: "Remise:".to_string(),
            tax: "Tax:".to_string(),
            total: "TOTAL:".to_string(),
            merchant_id: "N°: ".to_string(),
            title: "REÇU".to_string(),
            footer: "Merci pour votre visite".to_string(),
        }
    }

    /// Indonesian labels.
    pub fn indonesian() -> Self {
        Self {
            subtotal: "Subtotal:".to_string(),
            discount: "Diskon:".to_string(),
            tax: "Pajak:".to_string(),
            total: "TOTAL:".to_string(),
            merchant_id: "MID: ".to_string(),
            title: "STRUK".to_string(),
            footer: "Terima kasih atas kunjungan Anda".to_string(),
        }
    }
}

/// # Printer Configuration
///
/// ## Layout
///
/// - **item_column_width**: width of the item name column; the subtotal
///   follows it after one space
/// - **paper_columns**: when set, item rows are kept within this many
///   characters by narrowing the name column
/// - **dashed_line_width**: length of separator lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Human-readable printer name
    pub name: String,
    pub item_column_width: usize,
    pub paper_columns: Option<usize>,
    pub dashed_line_width: usize,
    /// Left margin in dots
    pub left_margin: u16,
    /// `auto` and `bit_image` print a raster; `column_format` prints `ESC *` bands
    pub image_mode: ImageMode,
    pub drawer: DrawerPulse,
    pub qr: QrSettings,
    pub labels: ReceiptLabels,
    pub number_format: NumberFormat,
    pub transport: TransportConfig,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            name: "Receipt printer".to_string(),
            item_column_width: 35,
            paper_columns: None,
            dashed_line_width: 32,
            left_margin: 1,
            image_mode: ImageMode::Auto,
            drawer: DrawerPulse::default(),
            qr: QrSettings::default(),
            labels: ReceiptLabels::default(),
            number_format: NumberFormat::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl PrinterConfig {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| StrukError::Config(format!("Invalid printer settings: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| StrukError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.item_column_width == 0 {
            return Err(StrukError::Config(
                "item_column_width must be at least 1".to_string(),
            ));
        }
        if self.drawer.pin > 1 {
            return Err(StrukError::Config(format!(
                "drawer pin must be 0 or 1, got {}",
                self.drawer.pin
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
