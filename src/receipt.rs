//! # Receipt
//!
//! The data behind one printed receipt: merchant, items, totals and the
//! optional extras (QR payload, logo, text scale).
//!
//! ## Derived Values
//!
//! Two fields are never set directly:
//!
//! | Field | Rule | Recomputed on |
//! |-------|------|---------------|
//! | discount | Σ quantity × per-unit discount | `add_item`, `calculate_discount` |
//! | tax | subtotal / 100 × percentage, integer math | `set_tax`, `set_subtotal` |
//!
//! Subtotal and total are caller-supplied. They are not summed from the
//! items, since callers often fold in fees computed elsewhere.
//!
//! ## Example
//!
//! ```
//! use struk::receipt::Receipt;
//!
//! let mut receipt = Receipt::new();
//! receipt.set_currency("Rp");
//! receipt.add_item("Kopi Susu", 2, 15000, 500);
//! receipt.set_subtotal(29000);
//! receipt.set_tax(10.0);
//!
//! assert_eq!(receipt.discount(), 1000);
//! assert_eq!(receipt.tax(), 2900);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrukError};
use crate::model::{Item, Store};
use crate::money::Amount;
use crate::protocol::text::clamp_scale;

/// Currency used until [`Receipt::set_currency`] is called.
pub const DEFAULT_CURRENCY: &str = "da";

/// Date stamp format used by [`Receipt::stamp_now`].
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One receipt's worth of data.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    store: Option<Store>,
    items: Vec<Item>,
    phones: Vec<String>,
    date: String,
    currency: String,
    subtotal: Amount,
    discount: Amount,
    tax_percentage: Option<f64>,
    tax: Amount,
    total: Amount,
    request_amount: Amount,
    qr_code: Option<String>,
    logo: Option<PathBuf>,
    text_size: (u8, u8),
}

impl Default for Receipt {
    fn default() -> Self {
        Self {
            store: None,
            items: Vec::new(),
            phones: Vec::new(),
            date: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            subtotal: 0,
            discount: 0,
            tax_percentage: None,
            tax: 0,
            total: 0,
            request_amount: 0,
            qr_code: None,
            logo: None,
            text_size: (1, 1),
        }
    }
}

impl Receipt {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Setters
    // ========================================================================

    pub fn set_store(
        &mut self,
        mid: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        website: impl Into<String>,
    ) {
        self.store = Some(Store::new(mid, name, address, email, website));
    }

    /// Currency for items added from now on.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    /// Set the date to the current local time.
    pub fn stamp_now(&mut self) {
        self.date = chrono::Local::now().format(DATE_FORMAT).to_string();
    }

    /// Replace the phone numbers printed under the address.
    pub fn add_phones<I, S>(&mut self, phones: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones = phones.into_iter().map(Into::into).collect();
    }

    pub fn set_subtotal(&mut self, subtotal: Amount) {
        self.subtotal = subtotal;
        self.recompute_tax();
    }

    pub fn set_total(&mut self, total: Amount) {
        self.total = total;
    }

    /// Append an item priced in the current currency.
    pub fn add_item(&mut self, name: impl Into<String>, quantity: i64, price: Amount, discount: Amount) {
        self.items
            .push(Item::new(name, quantity, price, discount, self.currency.clone()));
        self.calculate_discount();
    }

    pub fn set_request_amount(&mut self, amount: Amount) {
        self.request_amount = amount;
    }

    /// Set the tax percentage and recompute the tax amount.
    ///
    /// Both the subtotal and the percentage are truncated to whole numbers,
    /// then `tax = subtotal / 100 * percentage` in integer arithmetic. A
    /// subtotal of 999 at 10% gives 90.
    pub fn set_tax(&mut self, percentage: f64) {
        self.tax_percentage = Some(percentage);
        self.recompute_tax();
    }

    /// Recompute the discount from the items. Returns the new value.
    pub fn calculate_discount(&mut self) -> Amount {
        self.discount = self
            .items
            .iter()
            .map(Item::total_discount)
            .fold(0, i64::saturating_add);
        self.discount
    }

    pub fn set_qr_code(&mut self, payload: impl Into<String>) {
        self.qr_code = Some(payload.into());
    }

    pub fn set_logo(&mut self, path: impl Into<PathBuf>) {
        self.logo = Some(path.into());
    }

    /// Text scale for the whole receipt, each factor clamped to 1..=8.
    pub fn set_text_size(&mut self, width: u8, height: u8) {
        self.text_size = (clamp_scale(width), clamp_scale(height));
    }

    fn recompute_tax(&mut self) {
        self.tax = match self.tax_percentage {
            Some(percentage) => (self.subtotal / 100).saturating_mul(percentage.trunc() as i64),
            None => 0,
        };
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    pub fn discount(&self) -> Amount {
        self.discount
    }

    pub fn tax_percentage(&self) -> Option<f64> {
        self.tax_percentage
    }

    pub fn tax(&self) -> Amount {
        self.tax
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn request_amount(&self) -> Amount {
        self.request_amount
    }

    pub fn qr_code(&self) -> Option<&str> {
        self.qr_code.as_deref()
    }

    pub fn logo(&self) -> Option<&Path> {
        self.logo.as_deref()
    }

    pub fn text_size(&self) -> (u8, u8) {
        self.text_size
    }
}

// ============================================================================
// ORDER FILES
// ============================================================================

/// A sold line as written in an order file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
    pub price: Amount,
    #[serde(default)]
    pub discount: Amount,
}

/// Text scale as written in an order file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSize {
    pub width: u8,
    pub height: u8,
}

/// A receipt described as JSON.
///
/// ```json
/// {
///   "store": { "mid": "123-456", "name": "Warung Kopi", "address": "Jl. Braga 12" },
///   "currency": "Rp",
///   "items": [ { "name": "Kopi Susu", "quantity": 2, "price": 15000 } ],
///   "subtotal": 30000,
///   "tax_percentage": 10,
///   "total": 33000
/// }
/// ```
///
/// Missing `date` means "now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub store: Store,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub subtotal: Amount,
    #[serde(default)]
    pub total: Amount,
    #[serde(default)]
    pub tax_percentage: Option<f64>,
    #[serde(default)]
    pub request_amount: Amount,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub logo: Option<PathBuf>,
    #[serde(default)]
    pub text_size: Option<TextSize>,
}

impl Order {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StrukError::Config(format!("Invalid order: {}", e)))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| StrukError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Build the receipt through the regular setters.
    ///
    /// The currency is applied before any item is added, so every item
    /// carries the order's currency.
    pub fn into_receipt(self) -> Receipt {
        let mut receipt = Receipt::new();

        if let Some(currency) = self.currency {
            receipt.set_currency(currency);
        }
        let store = self.store;
        receipt.set_store(
            store.mid(),
            store.name(),
            store.address(),
            store.email(),
            store.website(),
        );
        match self.date {
            Some(date) => receipt.set_date(date),
            None => receipt.stamp_now(),
        }
        receipt.add_phones(self.phones);
        for item in self.items {
            receipt.add_item(item.name, item.quantity, item.price, item.discount);
        }
        receipt.set_subtotal(self.subtotal);
        receipt.set_total(self.total);
        if let Some(percentage) = self.tax_percentage {
            receipt.set_tax(percentage);
        }
        receipt.set_request_amount(self.request_amount);
        if let Some(payload) = self.qr_code {
            receipt.set_qr_code(payload);
        }
        if let Some(logo) = self.logo {
            receipt.set_logo(logo);
        }
        if let Some(size) = self.text_size {
            receipt.set_text_size(size.width, size.height);
        }
        receipt
    }
}

// ============================================================================
// TESTS
// ============================================================================
