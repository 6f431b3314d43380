//! # Money Formatting
//!
//! Receipt amounts are whole currency units (`i64`). There are no fractional
//! cents on these receipts, so formatting is only digit grouping plus the
//! currency symbol.
//!
//! ```
//! use struk::money::{NumberFormat, format_amount, format_money};
//!
//! let fmt = NumberFormat::default();
//! assert_eq!(format_amount(1_250_000, &fmt), "1.250.000");
//! assert_eq!(format_money(15_000, "Rp", &fmt), "15.000 Rp");
//! ```

use serde::{Deserialize, Serialize};

/// A currency amount in whole units.
pub type Amount = i64;

/// Separator pair used when rendering amounts.
///
/// The decimal separator is never printed for whole-unit amounts but is kept
/// so a profile can be described completely (`"1.000,00"` style locales).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

impl NumberFormat {
    /// Comma grouping, dot decimals (`1,000.00`).
    pub const fn english() -> Self {
        Self {
            thousands_separator: ',',
            decimal_separator: '.',
        }
    }
}

/// Group the digits of `amount` by thousands.
pub fn format_amount(amount: Amount, fmt: &NumberFormat) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(fmt.thousands_separator);
        }
        out.push(ch);
    }
    out
}

/// Grouped amount followed by a space and the currency symbol.
pub fn format_money(amount: Amount, currency: &str, fmt: &NumberFormat) -> String {
    format!("{} {}", format_amount(amount, fmt), currency)
}
