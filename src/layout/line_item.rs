//! # Line Item Rows
//!
//! An item renders as one or more rows:
//!
//! ```text
//! 2  Nasi Goreng Spesial Dengan       30.000 Rp
//!    Telur Mata Sapi
//! ├──────── column_width ──────────┤ └ subtotal ┘
//! ```
//!
//! The lead text is `"{quantity}  {name}"`, wrapped at the column width.
//! The first row is padded to the column, followed by one space and the
//! subtotal. Continuation rows are indented by three spaces and padded to
//! the column; the subtotal is not repeated.

use tracing::debug;

use super::{display_width, pad_right, wrap};
use crate::error::{Result, StrukError};
use crate::model::Item;
use crate::money::{NumberFormat, format_money};

/// Indent placed before every continuation row.
pub const ITEM_INDENT: &str = "   ";

/// Formats [`Item`]s into fixed-width rows.
///
/// ## Example
///
/// ```
/// use struk::layout::LineItemFormatter;
/// use struk::model::Item;
///
/// let item = Item::new("Kopi Susu", 2, 15000, 0, "Rp");
/// let rows = LineItemFormatter::new(20).format(&item);
/// assert_eq!(rows, vec![format!("{:<20} 30.000 Rp", "2  Kopi Susu")]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemFormatter {
    column_width: usize,
    line_width: Option<usize>,
    number_format: NumberFormat,
}

impl LineItemFormatter {
    /// Create a formatter with the given name column width.
    pub fn new(column_width: usize) -> Self {
        Self {
            column_width: column_width.max(1),
            line_width: None,
            number_format: NumberFormat::default(),
        }
    }

    /// Limit the first row to `line_width` columns (the paper width).
    pub fn line_width(mut self, line_width: usize) -> Self {
        self.line_width = Some(line_width);
        self
    }

    /// Use a different separator pair for subtotals.
    pub fn number_format(mut self, fmt: NumberFormat) -> Self {
        self.number_format = fmt;
        self
    }

    pub fn column_width(&self) -> usize {
        self.column_width
    }

    /// Format an item, failing if the first row cannot fit the paper width.
    pub fn try_format(&self, item: &Item) -> Result<Vec<String>> {
        let subtotal = self.subtotal_text(item);
        let column = self.fit_column(display_width(&subtotal))?;
        Ok(self.layout(item, &subtotal, column))
    }

    /// Format an item.
    ///
    /// When the first row would overflow the paper width, the name column is
    /// narrowed to `line_width - subtotal - 1` (at least one column) and the
    /// name rewrapped into it.
    pub fn format(&self, item: &Item) -> Vec<String> {
        let subtotal = self.subtotal_text(item);
        let subtotal_width = display_width(&subtotal);
        let column = match self.fit_column(subtotal_width) {
            Ok(column) => column,
            Err(err) => {
                let narrowed = self
                    .line_width
                    .unwrap_or(self.column_width)
                    .saturating_sub(subtotal_width + 1)
                    .max(1);
                debug!(%err, narrowed, "narrowing item column");
                narrowed
            }
        };
        self.layout(item, &subtotal, column)
    }

    fn subtotal_text(&self, item: &Item) -> String {
        format_money(item.subtotal(), item.currency(), &self.number_format)
    }

    fn fit_column(&self, subtotal_width: usize) -> Result<usize> {
        match self.line_width {
            Some(line_width) if self.column_width + 1 + subtotal_width > line_width => {
                Err(StrukError::FormattingOverflow {
                    column_width: self.column_width,
                    subtotal_width,
                    line_width,
                })
            }
            _ => Ok(self.column_width),
        }
    }

    fn layout(&self, item: &Item, subtotal: &str, column: usize) -> Vec<String> {
        let lead = format!("{}  {}", item.quantity(), item.name());
        let mut wrapped = wrap(&lead, column).into_iter();

        let first = wrapped.next().unwrap_or_default();
        let mut rows = vec![format!("{} {}", pad_right(&first, column), subtotal)];
        rows.extend(wrapped.map(|line| pad_right(&format!("{ITEM_INDENT}{line}"), column)));
        rows
    }
}

/// Format `item` with the default separators and no paper limit.
pub fn format_item(item: &Item, column_width: usize) -> Vec<String> {
    LineItemFormatter::new(column_width).format(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(name: &str, qty: i64, price: i64, discount: i64) -> Item {
        Item::new(name, qty, price, discount, "Rp")
    }

    #[test]
    fn test_short_item_is_single_row() {
        let rows = format_item(&item("Kopi", 1, 15000, 0), 35);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], format!("{:<35} 15.000 Rp", "1  Kopi"));
    }

    #[test]
    fn test_subtotal_uses_discounted_unit_price() {
        let rows = format_item(&item("Roti", 3, 10000, 2000), 35);
        assert!(rows[0].ends_with(" 24.000 Rp"));
    }

    #[test]
    fn test_long_name_wraps_with_indent() {
        let rows = format_item(
            &item("Nasi Goreng Spesial Dengan Telur Mata Sapi", 2, 15000, 0),
            20,
        );
        assert_eq!(
            rows,
            vec![
                format!("{:<20} 30.000 Rp", "2  Nasi Goreng"),
                "   Spesial Dengan Telur".to_string(),
                format!("{:<20}", "   Mata Sapi"),
            ]
        );
    }

    #[test]
    fn test_continuation_rows_are_at_least_column_wide() {
        let rows = format_item(
            &item("a fairly long product description that wraps", 1, 1, 0),
            12,
        );
        assert!(rows.len() > 1);
        for row in &rows[1..] {
            assert!(row.starts_with(ITEM_INDENT));
            assert!(display_width(row) >= 12);
        }
    }

    #[test]
    fn test_subtotal_not_repeated() {
        let rows = format_item(&item("one two three four five six", 1, 5000, 0), 10);
        let with_subtotal = rows.iter().filter(|r| r.contains("5.000 Rp")).count();
        assert_eq!(with_subtotal, 1);
    }

    #[test]
    fn test_try_format_reports_overflow() {
        let formatter = LineItemFormatter::new(35).line_width(40);
        let err = formatter.try_format(&item("Kopi", 1, 15000, 0)).unwrap_err();
        assert!(matches!(
            err,
            StrukError::FormattingOverflow {
                column_width: 35,
                subtotal_width: 9,
                line_width: 40
            }
        ));
    }

    #[test]
    fn test_format_narrows_column_on_overflow() {
        let formatter = LineItemFormatter::new(35).line_width(40);
        let rows = formatter.format(&item("Kopi", 1, 15000, 0));
        // 40 - 9 - 1 = 30 column name field
        assert_eq!(rows[0], format!("{:<30} 15.000 Rp", "1  Kopi"));
        assert_eq!(display_width(&rows[0]), 40);
    }

    #[test]
    fn test_format_within_line_width_is_unchanged() {
        let formatter = LineItemFormatter::new(35).line_width(48);
        let it = item("Kopi", 1, 15000, 0);
        assert_eq!(formatter.format(&it), format_item(&it, 35));
        assert!(formatter.try_format(&it).is_ok());
    }

    #[test]
    fn test_zero_column_width_does_not_panic() {
        let rows = format_item(&item("Kopi", 1, 1000, 0), 0);
        assert!(!rows.is_empty());
        assert!(rows[0].ends_with("1.000 Rp"));
    }

    #[test]
    fn test_item_keeps_own_currency() {
        let it = Item::new("Tea", 1, 2000, 0, "USD");
        assert!(format_item(&it, 10)[0].ends_with("2.000 USD"));
    }
}
