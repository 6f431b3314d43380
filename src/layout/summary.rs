//! Label/value rows printed under the items.

use super::{pad_left, pad_right};
use crate::money::{Amount, NumberFormat, format_money};

/// Label column width for normal text.
pub const LABEL_COLUMNS: usize = 12;
/// Value column width for normal text.
pub const VALUE_COLUMNS: usize = 20;

/// Render a summary row.
///
/// The label fills a left column of 12 characters and the value is
/// right-aligned in a column of 20. Double-width text halves both columns
/// (6 and 10) so the row still spans the same paper width.
///
/// ```
/// use struk::layout::summary_line;
/// use struk::money::NumberFormat;
///
/// let row = summary_line("TOTAL:", 15000, "Rp", true, &NumberFormat::default());
/// assert_eq!(row, "TOTAL: 15.000 Rp");
/// ```
pub fn summary_line(
    label: &str,
    value: Amount,
    currency: &str,
    double_width: bool,
    fmt: &NumberFormat,
) -> String {
    let (left, right) = if double_width {
        (LABEL_COLUMNS / 2, VALUE_COLUMNS / 2)
    } else {
        (LABEL_COLUMNS, VALUE_COLUMNS)
    };

    let value = format_money(value, currency, fmt);
    format!("{}{}", pad_right(label, left), pad_left(&value, right))
}

/// A row of `width` dashes.
pub fn dashed_line(width: usize) -> String {
    "-".repeat(width)
}
