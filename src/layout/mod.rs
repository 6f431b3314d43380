//! # Fixed-Width Layout
//!
//! Text layout for receipt bodies. Everything here is pure: strings in,
//! strings out, no printer access.
//!
//! - [`wrap`]: word wrapping at a column width
//! - [`line_item`]: item rows with wrapped names and right-aligned subtotals
//! - [`summary`]: label/value rows for subtotal, discount, tax and total
//!
//! ## Widths
//!
//! Widths count Unicode scalar values, not bytes, so `"N°"` is two columns.
//! Wide glyphs (CJK, emoji) still count as one column each.

pub mod line_item;
pub mod summary;
pub mod wrap;

pub use line_item::{ITEM_INDENT, LineItemFormatter, format_item};
pub use summary::{dashed_line, summary_line};
pub use wrap::wrap;

/// Printed width of `s` in columns.
#[inline]
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Pad `s` with trailing spaces up to `width`. Longer input is left as is.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    let mut out = String::with_capacity(s.len() + fill);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', fill));
    out
}

/// Pad `s` with leading spaces up to `width`. Longer input is left as is.
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    let mut out = String::with_capacity(s.len() + fill);
    out.extend(std::iter::repeat_n(' ', fill));
    out.push_str(s);
    out
}
