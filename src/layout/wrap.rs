//! Word wrapping that only breaks at whitespace.

/// Wrap `text` into lines of at most `width` columns.
///
/// Lines break at whitespace, and the character used for a break is
/// dropped. Tabs and newlines count as single spaces, so a name can never
/// break the fixed-width layout. Runs of spaces inside a line are kept
/// (`"2  Kopi"` stays intact). A word wider than `width` is never split;
/// it gets a line of its own and that line is longer than `width`.
///
/// Always returns at least one line. A `width` of zero behaves like one.
///
/// ```
/// use struk::layout::wrap;
///
/// assert_eq!(wrap("1  Nasi Goreng", 8), vec!["1  Nasi", "Goreng"]);
/// ```
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut started = false;

    for word in text.split(char::is_whitespace) {
        let word_len = word.chars().count();

        if !started {
            // continuation lines never start with the blank left by a double space
            if word.is_empty() && !lines.is_empty() {
                continue;
            }
            current.push_str(word);
            current_len = word_len;
            started = true;
            continue;
        }

        if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            if word.is_empty() {
                started = false;
                current_len = 0;
            } else {
                current.push_str(word);
                current_len = word_len;
            }
        }
    }

    if started || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap("2  Kopi Susu", 35), vec!["2  Kopi Susu"]);
    }

    #[test]
    fn test_breaks_at_spaces() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_exact_fit_does_not_break() {
        assert_eq!(wrap("abcd efgh", 9), vec!["abcd efgh"]);
    }

    #[test]
    fn test_long_word_gets_own_line() {
        let long = "x".repeat(20);
        let text = format!("1  {} end", long);
        assert_eq!(wrap(&text, 10), vec!["1 ".to_string(), long, "end".to_string()]);
    }

    #[test]
    fn test_no_line_starts_with_blank_from_double_space() {
        let lines = wrap("aaaa  bbbb", 4);
        assert_eq!(lines, vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn test_tabs_and_newlines_are_spaces() {
        assert_eq!(wrap("1  Nasi\tGoreng", 35), vec!["1  Nasi Goreng"]);
        assert_eq!(wrap("Es\nTeh\r\nManis", 6), vec!["Es Teh", "Manis"]);
        assert!(wrap("a\nb\nc d", 3).iter().all(|l| !l.contains('\n')));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_zero_width_does_not_panic() {
        assert_eq!(wrap("a b", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_counts_chars() {
        // "café" is 4 columns but 5 bytes
        assert_eq!(wrap("café bar", 8), vec!["café bar"]);
    }
}
