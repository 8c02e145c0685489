//! Display-width helpers for panel text.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marks where text was cut.
pub const ELLIPSIS: char = '…';

/// Display width of `s` in terminal columns.
#[inline]
#[must_use]
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Fit `text` into `max` columns, cutting on grapheme boundaries and marking
/// the cut with an ellipsis. Wide graphemes are never split.
///
/// ```
/// use n_panels::text::truncate;
///
/// assert_eq!(truncate("src/lib.rs", 20), "src/lib.rs");
/// assert_eq!(truncate("src/lib.rs", 6), "src/l…");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> Cow<'_, str> {
    if text.width() <= max {
        return Cow::Borrowed(text);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }

    let room = max - 1;
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > room {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Pad `text` with spaces to `width` columns.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let w = text.width();
    let mut out = String::with_capacity(text.len() + width.saturating_sub(w));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(w)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        assert!(matches!(truncate("abc", 3), Cow::Borrowed("abc")));
    }

    #[test]
    fn wide_graphemes_are_not_split() {
        // Each CJK char is two columns: two fit in 5 with the ellipsis.
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(display_width(&truncate("日本語テキスト", 6)), 5);
    }

    #[test]
    fn combining_marks_stay_with_base() {
        let text = "e\u{301}e\u{301}e\u{301}";
        assert_eq!(truncate(text, 2), "e\u{301}…");
    }

    #[test]
    fn zero_column_limit() {
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 1), "…");
    }

    #[test]
    fn pad_to_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("日", 3), "日 ");
        assert_eq!(pad("long", 2), "long");
    }
}
