#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, hit testing, and the portal layer.

pub mod buffer;
pub mod cell;
pub mod drawing;
pub mod frame;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a single character in terminal cells.
///
/// Control characters and combining marks report 0.
#[inline]
pub fn char_width(ch: char) -> usize {
    if ch.is_ascii() {
        return match ch {
            ' '..='~' => 1,
            _ => 0,
        };
    }
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Display width of a grapheme cluster in terminal cells.
#[inline]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_ascii() {
        return grapheme.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
    }
    UnicodeWidthStr::width(grapheme)
}

/// Display width of a string in terminal cells.
#[inline]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return grapheme_width(text);
    }
    text.graphemes(true).map(grapheme_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_counts_printables() {
        assert_eq!(display_width("Clinic A"), 8);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("a\u{7}b"), 2);
    }

    #[test]
    fn wide_and_combining() {
        assert_eq!(char_width('中'), 2);
        assert_eq!(char_width('\u{0301}'), 0);
        assert_eq!(display_width("e\u{0301}"), 1);
        assert_eq!(display_width("中文"), 4);
    }
}
