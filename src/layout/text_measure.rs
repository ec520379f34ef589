//! Text Measurement
//!
//! Utilities for measuring text dimensions in display cells.
//!
//! Display width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width and control characters: 0 cells

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Measure the display width of a string in cells.
pub fn string_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// Display width of one character in cells.
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_wide() {
        assert_eq!(string_width("日本"), 4);
        assert_eq!(char_width('語'), 2);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(char_width('\u{200B}'), 0);
    }
}
