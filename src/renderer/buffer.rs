//! FrameBuffer - an in-memory display.
//!
//! A 2D grid of cells with flat row-major storage (`index = y * width + x`).
//! It implements [`Display`], so the drawer can paint into it exactly as it
//! paints onto a terminal. Tests read the result back with [`FrameBuffer::get`]
//! and [`FrameBuffer::row_text`].

use crate::error::Result;
use crate::layout::char_width;
use crate::types::{Attr, Cell, Color};

use super::display::Display;

/// Marker stored in the cell after a wide character.
pub const CONTINUATION: char = '\0';

/// A 2D buffer of display cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    fg: Color,
    bg: Color,
    attrs: Attr,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            cursor: (0, 0),
            fg: Color::Reset,
            bg: Color::Reset,
            attrs: Attr::NONE,
        }
    }

    /// Get buffer width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) to flat index.
    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    /// Characters of row `y`, wide-character continuations skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|cell| cell.ch)
            .filter(|&ch| ch != CONTINUATION)
            .collect()
    }

    /// Every row as text, joined with newlines.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Change the size, blanking every cell.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
        self.cursor = (0, 0);
    }

    fn put(&mut self, ch: char) {
        let (x, y) = self.cursor;
        if !self.in_bounds(x, y) {
            return;
        }
        let index = self.index(x, y);
        self.cells[index] = Cell {
            ch,
            fg: self.fg,
            bg: self.bg,
            attrs: self.attrs,
        };
        self.cursor.0 = x.saturating_add(1);
    }
}

impl Display for FrameBuffer {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        self.fg = fg;
        self.bg = bg;
        Ok(())
    }

    fn set_attrs(&mut self, attrs: Attr) -> Result<()> {
        self.attrs = attrs;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            match char_width(ch) {
                0 => {}
                1 => self.put(ch),
                _ => {
                    self.put(ch);
                    self.put(CONTINUATION);
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.cells.fill(Cell::default());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let buffer = FrameBuffer::new(4, 2);
        assert_eq!(buffer.to_text(), "    \n    ");
        assert!(buffer.get(4, 0).is_none());
    }

    #[test]
    fn test_write_with_colors() -> Result<()> {
        let mut buffer = FrameBuffer::new(10, 2);
        buffer.set_cursor(2, 1)?;
        buffer.set_colors(Color::Red, Color::Blue)?;
        buffer.set_attrs(Attr::BOLD)?;
        buffer.write("hey")?;

        assert_eq!(buffer.row_text(1), "  hey     ");
        let cell = buffer.get(3, 1).copied().unwrap_or_default();
        assert_eq!(cell.ch, 'e');
        assert_eq!(cell.fg, Color::Red);
        assert_eq!(cell.bg, Color::Blue);
        assert!(cell.attrs.contains(Attr::BOLD));
        Ok(())
    }

    #[test]
    fn test_write_stops_at_edge() -> Result<()> {
        let mut buffer = FrameBuffer::new(4, 1);
        buffer.set_cursor(2, 0)?;
        buffer.write("abcdef")?;
        assert_eq!(buffer.row_text(0), "  ab");
        Ok(())
    }

    #[test]
    fn test_wide_chars() -> Result<()> {
        let mut buffer = FrameBuffer::new(6, 1);
        buffer.write("日本")?;
        assert_eq!(buffer.row_text(0), "日本  ");
        assert_eq!(buffer.get(1, 0).map(|c| c.ch), Some(CONTINUATION));
        Ok(())
    }

    #[test]
    fn test_clear_and_resize() -> Result<()> {
        let mut buffer = FrameBuffer::new(3, 1);
        buffer.write("abc")?;
        buffer.clear()?;
        assert_eq!(buffer.row_text(0), "   ");

        buffer.resize(5, 2);
        assert_eq!(buffer.size(), (5, 2));
        Ok(())
    }
}
