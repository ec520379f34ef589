//! Display - the cell-grid output seam.
//!
//! The drawer talks to the display only through this trait: move the cursor,
//! pick colors and attributes, write text, clear and flush. The terminal
//! host implements it with crossterm commands; [`FrameBuffer`] implements it
//! in memory for tests and headless runs.
//!
//! [`FrameBuffer`]: super::FrameBuffer

use crate::error::Result;
use crate::types::{Attr, Color};

/// A fixed-size character-grid display.
pub trait Display {
    /// Size in cells as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Move the write position to `(x, y)`.
    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    /// Colors for subsequent writes.
    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()>;

    /// Attributes for subsequent writes.
    fn set_attrs(&mut self, _attrs: Attr) -> Result<()> {
        Ok(())
    }

    /// Write text at the write position and advance it.
    ///
    /// Callers keep the text inside the grid.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Blank every cell.
    fn clear(&mut self) -> Result<()>;

    /// Push buffered output to the device.
    fn flush(&mut self) -> Result<()>;
}
