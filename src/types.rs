//! Core types for spark-grid.
//!
//! These types define the foundation that everything builds on.
//! They flow from the component tree through layout into the renderer.

// =============================================================================
// Color
// =============================================================================

/// A character-grid color.
///
/// The sixteen named colors map onto the standard terminal palette, so they
/// render the same on every display. `Rgb` is passed through for displays
/// that support true color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Let the display pick (terminal default).
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
    Rgb(u8, u8, u8),
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const UNDERLINE = 1 << 1;
        const INVERSE = 1 << 2;
    }
}

// =============================================================================
// Cell - The atomic unit of grid rendering
// =============================================================================

/// A single grid cell.
///
/// This is what a display deals with. The renderer computes these, the
/// display shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Rect - Computed node geometry
// =============================================================================

/// A rectangle in display cells.
///
/// The origin is signed: content inside a scrolled container can start above
/// or left of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x + self.width as i32
            && y >= self.y
            && y < self.y + self.height as i32
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Overlap of two rects (zero-sized when they do not overlap).
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(
            x,
            y,
            (right - x).clamp(0, u16::MAX as i32) as u16,
            (bottom - y).clamp(0, u16::MAX as i32) as u16,
        )
    }
}

// =============================================================================
// Dimension - Explicit size directives
// =============================================================================

/// Explicit width/height directive.
///
/// When present on a node's style it overrides the node's natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Fixed number of cells.
    Cells(u16),
    /// Whatever the parent makes available.
    FillParent,
    /// The whole display extent, regardless of the parent.
    FillDisplay,
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        Self::Cells(value)
    }
}

// =============================================================================
// Flex Enums - For layout
// =============================================================================

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

impl FlexDirection {
    /// Check if this is a row direction.
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }
}

/// Justify content (main axis distribution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Align items (cross axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    Start,
    Center,
    End,
}

// =============================================================================
// Style - Parsed layout and style directives
// =============================================================================

/// Default gap between siblings along the main axis.
pub const DEFAULT_GAP: u16 = 1;

/// Layout and style directives carried by every node.
///
/// Unset colors fall back to the theme defaults for the node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub direction: FlexDirection,
    pub justify: JustifyContent,
    pub align: AlignItems,
    pub gap: u16,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub attrs: Attr,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: FlexDirection::Column,
            justify: JustifyContent::Start,
            align: AlignItems::Start,
            gap: DEFAULT_GAP,
            fg: None,
            bg: None,
            width: None,
            height: None,
            attrs: Attr::NONE,
        }
    }
}

impl Style {
    /// Row layout with default spacing.
    pub fn row() -> Self {
        Self {
            direction: FlexDirection::Row,
            ..Self::default()
        }
    }

    /// Column layout with default spacing.
    pub fn column() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 4));
        assert!(!rect.contains(6, 4));
        assert!(!rect.contains(2, 5));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 5);
        let b = Rect::new(4, 2, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(4, 2, 6, 3));

        let c = Rect::new(20, 20, 2, 2);
        let none = a.intersect(&c);
        assert_eq!((none.width, none.height), (0, 0));
    }

    #[test]
    fn test_rect_negative_origin() {
        let rect = Rect::new(-3, -1, 5, 3);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(-3, -1));
        assert!(!rect.contains(2, 0));
        assert_eq!(rect.right(), 2);
        assert_eq!(rect.bottom(), 2);
    }

    #[test]
    fn test_style_defaults() {
        let style = Style::default();
        assert_eq!(style.direction, FlexDirection::Column);
        assert_eq!(style.gap, DEFAULT_GAP);
        assert!(style.width.is_none());
        assert!(Style::row().direction.is_row());
    }
}
