//! Scroll State - offset bookkeeping for scroll containers.
//!
//! Manages scrolling behavior:
//! - Scroll offset (user state, changed by wheel events and `scroll_to`)
//! - Scroll bounds (computed by the layout pass from content and viewport)
//! - Scroll operations with clamping
//!
//! Both axes always satisfy `0 <= scroll <= max(0, content - viewport)`.

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Default scroll amount for a wheel notch (lines).
pub const LINE_SCROLL: u16 = 1;

/// Glyph for the scrollbar track.
pub const TRACK_CHAR: char = '│';

/// Glyph for the scrollbar thumb.
pub const THUMB_CHAR: char = '█';

// =============================================================================
// SCROLL STATE
// =============================================================================

/// Scroll position and bounds of one scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    scroll_x: u16,
    scroll_y: u16,
    max_x: u16,
    max_y: u16,
    content: (u16, u16),
    viewport: (u16, u16),
    show_scrollbar: bool,
}

impl ScrollState {
    /// Fresh state at offset zero with no content.
    pub fn new(show_scrollbar: bool) -> Self {
        Self {
            show_scrollbar,
            ..Self::default()
        }
    }

    /// Current offset as `(x, y)`.
    pub fn offset(&self) -> (u16, u16) {
        (self.scroll_x, self.scroll_y)
    }

    /// Maximum offset as `(x, y)`.
    pub fn max_offset(&self) -> (u16, u16) {
        (self.max_x, self.max_y)
    }

    /// Content size as `(width, height)`.
    pub fn content_size(&self) -> (u16, u16) {
        self.content
    }

    /// Viewport size as `(width, height)`.
    pub fn viewport_size(&self) -> (u16, u16) {
        self.viewport
    }

    pub fn show_scrollbar(&self) -> bool {
        self.show_scrollbar
    }

    /// Check if the content is taller than the viewport.
    pub fn overflows_vertically(&self) -> bool {
        self.max_y > 0
    }

    /// Record the sizes from a layout pass and re-clamp the offset.
    pub fn set_sizes(&mut self, content: (u16, u16), viewport: (u16, u16)) {
        self.content = content;
        self.viewport = viewport;
        self.max_x = content.0.saturating_sub(viewport.0);
        self.max_y = content.1.saturating_sub(viewport.1);
        self.scroll_x = self.scroll_x.min(self.max_x);
        self.scroll_y = self.scroll_y.min(self.max_y);
    }

    /// Set the offset, clamped to the valid range.
    pub fn scroll_to(&mut self, x: u16, y: u16) {
        self.scroll_x = x.min(self.max_x);
        self.scroll_y = y.min(self.max_y);
    }

    /// Scroll by a delta amount.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at boundary.
    pub fn scroll_by(&mut self, delta_x: i32, delta_y: i32) -> bool {
        let new_x = i32::from(self.scroll_x)
            .saturating_add(delta_x)
            .clamp(0, i32::from(self.max_x)) as u16;
        let new_y = i32::from(self.scroll_y)
            .saturating_add(delta_y)
            .clamp(0, i32::from(self.max_y)) as u16;

        if new_x == self.scroll_x && new_y == self.scroll_y {
            return false;
        }

        self.scroll_x = new_x;
        self.scroll_y = new_y;
        true
    }

    /// Scroll to top (set Y offset to 0, preserve X).
    pub fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }

    /// Scroll to bottom (set Y offset to max, preserve X).
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_y = self.max_y;
    }

    /// Scrollbar thumb as `(offset, length)` within a track of `track` rows.
    ///
    /// `None` when there is nothing to scroll or no room for a track.
    pub fn thumb(&self, track: u16) -> Option<(u16, u16)> {
        if !self.overflows_vertically() || track == 0 || self.content.1 == 0 {
            return None;
        }
        let track_len = u32::from(track);
        let content = u32::from(self.content.1);
        let length = (track_len * u32::from(self.viewport.1) / content).clamp(1, track_len);
        let travel = track_len - length;
        let offset = travel * u32::from(self.scroll_y) / u32::from(self.max_y);
        Some((offset as u16, length as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(content: (u16, u16), viewport: (u16, u16)) -> ScrollState {
        let mut scroll = ScrollState::new(true);
        scroll.set_sizes(content, viewport);
        scroll
    }

    #[test]
    fn test_max_offset() {
        let scroll = state((10, 30), (10, 8));
        assert_eq!(scroll.max_offset(), (0, 22));

        let scroll = state((5, 5), (10, 8));
        assert_eq!(scroll.max_offset(), (0, 0));
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut scroll = state((10, 30), (10, 8));

        assert!(scroll.scroll_by(0, 5));
        assert_eq!(scroll.offset(), (0, 5));

        assert!(scroll.scroll_by(0, 100));
        assert_eq!(scroll.offset(), (0, 22));

        // Already at boundary
        assert!(!scroll.scroll_by(0, 1));

        assert!(scroll.scroll_by(0, -100));
        assert_eq!(scroll.offset(), (0, 0));
        assert!(!scroll.scroll_by(-1, -1));
    }

    #[test]
    fn test_scroll_by_extreme_deltas() {
        let mut scroll = state((40, 30), (10, 8));
        scroll.scroll_by(3, 5);

        assert!(scroll.scroll_by(i32::MAX, i32::MAX));
        assert_eq!(scroll.offset(), (30, 22));

        assert!(scroll.scroll_by(i32::MIN, i32::MIN));
        assert_eq!(scroll.offset(), (0, 0));

        scroll.scroll_by(0, 5);
        assert!(scroll.scroll_by(0, i32::MAX));
        assert_eq!(scroll.offset(), (0, 22));
    }

    #[test]
    fn test_overflow_flag() {
        assert!(state((10, 30), (10, 8)).overflows_vertically());
        assert!(!state((10, 8), (10, 8)).overflows_vertically());
    }

    #[test]
    fn test_scroll_to_clamps() {
        let mut scroll = state((40, 30), (10, 8));
        scroll.scroll_to(100, 3);
        assert_eq!(scroll.offset(), (30, 3));
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut scroll = state((10, 30), (10, 8));
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), (0, 22));

        scroll.set_sizes((10, 12), (10, 8));
        assert_eq!(scroll.offset(), (0, 4));

        scroll.set_sizes((10, 4), (10, 8));
        assert_eq!(scroll.offset(), (0, 0));
    }

    #[test]
    fn test_top_and_bottom() {
        let mut scroll = state((10, 20), (10, 5));
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset().1, 15);
        scroll.scroll_to_top();
        assert_eq!(scroll.offset().1, 0);
    }

    #[test]
    fn test_thumb() {
        let mut scroll = state((10, 20), (10, 10));
        assert_eq!(scroll.thumb(10), Some((0, 5)));

        scroll.scroll_to_bottom();
        assert_eq!(scroll.thumb(10), Some((5, 5)));

        let scroll = state((10, 5), (10, 10));
        assert_eq!(scroll.thumb(10), None);
    }
}
