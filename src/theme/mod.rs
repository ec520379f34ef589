//! Theme System for spark-grid.
//!
//! Provides the default colors each node type is drawn with when its style
//! sets no explicit color. Headings get a color per level. The terminal
//! preset sticks to the ANSI palette so the user's terminal scheme is
//! respected.
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::theme::get_preset;
//!
//! let nord = get_preset("nord").unwrap_or_default();
//! let config = RuntimeConfig { theme: nord, ..RuntimeConfig::default() };
//! ```

use crate::engine::ComponentType;
use crate::types::Color;

mod presets;

pub use presets::*;

// =============================================================================
// Theme
// =============================================================================

/// Default colors per node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name (e.g., "terminal", "nord").
    pub name: String,

    // =========================================================================
    // Text
    // =========================================================================

    /// Plain text foreground.
    pub text: Color,
    /// Placeholder text of empty inputs.
    pub text_muted: Color,
    /// Background behind nodes without their own.
    pub background: Color,
    /// Heading foregrounds for levels 1, 2 and 3+.
    pub headings: [Color; 3],

    // =========================================================================
    // Controls
    // =========================================================================

    pub button_fg: Color,
    pub button_bg: Color,
    pub input_fg: Color,
    pub input_bg: Color,
    pub checkbox_fg: Color,

    // =========================================================================
    // Scrollbar
    // =========================================================================

    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
}

impl Theme {
    /// Foreground for a heading of `level` (1-based).
    pub fn heading(&self, level: u8) -> Color {
        let index = usize::from(level.clamp(1, 3)) - 1;
        self.headings[index]
    }

    /// Default `(fg, bg)` for a node type.
    ///
    /// `bg` is `None` when the type inherits its background.
    pub fn colors_for(&self, component: ComponentType) -> (Color, Option<Color>) {
        match component {
            ComponentType::Button => (self.button_fg, Some(self.button_bg)),
            ComponentType::TextInput => (self.input_fg, Some(self.input_bg)),
            ComponentType::Checkbox => (self.checkbox_fg, None),
            ComponentType::Heading => (self.heading(1), None),
            _ => (self.text, None),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        terminal()
    }
}
