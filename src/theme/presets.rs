//! Theme Presets
//!
//! Built-in themes, looked up by name with [`get_preset`].

use super::Theme;
use crate::types::Color;

// =============================================================================
// Terminal Theme (Default)
// =============================================================================

/// Terminal theme - uses ANSI colors to respect the user's terminal theme.
/// This is the default and should be used for most applications.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal".to_string(),
        text: Color::Reset,
        text_muted: Color::DarkGray,
        background: Color::Reset,
        headings: [Color::LightCyan, Color::LightBlue, Color::LightMagenta],
        button_fg: Color::Black,
        button_bg: Color::Gray,
        input_fg: Color::White,
        input_bg: Color::DarkGray,
        checkbox_fg: Color::LightGreen,
        scrollbar_track: Color::DarkGray,
        scrollbar_thumb: Color::Gray,
    }
}

// =============================================================================
// Dracula Theme
// =============================================================================

/// Dracula - dark theme with vivid colors.
pub fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        text: Color::Rgb(0xf8, 0xf8, 0xf2),
        text_muted: Color::Rgb(0x62, 0x72, 0xa4),
        background: Color::Rgb(0x28, 0x2a, 0x36),
        headings: [
            Color::Rgb(0xbd, 0x93, 0xf9),
            Color::Rgb(0xff, 0x79, 0xc6),
            Color::Rgb(0x8b, 0xe9, 0xfd),
        ],
        button_fg: Color::Rgb(0x28, 0x2a, 0x36),
        button_bg: Color::Rgb(0xbd, 0x93, 0xf9),
        input_fg: Color::Rgb(0xf8, 0xf8, 0xf2),
        input_bg: Color::Rgb(0x44, 0x47, 0x5a),
        checkbox_fg: Color::Rgb(0x50, 0xfa, 0x7b),
        scrollbar_track: Color::Rgb(0x44, 0x47, 0x5a),
        scrollbar_thumb: Color::Rgb(0x62, 0x72, 0xa4),
    }
}

// =============================================================================
// Nord Theme
// =============================================================================

/// Nord - arctic, bluish colors.
pub fn nord() -> Theme {
    Theme {
        name: "nord".to_string(),
        text: Color::Rgb(0xec, 0xef, 0xf4),
        text_muted: Color::Rgb(0x4c, 0x56, 0x6a),
        background: Color::Rgb(0x2e, 0x34, 0x40),
        headings: [
            Color::Rgb(0x88, 0xc0, 0xd0),
            Color::Rgb(0x81, 0xa1, 0xc1),
            Color::Rgb(0x5e, 0x81, 0xac),
        ],
        button_fg: Color::Rgb(0x2e, 0x34, 0x40),
        button_bg: Color::Rgb(0x88, 0xc0, 0xd0),
        input_fg: Color::Rgb(0xec, 0xef, 0xf4),
        input_bg: Color::Rgb(0x3b, 0x42, 0x52),
        checkbox_fg: Color::Rgb(0xa3, 0xbe, 0x8c),
        scrollbar_track: Color::Rgb(0x3b, 0x42, 0x52),
        scrollbar_thumb: Color::Rgb(0x4c, 0x56, 0x6a),
    }
}

// =============================================================================
// Preset Lookup
// =============================================================================

/// Get a preset theme by name.
///
/// Matching ignores case and underscores.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name.to_lowercase().replace('_', "").as_str() {
        "terminal" => Some(terminal()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        _ => None,
    }
}

/// List all available preset names.
pub fn preset_names() -> &'static [&'static str] {
    &["terminal", "dracula", "nord"]
}
