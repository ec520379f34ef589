//! Runtime configuration.
//!
//! Plain data with defaults, overridden with struct update syntax:
//!
//! ```ignore
//! let config = RuntimeConfig {
//!     blink_interval: Duration::from_millis(300),
//!     theme: theme::nord(),
//!     ..RuntimeConfig::default()
//! };
//! ```

use std::time::Duration;

use crate::state::scroll::LINE_SCROLL;
use crate::state::Key;
use crate::theme::Theme;

/// Default cursor blink period.
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Default upper bound on a single host poll.
pub const DEFAULT_IDLE_POLL: Duration = Duration::from_millis(50);

/// Knobs of the application runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Period of the text input cursor blink.
    pub blink_interval: Duration,
    /// Longest single wait for input. Stop requests are observed at least
    /// this often.
    pub idle_poll: Duration,
    /// Lines scrolled per wheel notch.
    pub scroll_step: u16,
    /// Moves focus to the next interactive node.
    pub focus_next_key: Key,
    /// Moves focus to the previous interactive node.
    pub focus_prev_key: Key,
    /// Clicks a button, toggles a checkbox, submits a text input.
    pub activate_key: Key,
    pub theme: Theme,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            blink_interval: DEFAULT_BLINK_INTERVAL,
            idle_poll: DEFAULT_IDLE_POLL,
            scroll_step: LINE_SCROLL,
            focus_next_key: Key::Tab,
            focus_prev_key: Key::BackTab,
            activate_key: Key::Enter,
            theme: Theme::default(),
        }
    }
}
