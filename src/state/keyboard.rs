//! Keyboard Module - key identities used by hosts and the runtime.
//!
//! Printable characters travel separately as `HostEvent::Char`; this module
//! only names the keys the runtime reacts to (navigation, activation and
//! editing).

// =============================================================================
// TYPES
// =============================================================================

/// Non-printable key identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    /// Shift+Tab.
    BackTab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key F1-F12.
    F(u8),
}

impl Key {
    /// Keys that edit or move the cursor of a text input.
    pub const fn is_editing(&self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::Home | Self::End | Self::Backspace | Self::Delete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_keys() {
        assert!(Key::Backspace.is_editing());
        assert!(Key::Home.is_editing());
        assert!(!Key::Tab.is_editing());
        assert!(!Key::Enter.is_editing());
        assert!(!Key::F(1).is_editing());
    }
}
