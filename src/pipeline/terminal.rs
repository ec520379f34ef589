//! Terminal host built on crossterm.
//!
//! Handles entering/exiting raw mode, alternate screen and mouse capture,
//! converts crossterm events into [`HostEvent`]s, and implements
//! [`Display`] by queueing crossterm commands that are written out in one
//! go on `flush`. Each frame is wrapped in a synchronized update so the
//! terminal never shows a half-drawn frame.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
    KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate,
    EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::error::Result;
use crate::renderer::Display;
use crate::state::{Key, MouseButton, ScrollDirection};
use crate::types::{Attr, Color};

use super::host::{Host, HostEvent};

// =============================================================================
// Terminal Host
// =============================================================================

/// The real terminal on stdout.
pub struct TerminalHost {
    out: Stdout,
    size: (u16, u16),
    entered: bool,
}

impl TerminalHost {
    /// Host for the current terminal, sized from the environment.
    pub fn new() -> Result<Self> {
        Ok(Self {
            out: io::stdout(),
            size: terminal::size()?,
            entered: false,
        })
    }
}

impl Display for TerminalHost {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        Ok(())
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(convert_color(fg)),
            SetBackgroundColor(convert_color(bg))
        )?;
        Ok(())
    }

    fn set_attrs(&mut self, attrs: Attr) -> Result<()> {
        let bold = if attrs.contains(Attr::BOLD) {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        };
        let underline = if attrs.contains(Attr::UNDERLINE) {
            Attribute::Underlined
        } else {
            Attribute::NoUnderline
        };
        let inverse = if attrs.contains(Attr::INVERSE) {
            Attribute::Reverse
        } else {
            Attribute::NoReverse
        };
        queue!(
            self.out,
            SetAttribute(bold),
            SetAttribute(underline),
            SetAttribute(inverse)
        )?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Host for TerminalHost {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<HostEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let converted = convert_event(event::read()?);
        if let Some(HostEvent::Resize(width, height)) = converted {
            self.size = (width, height);
        }
        Ok(converted)
    }

    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide,
            Clear(ClearType::All)
        )?;
        self.entered = true;
        tracing::debug!(target: "spark_grid::pipeline", size = ?self.size, "terminal entered");
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        tracing::debug!(target: "spark_grid::pipeline", "terminal restored");
        Ok(())
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(target: "spark_grid::pipeline", %err, "terminal restore on drop failed");
        }
    }
}

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert a crossterm event. `None` for events the runtime ignores.
pub fn convert_event(event: CrosstermEvent) -> Option<HostEvent> {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Resize(width, height) => Some(HostEvent::Resize(width, height)),
        _ => None,
    }
}

/// Convert a crossterm key event.
///
/// Ctrl+C becomes `Terminate`; other control / alt chords are ignored.
fn convert_key_event(event: CrosstermKeyEvent) -> Option<HostEvent> {
    let modified = event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    if let KeyCode::Char(ch) = event.code {
        if event.modifiers.contains(KeyModifiers::CONTROL) && ch.eq_ignore_ascii_case(&'c') {
            return Some(HostEvent::Terminate);
        }
        if modified || event.kind == KeyEventKind::Release {
            return None;
        }
        return Some(HostEvent::Char(ch));
    }

    let key = match event.code {
        KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };

    Some(match event.kind {
        KeyEventKind::Release => HostEvent::KeyUp(key),
        KeyEventKind::Press | KeyEventKind::Repeat => HostEvent::KeyDown(key),
    })
}

/// Convert a crossterm mouse event. Only presses and wheel notches count.
fn convert_mouse_event(event: CrosstermMouseEvent) -> Option<HostEvent> {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(button) => Some(HostEvent::MouseClick {
            button: convert_mouse_button(button),
            x,
            y,
        }),
        MouseEventKind::ScrollUp => Some(HostEvent::MouseScroll {
            direction: ScrollDirection::Up,
            x,
            y,
        }),
        MouseEventKind::ScrollDown => Some(HostEvent::MouseScroll {
            direction: ScrollDirection::Down,
            x,
            y,
        }),
        _ => None,
    }
}

fn convert_mouse_button(button: CrosstermMouseButton) -> MouseButton {
    match button {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

fn convert_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::Red => CrosstermColor::DarkRed,
        Color::Green => CrosstermColor::DarkGreen,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::Gray => CrosstermColor::Grey,
        Color::DarkGray => CrosstermColor::DarkGrey,
        Color::LightRed => CrosstermColor::Red,
        Color::LightGreen => CrosstermColor::Green,
        Color::LightYellow => CrosstermColor::Yellow,
        Color::LightBlue => CrosstermColor::Blue,
        Color::LightMagenta => CrosstermColor::Magenta,
        Color::LightCyan => CrosstermColor::Cyan,
        Color::White => CrosstermColor::White,
        Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
        CrosstermEvent::Key(CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_ctrl_c_terminates() {
        let event = convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(event, Some(HostEvent::Terminate));
    }

    #[test]
    fn test_chars_and_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(HostEvent::Char('x'))
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(HostEvent::Char('X'))
        );
        assert_eq!(convert_event(key(KeyCode::Char('x'), KeyModifiers::ALT)), None);
        assert_eq!(
            convert_event(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(HostEvent::KeyDown(Key::Tab))
        );
        assert_eq!(
            convert_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(HostEvent::KeyDown(Key::BackTab))
        );
        assert_eq!(convert_event(key(KeyCode::Insert, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release() {
        let event = CrosstermEvent::Key(CrosstermKeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(convert_event(event), Some(HostEvent::KeyUp(Key::Enter)));
    }

    #[test]
    fn test_mouse_events() {
        let click = CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind: MouseEventKind::Down(CrosstermMouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            convert_event(click),
            Some(HostEvent::MouseClick {
                button: MouseButton::Left,
                x: 4,
                y: 2
            })
        );

        let wheel = CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            convert_event(wheel),
            Some(HostEvent::MouseScroll {
                direction: ScrollDirection::Down,
                x: 1,
                y: 1
            })
        );

        let moved = CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind: MouseEventKind::Moved,
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(convert_event(moved), None);
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(convert_color(Color::LightRed), CrosstermColor::Red);
        assert_eq!(convert_color(Color::Red), CrosstermColor::DarkRed);
        assert_eq!(
            convert_color(Color::Rgb(1, 2, 3)),
            CrosstermColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
