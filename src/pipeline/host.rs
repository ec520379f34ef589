//! Host - the display plus its event source.
//!
//! The runtime pulls events from the host with [`Host::poll_event`], which
//! blocks for at most the given timeout. It is the loop's only suspension
//! point and doubles as its sleep.
//!
//! [`HeadlessHost`] drives the runtime without a terminal: an in-memory
//! [`FrameBuffer`] plus a scripted event queue.

use std::collections::VecDeque;
use std::time::Duration;

use crate::error::Result;
use crate::renderer::{Display, FrameBuffer};
use crate::state::{Key, MouseButton, ScrollDirection};
use crate::types::{Attr, Color};

// =============================================================================
// Events
// =============================================================================

/// One input event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// A printable character was typed.
    Char(char),
    MouseClick {
        button: MouseButton,
        x: u16,
        y: u16,
    },
    MouseScroll {
        direction: ScrollDirection,
        x: u16,
        y: u16,
    },
    /// The display changed size.
    Resize(u16, u16),
    /// The user asked to close the application.
    Terminate,
}

// =============================================================================
// Host
// =============================================================================

/// A display that also produces input events.
pub trait Host: Display {
    /// Wait up to `timeout` for the next event.
    ///
    /// `Ok(None)` when nothing arrived in time.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<HostEvent>>;

    /// Prepare the device (raw mode, alternate screen, ...).
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }

    /// Undo [`Host::enter`].
    fn restore(&mut self) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// Headless Host
// =============================================================================

/// In-memory host with a scripted event queue.
///
/// When the queue runs dry `poll_event` returns `Ok(None)` right away, or
/// `Terminate` if [`HeadlessHost::close_when_drained`] was set.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    buffer: FrameBuffer,
    events: VecDeque<HostEvent>,
    close_when_drained: bool,
    entered: bool,
    restored: bool,
    frames: usize,
}

impl HeadlessHost {
    /// Host with a blank `width` x `height` grid and no events.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height),
            events: VecDeque::new(),
            close_when_drained: false,
            entered: false,
            restored: false,
            frames: 0,
        }
    }

    /// Queue events to be returned in order.
    pub fn with_events(mut self, events: impl IntoIterator<Item = HostEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Report `Terminate` once every queued event was consumed.
    pub fn close_when_drained(mut self) -> Self {
        self.close_when_drained = true;
        self
    }

    /// Queue one more event.
    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    /// Number of events not yet consumed.
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// The grid as last drawn.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Number of completed frames (flushes).
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }
}

impl Display for HeadlessHost {
    fn size(&self) -> (u16, u16) {
        self.buffer.size()
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.buffer.set_cursor(x, y)
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        self.buffer.set_colors(fg, bg)
    }

    fn set_attrs(&mut self, attrs: Attr) -> Result<()> {
        self.buffer.set_attrs(attrs)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.buffer.write(text)
    }

    fn clear(&mut self) -> Result<()> {
        self.buffer.clear()
    }

    fn flush(&mut self) -> Result<()> {
        self.frames += 1;
        self.buffer.flush()
    }
}

impl Host for HeadlessHost {
    fn poll_event(&mut self, _timeout: Duration) -> Result<Option<HostEvent>> {
        let event = match self.events.pop_front() {
            Some(event) => event,
            None if self.close_when_drained => HostEvent::Terminate,
            None => return Ok(None),
        };
        if let HostEvent::Resize(width, height) = event {
            self.buffer.resize(width, height);
        }
        Ok(Some(event))
    }

    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        self.restored = true;
        Ok(())
    }
}
