//! Mount API - Application lifecycle and the control loop.
//!
//! This module provides the entry point for running an application. [`run`]
//! mounts the tree returned by the builder and loops until stopped:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ dirty?  → layout + draw inside the render tracker            │
//! │ poll    → host.poll_event(time to next blink, ≤ idle_poll)   │
//! │ event   → focus / click / edit / scroll, handlers run        │
//! │ timer   → toggle blink, dirty if an input is focused         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The render tracker is a reaction subscribed to every signal read during
//! layout and drawing; when any of them changes it only marks the frame
//! dirty. Rendering itself happens at the top of the next iteration.
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::pipeline::{run, RuntimeConfig, TerminalHost};
//!
//! let mut host = TerminalHost::new()?;
//! run(&mut host, RuntimeConfig::default(), || app())?;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use crate::engine::{ComponentType, Node};
use crate::error::{Error, Result};
use crate::layout::compute_layout;
use crate::primitives;
use crate::reactive::{create_reaction, create_scope, untrack, Effect, Scope};
use crate::renderer::{draw_tree, DrawContext};
use crate::state::{hit_test, scroll_container_at, FocusManager, Key, MouseButton, ScrollDirection};

use super::config::RuntimeConfig;
use super::host::{Host, HostEvent};

// =============================================================================
// Stop Handle
// =============================================================================

/// Flips the running flag of an application.
///
/// The loop observes the flag at its next iteration.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    /// Ask the application to stop.
    pub fn stop(&self) {
        self.0.set(false);
    }

    /// Check if the application is still meant to run.
    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    fn ptr_eq(&self, other: &StopHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

thread_local! {
    /// Stop handle of the application running on this thread.
    static ACTIVE: RefCell<Option<StopHandle>> = const { RefCell::new(None) };
}

/// Stop the application running on this thread.
///
/// Callable from any handler. Returns `false` if no application is running.
pub fn request_stop() -> bool {
    ACTIVE.with(|active| match active.borrow().as_ref() {
        Some(handle) => {
            handle.stop();
            true
        }
        None => false,
    })
}

// =============================================================================
// App
// =============================================================================

/// A mounted application bound to a host.
///
/// [`run`] covers the usual case; `App` is public so tests and embedders
/// can drive the loop one step at a time.
pub struct App<'h, H: Host + ?Sized> {
    host: &'h mut H,
    config: RuntimeConfig,
    root: Node,
    root_scope: Scope,
    focus: FocusManager,
    dirty: Rc<Cell<bool>>,
    blink: bool,
    next_blink: Instant,
    running: StopHandle,
    tracker: Effect,
    shut_down: bool,
}

impl<'h, H: Host + ?Sized> App<'h, H> {
    /// Build the tree with `build`, mount it and register as the running app.
    pub fn new(host: &'h mut H, config: RuntimeConfig, build: impl FnOnce() -> Node) -> Self {
        let (root, root_scope) = create_scope(|| untrack(build));
        root.mount();

        let dirty = Rc::new(Cell::new(true));
        let flag = dirty.clone();
        let tracker = create_reaction(move || flag.set(true));

        let running = StopHandle::new();
        ACTIVE.with(|active| *active.borrow_mut() = Some(running.clone()));

        tracing::debug!(target: "spark_grid::pipeline", root = %root.id(), "application mounted");

        Self {
            host,
            next_blink: Instant::now() + config.blink_interval,
            config,
            root,
            root_scope,
            focus: FocusManager::new(),
            dirty,
            blink: true,
            running,
            tracker,
            shut_down: false,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn host(&self) -> &H {
        self.host
    }

    /// Currently focused node.
    pub fn focused(&self) -> Option<Node> {
        self.focus.focused()
    }

    /// Check if the next iteration will redraw.
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Cursor blink phase.
    pub fn blink(&self) -> bool {
        self.blink
    }

    /// Handle for stopping this application.
    pub fn stop_handle(&self) -> StopHandle {
        self.running.clone()
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Lay out and draw the tree, collecting its dependencies.
    pub fn render(&mut self) -> Result<()> {
        self.dirty.set(false);
        let (width, height) = self.host.size();
        let ctx = DrawContext {
            theme: &self.config.theme,
            focused: self.focus.focused_id(),
            blink: self.blink,
        };
        let host = &mut *self.host;
        let root = &self.root;
        self.tracker.track(|| {
            compute_layout(root, width, height);
            draw_tree(host, root, &ctx)
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Dispatch one host event.
    ///
    /// Returns whether anything handled it (which marks the frame dirty).
    /// `Terminate` yields [`Error::Closed`].
    pub fn dispatch(&mut self, event: HostEvent) -> Result<bool> {
        tracing::trace!(target: "spark_grid::pipeline", ?event, "dispatch");
        let handled = match event {
            HostEvent::Terminate => return Err(Error::Closed),
            HostEvent::KeyDown(key) => self.handle_key(key),
            HostEvent::KeyUp(_) => false,
            HostEvent::Char(ch) => self
                .focused_input()
                .is_some_and(|node| primitives::insert_char(&node, ch)),
            HostEvent::MouseClick { button, x, y } => self.handle_click(button, x, y),
            HostEvent::MouseScroll { direction, x, y } => self.handle_scroll(direction, x, y),
            HostEvent::Resize(width, height) => {
                tracing::debug!(target: "spark_grid::pipeline", width, height, "resize");
                true
            }
        };

        if handled {
            self.dirty.set(true);
            if self.focused_input().is_some() {
                self.restart_blink();
            }
        }
        Ok(handled)
    }

    fn focused_input(&self) -> Option<Node> {
        self.focus
            .focused()
            .filter(|node| node.component_type() == ComponentType::TextInput)
    }

    fn handle_key(&mut self, key: Key) -> bool {
        if key == self.config.focus_next_key {
            self.focus.focus_next(&self.root);
            return true;
        }
        if key == self.config.focus_prev_key {
            self.focus.focus_previous(&self.root);
            return true;
        }

        let Some(node) = self.focus.focused() else {
            return false;
        };
        if key == self.config.activate_key {
            return primitives::click(&node) || primitives::toggle(&node) || primitives::submit(&node);
        }
        key.is_editing() && primitives::edit_key(&node, key)
    }

    fn handle_click(&mut self, button: MouseButton, x: u16, y: u16) -> bool {
        if button != MouseButton::Left {
            return false;
        }

        let Some(node) = hit_test(&self.root, x, y) else {
            let had_focus = self.focus.focused().is_some();
            self.focus.blur();
            return had_focus;
        };

        self.focus.focus(&node);
        match node.component_type() {
            ComponentType::Button => primitives::click(&node),
            ComponentType::Checkbox => primitives::toggle(&node),
            ComponentType::TextInput => primitives::place_cursor(&node, x),
            _ => false,
        };
        true
    }

    fn handle_scroll(&mut self, direction: ScrollDirection, x: u16, y: u16) -> bool {
        let Some(container) = scroll_container_at(&self.root, x, y) else {
            return false;
        };
        primitives::scroll_by(&container, 0, direction.delta(self.config.scroll_step))
    }

    // =========================================================================
    // Timer
    // =========================================================================

    /// Advance the blink timer to `now`.
    pub fn tick_timer(&mut self, now: Instant) {
        if now < self.next_blink {
            return;
        }
        self.blink = !self.blink;
        self.next_blink = now + self.config.blink_interval;
        if self.focused_input().is_some() {
            self.dirty.set(true);
        }
    }

    fn restart_blink(&mut self) {
        self.blink = true;
        self.next_blink = Instant::now() + self.config.blink_interval;
    }

    // =========================================================================
    // Loop
    // =========================================================================

    /// One loop iteration: render if dirty, wait for one event, tick.
    pub fn step(&mut self) -> Result<()> {
        if self.dirty.get() {
            self.render()?;
        }

        let timeout = self
            .next_blink
            .saturating_duration_since(Instant::now())
            .min(self.config.idle_poll);
        if let Some(event) = self.host.poll_event(timeout)? {
            self.dispatch(event)?;
        }

        self.tick_timer(Instant::now());
        Ok(())
    }

    /// Loop until stopped or closed.
    pub fn run_loop(&mut self) -> Result<()> {
        while self.running.is_running() {
            self.step()?;
        }
        tracing::debug!(target: "spark_grid::pipeline", "stop requested");
        Ok(())
    }

    /// Unmount the root and restore the display. Idempotent.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;
        self.release();
        self.root.unmount();
        tracing::debug!(target: "spark_grid::pipeline", "application unmounted");
        self.host.restore()
    }

    /// Drop the render tracker and the running-app registration.
    fn release(&mut self) {
        self.tracker.dispose();
        self.root_scope.dispose();
        ACTIVE.with(|active| {
            let mut active = active.borrow_mut();
            if active.as_ref().is_some_and(|handle| handle.ptr_eq(&self.running)) {
                *active = None;
            }
        });
    }
}

impl<H: Host + ?Sized> Drop for App<'_, H> {
    fn drop(&mut self) {
        if !self.shut_down {
            self.release();
            self.root.unmount();
        }
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Run an application until it is stopped or closed.
///
/// Stopping (via [`request_stop`] or a [`StopHandle`]) and the host's
/// `Terminate` event both end the run normally. Any other error is logged
/// and returned after the root is unmounted and the display restored.
pub fn run<H: Host + ?Sized>(
    host: &mut H,
    config: RuntimeConfig,
    build: impl FnOnce() -> Node,
) -> Result<()> {
    host.enter()?;
    let mut app = App::new(host, config, build);

    let outcome = match app.run_loop() {
        Ok(()) => Ok(()),
        Err(err) if err.is_closed() => {
            tracing::debug!(target: "spark_grid::pipeline", "host closed");
            Ok(())
        }
        Err(err) => {
            tracing::error!(target: "spark_grid::pipeline", %err, "application loop failed");
            Err(err)
        }
    };

    let restored = app.shutdown();
    outcome.and(restored)
}
