//! Screen trait for the list screens.
//!
//! Screens follow the Elm architecture with a single-funnel update pattern:
//! - `init()` queues initial message(s)
//! - `handle_input()` queues messages from user input
//! - `handle_tick()` handles animation ticks
//! - `update()` processes all queued messages - THE SINGLE FUNNEL
//!
//! Only `update()` can return commands or report errors.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::core::command::Command;
use crate::core::event::Event;
use crate::ui::components::Keybinding;

/// Result from `update()`
pub enum UpdateResult {
    /// No action needed
    Idle,
    /// Spawn these commands
    Commands(Vec<Box<dyn Command>>),
    /// Report an error
    Error(String),
}

impl<T: Command> From<T> for UpdateResult {
    fn from(value: T) -> Self {
        Self::Commands(vec![Box::new(value)])
    }
}

/// A top-level screen.
///
/// The App calls methods in this order:
///
/// 1. `init()` - once when the screen is first shown
/// 2. `update()` - immediately after init to process the startup message
/// 3. For each event:
///    - `handle_tick()` if tick event
///    - `handle_input()` if input event, then `update()` if consumed
/// 4. When any command completes: `update()`
pub trait Screen {
    fn title(&self) -> &str;

    /// Queue startup message(s). Called once.
    fn init(&mut self) {}

    /// Visual updates only. Do NOT queue messages here.
    fn handle_tick(&mut self) {}

    /// Queue internal messages based on user input. Return `true` if the
    /// event was consumed (the App will then call `update()`).
    fn handle_input(&mut self, event: &Event) -> bool;

    /// Process all queued messages and return the result.
    ///
    /// **THIS IS THE SINGLE FUNNEL.** Called by the App after `init()`, after
    /// `handle_input()` returns `true` and after any command completes.
    fn update(&mut self) -> UpdateResult;

    /// Render the current state to the terminal.
    fn view(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Label/value pairs shown in the status bar.
    fn status(&self) -> Vec<(&'static str, String)> {
        vec![]
    }

    /// Keybindings for the current view of this screen.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}
