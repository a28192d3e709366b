//! Events represent input from the external world (keyboard, mouse, timers).
//! They flow INTO the application from the TUI layer.

use crossterm::event::{KeyEvent, MouseEvent};

/// Events from the terminal/environment.
#[derive(Clone, Debug)]
pub enum Event {
    /// Terminal initialized
    Init,
    /// Quit requested (Ctrl+C or SIGTERM)
    Quit,
    /// Error occurred in the event loop
    Error(String),
    /// Periodic tick (for animations, toast expiry)
    Tick,
    /// Render frame requested
    Render,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}
