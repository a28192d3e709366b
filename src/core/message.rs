//! Application-level messages.
//!
//! # Terminology
//! - **Event**: Input from the world (keyboard, mouse, timer) - see [`crate::core::Event`]
//! - **Message**: Internal communication back to the App
//! - **Command**: Async side effect operations - see [`crate::core::Command`]
//!
//! Screen-specific messages stay local to each screen and travel on the
//! screen's own channel (e.g. `ListMsg`).

use crate::ui::components::Toast;

#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A spawned command finished; the active screens should drain their queues.
    CommandCompleted { name: String, success: bool },
    /// Show a transient notification.
    ShowToast(Toast),
    /// Show a blocking error dialog.
    DisplayError(String),
}
