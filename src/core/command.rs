//! Async command pattern for side effects.
//!
//! Commands represent async operations that run outside the main event loop.
//! Screens return commands from `update()`, the App spawns them on tokio and
//! reports completion back through [`AppMessage::CommandCompleted`].
//!
//! [`AppMessage::CommandCompleted`]: crate::core::AppMessage::CommandCompleted

use async_trait::async_trait;

/// Async command that performs side effects.
///
/// Commands send their results back to the screen that created them via the
/// screen's message channel. The returned `Result` only reports whether the
/// command itself ran; domain failures travel as messages.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logs, e.g. "Loading rooms (page 2)".
    fn name(&self) -> String;

    /// Execute the command.
    async fn execute(self: Box<Self>) -> color_eyre::Result<()>;
}
