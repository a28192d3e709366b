//! Core framework for roomdesk.
//!
//! - [`Event`] - Input events from the terminal
//! - [`AppMessage`] - Internal communication back to the App
//! - [`Command`] - Async side effect operations
//! - [`Screen`] - List screens (Elm-style architecture)

pub mod command;
pub mod event;
pub mod message;
pub mod screen;

pub use command::Command;
pub use event::Event;
pub use message::AppMessage;
pub use screen::{Screen, UpdateResult};
