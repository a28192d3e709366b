//! Reusable UI components.
//!
//! Components are interactive UI building blocks that handle input events and
//! emit generic outputs. They know nothing about rooms or bookings.

mod confirm_dialog;
mod details_dialog;
mod error_dialog;
mod help;
mod spinner;
pub mod table;
mod toast;

pub use confirm_dialog::{ConfirmDialog, ConfirmEvent, ConfirmStyle};
pub use details_dialog::{DetailsDialog, DetailsEvent};
pub use error_dialog::{ErrorDialog, ErrorDialogEvent};
pub use help::{HelpEvent, HelpView, Keybinding, KeybindingSection};
pub use spinner::Spinner;
pub use toast::{Toast, ToastManager, ToastType};
