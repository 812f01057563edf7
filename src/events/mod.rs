//! Event handling module for keyboard and mouse events.
//!
//! Terminal events are translated into `Action`s here; `App::dispatch`
//! applies them to state.

mod action;
mod handler;
mod keyboard;
mod mouse;

pub use action::Action;
pub use handler::EventHandler;
