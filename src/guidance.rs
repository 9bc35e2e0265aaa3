//! Saarathi guidance session
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The only asynchronous part, the backend call, is requested through an
//! effect and answered with an event; see `runtime` for the executor.

mod effect;
pub mod event;
mod render;
pub mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
#[allow(unused_imports)] // Public API re-exports
pub use render::{render, CONNECTION_ERROR_TEXT, NO_SHLOKA_TEXT};
#[allow(unused_imports)] // Public API re-exports
pub use state::{Message, Role, SessionSnapshot, SessionState, WELCOME_TEXT};
#[allow(unused_imports)] // Public API re-exports
pub use transition::{transition, TransitionError, TransitionResult};
