//! Mala (prayer-bead) counter
//!
//! Same Elm-style split as the guidance session: a plain state value, the
//! intents a host can dispatch, the effects a transition asks the host to
//! carry out, and a pure transition function tying them together.

mod effect;
pub mod intent;
pub mod state;
mod transition;


pub use effect::Effect;
pub use intent::Intent;
#[allow(unused_imports)] // Public API re-exports
pub use state::{MalaConfig, MalaState, MalaView, NameOption, Picker, NAME_OPTIONS};
pub use transition::{transition, MalaTransition};
