//! Conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions. The
//! runtime owns all I/O: it executes the [`Effect`]s a transition returns and
//! feeds store outcomes back in as [`Event`]s.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::Flow;
pub use transition::{transition, TransitionError};
