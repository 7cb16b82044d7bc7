//! Dialogue state snapshots.
//!
//! The engine reads the state through [`StateSnapshot`], an immutable view
//! of the currently instantiated variables. [`DialogueState`] is the
//! in-memory implementation.

mod dialogue_state;
mod types;

pub use dialogue_state::DialogueState;
pub use types::{Node, StateSnapshot};
