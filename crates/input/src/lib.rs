//! Input mapping: platform key events become high-level actions.
//!
//! # Invariants
//! - The driver consumes actions, never raw key events.
//! - Unbound keys map to `Action::Noop`.

pub mod action;

pub use action::{Action, Key, NudgeDirection, NUDGE_STEP, map_key};
