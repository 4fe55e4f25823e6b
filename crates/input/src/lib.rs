//! Input mapping: raw pointer and keyboard input mapped to shell actions.
//!
//! # Invariants
//! - The shell consumes actions, never raw window events.
//! - Only the Enter key produces a commit.

pub mod action;
pub mod pointer;

pub use action::{Action, Key, KeyInput};
pub use pointer::{CLICK_SLOP_PX, PointerTracker};
