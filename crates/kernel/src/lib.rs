//! Application Shell: authoritative face state and the surfaces derived from it.
//!
//! # Invariants
//! - Only the shell mutates labels, reveal flags and the edit session.
//! - A state change regenerates the affected face's surface and no other.
//! - At most one face is being edited at a time.

pub mod edit;
pub mod shell;

pub use edit::{EditSession, EditorOverlay};
pub use shell::{CubeVariant, FaceState, Shell, ShellError, ShellEvent};
