//! Developer Tooling: read-only inspection of shell state.
//!
//! # Invariants
//! - Inspection never mutates the shell.

mod inspector;

pub use inspector::{FaceInfo, ShellInspector, ShellSummary};
