//! Shared types for the facecube workspace.
//!
//! # Invariants
//! - Exactly six faces exist; `FaceId` cannot name a seventh.
//! - The face index to physical side mapping never changes.

mod color;
mod face;
mod types;

pub use color::Rgb;
pub use face::{FACE_PALETTE, FaceId, FaceMap, FaceSpec, InvalidFaceIndex, ParseFaceError};
pub use types::{DEFAULT_VIEWPORT, FaceClick, ScreenPos, Transform, Viewport};
