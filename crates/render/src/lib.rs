//! Interactive Cube: renderer-agnostic geometry, picking and projection.
//!
//! # Invariants
//! - The cube never mutates shell state; it only reports clicks.
//! - A click that misses the box reports nothing, never face 0.
//! - Both triangles of a face resolve to the same face index.
//!
//! Backends implement [`Renderer`]; [`DebugTextRenderer`] describes a frame
//! as text for the CLI and tests.

mod camera;
mod cube;
mod geometry;
mod picking;
mod projection;
mod renderer;

pub use camera::OrbitCamera;
pub use cube::{ClickReport, InteractiveCube, MaterialSlots};
pub use geometry::{CubeGeometry, CubeVertex};
pub use picking::{PickHit, Ray, intersect_triangle, pick_face};
pub use projection::{ndc_to_screen, project_to_screen, screen_to_ndc};
pub use renderer::{DebugTextRenderer, Renderer};
