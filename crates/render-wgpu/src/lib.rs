//! wgpu render backend for the face cube.
//!
//! Draws the cube with one texture per face. Face textures are re-uploaded
//! only when the bound surface changes.
//!
//! # Invariants
//! - Renderer never mutates shell state.
//! - An unchanged surface set uploads nothing.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
