//! Texture Synthesizer: rasterizes a face label into an immutable [`Surface`].
//!
//! # Invariants
//! - Synthesis is a pure function of (text, background, mode).
//! - A `Surface` never changes after construction; a new label means a new surface.

mod surface;
mod synth;

pub use surface::{Surface, SurfaceId};
pub use synth::{FONT_SIZE_PX, TextureError, TextureMode, TextureSynthesizer};
