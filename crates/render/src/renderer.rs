use crate::{InteractiveCube, OrbitCamera};
use facecube_common::FaceId;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the cube's bound materials and a camera, then produces
/// output. It never touches label state; that belongs to the shell.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `cube` as seen from `camera`.
    fn render(&mut self, cube: &InteractiveCube, camera: &OrbitCamera) -> Self::Output;
}

/// Describes a frame as text instead of pixels.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, cube: &InteractiveCube, camera: &OrbitCamera) -> String {
        self.frames += 1;
        let eye = camera.position();
        let mut out = format!("=== Cube (frame={}) ===\n", self.frames);
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            eye.x,
            eye.y,
            eye.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov.to_degrees()
        ));

        for face in FaceId::ALL {
            let line = match cube.materials().get(face) {
                Some(surface) => format!(
                    "  [{}] {:<6} {:<7} {} {}x{}\n",
                    face.index(),
                    face.side_name(),
                    face.spec().name,
                    surface.id(),
                    surface.width(),
                    surface.height()
                ),
                None => format!(
                    "  [{}] {:<6} {:<7} unbound\n",
                    face.index(),
                    face.side_name(),
                    face.spec().name
                ),
            };
            out.push_str(&line);
        }

        out
    }
}
