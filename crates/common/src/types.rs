use crate::FaceId;
use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Pixel position inside the viewport. `y` grows downward.
pub type ScreenPos = Vec2;

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Window layout: fixed 800 px tall canvas.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    pub fn contains(&self, pos: ScreenPos) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        DEFAULT_VIEWPORT
    }
}

/// What the cube reports for a pointer click that hit it.
///
/// A click on the background produces no `FaceClick` at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceClick {
    pub face: FaceId,
    /// Screen position of the face reference point, captured at click time.
    pub anchor: Option<ScreenPos>,
}

impl FaceClick {
    pub fn new(face: FaceId) -> Self {
        Self { face, anchor: None }
    }

    pub fn with_anchor(face: FaceId, anchor: ScreenPos) -> Self {
        Self {
            face,
            anchor: Some(anchor),
        }
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Model matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
