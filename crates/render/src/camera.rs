use facecube_common::Viewport;
use glam::{Mat4, Vec2, Vec3};

/// Orbit camera circling a target point, driven by pointer drags.
/// Camera motion is view state only; the shell never sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation about +Y in radians; 0 looks down -Z.
    pub yaw: f32,
    /// Elevation in radians, clamped short of the poles.
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 10.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.005,
        }
    }
}

impl OrbitCamera {
    const MIN_DISTANCE: f32 = 2.5;
    const MAX_DISTANCE: f32 = 50.0;

    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    /// Drag by `delta` pixels: right swings the camera left, down lifts it.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch += delta.y * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Positive `amount` moves closer.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance - amount).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
