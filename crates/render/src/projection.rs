use facecube_common::{ScreenPos, Viewport};
use glam::{Mat4, Vec2, Vec3};

/// NDC in `[-1, 1]` (y up) to pixels (y down).
pub fn ndc_to_screen(ndc: Vec2, viewport: Viewport) -> ScreenPos {
    let half = viewport.half_size();
    Vec2::new(ndc.x * half.x + half.x, -ndc.y * half.y + half.y)
}

/// Inverse of [`ndc_to_screen`].
pub fn screen_to_ndc(pos: ScreenPos, viewport: Viewport) -> Vec2 {
    let half = viewport.half_size();
    Vec2::new((pos.x - half.x) / half.x, -(pos.y - half.y) / half.y)
}

/// Project a world-space point through `view_proj` into viewport pixels.
pub fn project_to_screen(point: Vec3, view_proj: Mat4, viewport: Viewport) -> ScreenPos {
    let ndc = view_proj.project_point3(point);
    ndc_to_screen(ndc.truncate(), viewport)
}
