use crate::CubeGeometry;
use crate::projection::screen_to_ndc;
use facecube_common::{FaceId, ScreenPos, Viewport};
use glam::{Mat4, Vec3};

const EPSILON: f32 = 1e-7;

/// A world-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray from the near plane through the pixel at `pos`.
    pub fn from_screen(pos: ScreenPos, view_proj: Mat4, viewport: Viewport) -> Self {
        let ndc = screen_to_ndc(pos, viewport);
        let inv = view_proj.inverse();
        // Depth runs 0 (near) to 1 (far) for the right-handed perspective.
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Self::new(near, far - near)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` to the triangle, if it is hit in front of the origin.
/// Two-sided (Möller–Trumbore).
pub fn intersect_triangle(ray: &Ray, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

/// Nearest hit of a ray against the cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub face: FaceId,
    /// Triangle index within the cube's index buffer.
    pub triangle: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// Intersect `ray` with every triangle of `geometry` placed by `model`.
///
/// The face comes from the triangle's material group, so either triangle of
/// a face yields the same answer. `None` means the ray missed the box.
pub fn pick_face(ray: &Ray, geometry: &CubeGeometry, model: Mat4) -> Option<PickHit> {
    geometry
        .triangles()
        .into_iter()
        .enumerate()
        .filter_map(|(triangle, (verts, face))| {
            let world = verts.map(|v| model.transform_point3(v));
            let distance = intersect_triangle(ray, world)?;
            Some(PickHit {
                face,
                triangle,
                distance,
                point: ray.at(distance),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec2};

    #[test]
    fn triangle_hit_and_miss() {
        let tri = [Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let hit = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!((intersect_triangle(&hit, tri).unwrap() - 5.0).abs() < 1e-5);
        let miss = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(intersect_triangle(&miss, tri), None);
        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(intersect_triangle(&behind, tri), None);
    }

    #[test]
    fn axis_rays_hit_matching_faces() {
        let g = CubeGeometry::default();
        for face in FaceId::ALL {
            let n = face.normal();
            let ray = Ray::new(n * 5.0, -n);
            let hit = pick_face(&ray, &g, Mat4::IDENTITY).unwrap();
            assert_eq!(hit.face, face);
            assert!((hit.distance - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn both_triangles_of_each_face_pick_the_face() {
        let g = CubeGeometry::default();
        for face in FaceId::ALL {
            let [tl, tr, br, bl] = g.face_corners(face);
            let n = face.normal();
            // Points near opposite corners fall in different triangles.
            let near_bl = bl + (tr - bl) * 0.1 + (br - bl) * 0.05;
            let near_tr = tr + (bl - tr) * 0.1 + (tl - tr) * 0.05;
            let mut triangles = Vec::new();
            for p in [near_bl, near_tr] {
                let hit = pick_face(&Ray::new(p + n * 3.0, -n), &g, Mat4::IDENTITY).unwrap();
                assert_eq!(hit.face, face);
                triangles.push(hit.triangle);
            }
            assert_ne!(triangles[0], triangles[1], "{face}");
        }
    }

    #[test]
    fn miss_reports_nothing() {
        let g = CubeGeometry::default();
        let ray = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::NEG_Z);
        assert_eq!(pick_face(&ray, &g, Mat4::IDENTITY), None);
    }

    #[test]
    fn model_rotation_moves_faces() {
        let g = CubeGeometry::default();
        let model = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        // Rotating +90 about Y brings the -X face to +Z.
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(pick_face(&ray, &g, model).unwrap().face, FaceId::Left);
    }

    #[test]
    fn screen_center_ray_points_forward() {
        let vp = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0)
            * Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let ray = Ray::from_screen(Vec2::new(50.0, 50.0), vp, Viewport::new(100.0, 100.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-3);
        assert!((ray.origin.z - 4.9).abs() < 1e-2);
    }
}
