use facecube_common::FaceId;
use glam::Vec3;
use std::ops::Range;

/// One cube vertex: position, outward normal, texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

const VERTS_PER_FACE: usize = 4;
const INDICES_PER_FACE: usize = 6;

/// Axis-aligned box centered on the origin with one material group per face.
///
/// Vertices and indices are laid out face by face in `FaceId` order, so
/// triangles `2i` and `2i + 1` both belong to face `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeGeometry {
    pub half_extent: f32,
}

impl Default for CubeGeometry {
    /// A 2x2x2 box.
    fn default() -> Self {
        Self { half_extent: 1.0 }
    }
}

/// Texture axes of a face as seen from outside: (right, up).
fn face_axes(face: FaceId) -> (Vec3, Vec3) {
    match face {
        FaceId::Right => (Vec3::NEG_Z, Vec3::Y),
        FaceId::Left => (Vec3::Z, Vec3::Y),
        FaceId::Top => (Vec3::X, Vec3::NEG_Z),
        FaceId::Bottom => (Vec3::X, Vec3::Z),
        FaceId::Front => (Vec3::X, Vec3::Y),
        FaceId::Back => (Vec3::NEG_X, Vec3::Y),
    }
}

impl CubeGeometry {
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    /// Corners of `face`: top-left, top-right, bottom-right, bottom-left.
    pub fn face_corners(&self, face: FaceId) -> [Vec3; 4] {
        let h = self.half_extent;
        let (u, v) = face_axes(face);
        let c = face.normal() * h;
        [
            c + (-u + v) * h,
            c + (u + v) * h,
            c + (u - v) * h,
            c + (-u - v) * h,
        ]
    }

    /// Model-space point that anchors overlays for `face`: its center.
    pub fn reference_point(&self, face: FaceId) -> Vec3 {
        face.normal() * self.half_extent
    }

    pub fn vertices(&self) -> Vec<CubeVertex> {
        const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        FaceId::ALL
            .iter()
            .flat_map(|&face| {
                let normal = face.normal().to_array();
                self.face_corners(face)
                    .into_iter()
                    .zip(UVS)
                    .map(move |(p, uv)| CubeVertex {
                        position: p.to_array(),
                        normal,
                        uv,
                    })
            })
            .collect()
    }

    /// Counter-clockwise when viewed from outside.
    pub fn indices(&self) -> Vec<u16> {
        (0..FaceId::COUNT as u16)
            .flat_map(|i| {
                let b = i * VERTS_PER_FACE as u16;
                [b, b + 3, b + 2, b + 2, b + 1, b]
            })
            .collect()
    }

    /// Index buffer range drawn with `face`'s material.
    pub fn index_range(&self, face: FaceId) -> Range<u32> {
        let start = (face.index() * INDICES_PER_FACE) as u32;
        start..start + INDICES_PER_FACE as u32
    }

    /// Material group of a triangle, by its position in the index buffer.
    pub fn face_of_triangle(&self, triangle: usize) -> Option<FaceId> {
        FaceId::from_index(triangle / 2).ok()
    }

    /// Every triangle in model space with its owning face.
    pub fn triangles(&self) -> Vec<([Vec3; 3], FaceId)> {
        let vertices = self.vertices();
        let indices = self.indices();
        indices
            .chunks_exact(3)
            .enumerate()
            .filter_map(|(tri, idx)| {
                let face = self.face_of_triangle(tri)?;
                let p = |i: u16| Vec3::from_array(vertices[i as usize].position);
                Some(([p(idx[0]), p(idx[1]), p(idx[2])], face))
            })
            .collect()
    }
}
