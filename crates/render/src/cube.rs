use crate::picking::{Ray, pick_face};
use crate::projection::project_to_screen;
use crate::{CubeGeometry, OrbitCamera};
use facecube_common::{FaceClick, FaceId, FaceMap, ScreenPos, Transform, Viewport};
use facecube_texture::Surface;

/// What a face click reports beyond the face index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickReport {
    FaceOnly,
    /// Also project the face reference point to screen pixels.
    FaceAndAnchor,
}

/// The surfaces currently bound to each face material.
#[derive(Debug, Default)]
pub struct MaterialSlots {
    slots: FaceMap<Option<Surface>>,
}

impl MaterialSlots {
    pub fn get(&self, face: FaceId) -> Option<&Surface> {
        self.slots.get(face).as_ref()
    }

    /// Bind `surfaces` in face order. Returns the faces whose surface changed.
    pub fn assign(&mut self, surfaces: &FaceMap<Surface>) -> Vec<FaceId> {
        let mut changed = Vec::new();
        for (face, surface) in surfaces.iter() {
            let current = self.slots.get(face).as_ref().map(Surface::id);
            if current != Some(surface.id()) {
                self.slots.replace(face, Some(surface.clone()));
                changed.push(face);
            }
        }
        changed
    }
}

/// A clickable six-faced box.
///
/// Renders whatever surfaces it is handed and turns pointer clicks into
/// [`FaceClick`] reports. Holds no label state of its own.
#[derive(Debug)]
pub struct InteractiveCube {
    geometry: CubeGeometry,
    transform: Transform,
    report: ClickReport,
    materials: MaterialSlots,
}

impl InteractiveCube {
    pub fn new(report: ClickReport) -> Self {
        Self {
            geometry: CubeGeometry::default(),
            transform: Transform::default(),
            report,
            materials: MaterialSlots::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn geometry(&self) -> &CubeGeometry {
        &self.geometry
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn materials(&self) -> &MaterialSlots {
        &self.materials
    }

    /// Bind the six face surfaces. Rendering the same set again is a no-op.
    pub fn render(&mut self, surfaces: &FaceMap<Surface>) -> Vec<FaceId> {
        let changed = self.materials.assign(surfaces);
        if !changed.is_empty() {
            tracing::debug!(?changed, "face materials rebound");
        }
        changed
    }

    /// Resolve a click at `pointer`. `None` when the box was not hit.
    pub fn on_pointer_click(
        &self,
        pointer: ScreenPos,
        camera: &OrbitCamera,
        viewport: Viewport,
    ) -> Option<FaceClick> {
        let ray = Ray::from_screen(pointer, camera.view_projection(), viewport);
        let Some(hit) = pick_face(&ray, &self.geometry, self.transform.matrix()) else {
            tracing::trace!(?pointer, "click missed the cube");
            return None;
        };
        let anchor = match self.report {
            ClickReport::FaceOnly => None,
            ClickReport::FaceAndAnchor => Some(self.anchor_for(hit.face, camera, viewport)),
        };
        tracing::debug!(face = %hit.face, triangle = hit.triangle, ?anchor, "face clicked");
        Some(FaceClick {
            face: hit.face,
            anchor,
        })
    }

    /// Screen position of `face`'s reference point under `camera`.
    pub fn anchor_for(&self, face: FaceId, camera: &OrbitCamera, viewport: Viewport) -> ScreenPos {
        let world = self
            .transform
            .matrix()
            .transform_point3(self.geometry.reference_point(face));
        project_to_screen(world, camera.view_projection(), viewport)
    }
}
