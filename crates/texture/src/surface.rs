use crate::TextureError;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one rasterization.
///
/// Two surfaces with equal pixels still have different ids; slot stability
/// is checked by id, not by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl SurfaceId {
    fn next() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

#[derive(Debug)]
struct SurfaceData {
    id: SurfaceId,
    width: u32,
    height: u32,
    /// RGBA8, premultiplied alpha, row-major.
    pixels: Vec<u8>,
}

/// A rasterized face texture. Cloning shares the same bitmap.
#[derive(Debug, Clone)]
pub struct Surface {
    inner: Arc<SurfaceData>,
}

impl Surface {
    pub(crate) fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            inner: Arc::new(SurfaceData {
                id: SurfaceId::next(),
                width,
                height,
                pixels,
            }),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.inner.id
    }

    pub fn width(&self) -> u32 {
        self.inner.width
    }

    pub fn height(&self) -> u32 {
        self.inner.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.inner.pixels
    }

    /// RGBA at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = ((y * self.width() + x) * 4) as usize;
        let px = &self.inner.pixels[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Same dimensions and byte-identical pixels.
    pub fn same_pixels(&self, other: &Surface) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.pixels() == other.pixels()
    }

    /// Whether both handles point at the same rasterization.
    pub fn ptr_eq(&self, other: &Surface) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, TextureError> {
        let pixmap = tiny_skia::PixmapRef::from_bytes(self.pixels(), self.width(), self.height())
            .ok_or(TextureError::Allocation {
                width: self.width(),
                height: self.height(),
            })?;
        pixmap
            .encode_png()
            .map_err(|e| TextureError::Encode(e.to_string()))
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<(), TextureError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Surface {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Surface::from_rgba(width, height, pixels)
    }

    #[test]
    fn ids_are_unique() {
        let a = solid(2, 2, [0, 0, 0, 255]);
        let b = solid(2, 2, [0, 0, 0, 255]);
        assert_ne!(a.id(), b.id());
        assert!(a.same_pixels(&b));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn clone_shares_identity() {
        let a = solid(1, 1, [1, 2, 3, 255]);
        let b = a.clone();
        assert_eq!(a.id(), b.id());
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn pixel_lookup_and_bounds() {
        let s = solid(3, 2, [10, 20, 30, 255]);
        assert_eq!(s.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(s.pixel(3, 0), None);
        assert_eq!(s.pixel(0, 2), None);
    }

    #[test]
    fn write_png_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        solid(4, 4, [255, 0, 0, 255]).write_png(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
