use crate::Rgb;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the six cube faces.
///
/// Discriminants are the material indices of the box geometry: +X, -X, +Y,
/// -Y, +Z, -Z. Both triangles of a face carry the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaceId {
    Right = 0,
    Left = 1,
    Top = 2,
    Bottom = 3,
    Front = 4,
    Back = 5,
}

/// A face index outside `0..6`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("face index {0} out of range (expected 0..6)")]
pub struct InvalidFaceIndex(pub usize);

/// Text that names no face, by index or by side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFaceError {
    #[error(transparent)]
    Index(#[from] InvalidFaceIndex),
    #[error("unknown face {0:?} (expected 0-5 or right, left, top, bottom, front, back)")]
    UnknownSide(String),
}

impl FaceId {
    pub const COUNT: usize = 6;

    /// All faces in index order.
    pub const ALL: [FaceId; 6] = [
        FaceId::Right,
        FaceId::Left,
        FaceId::Top,
        FaceId::Bottom,
        FaceId::Front,
        FaceId::Back,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, InvalidFaceIndex> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(InvalidFaceIndex(index))
    }

    /// Outward unit normal in model space.
    pub fn normal(self) -> Vec3 {
        match self {
            FaceId::Right => Vec3::X,
            FaceId::Left => Vec3::NEG_X,
            FaceId::Top => Vec3::Y,
            FaceId::Bottom => Vec3::NEG_Y,
            FaceId::Front => Vec3::Z,
            FaceId::Back => Vec3::NEG_Z,
        }
    }

    /// Fixed color and display name for this face.
    pub fn spec(self) -> &'static FaceSpec {
        &FACE_PALETTE[self.index()]
    }

    pub fn side_name(self) -> &'static str {
        match self {
            FaceId::Right => "right",
            FaceId::Left => "left",
            FaceId::Top => "top",
            FaceId::Bottom => "bottom",
            FaceId::Front => "front",
            FaceId::Back => "back",
        }
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.side_name(), self.index())
    }
}

impl std::str::FromStr for FaceId {
    type Err = ParseFaceError;

    /// Accepts an index (`"2"`) or a side name (`"top"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<usize>() {
            return Ok(Self::from_index(index)?);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|face| face.side_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseFaceError::UnknownSide(s.to_owned()))
    }
}

/// Fixed per-face configuration, chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSpec {
    pub color: Rgb,
    pub name: &'static str,
}

/// CSS named colors, one per face in index order.
pub const FACE_PALETTE: [FaceSpec; 6] = [
    FaceSpec {
        color: Rgb::new(255, 0, 0),
        name: "Red",
    },
    FaceSpec {
        color: Rgb::new(0, 128, 0),
        name: "Green",
    },
    FaceSpec {
        color: Rgb::new(0, 0, 255),
        name: "Blue",
    },
    FaceSpec {
        color: Rgb::new(255, 255, 0),
        name: "Yellow",
    },
    FaceSpec {
        color: Rgb::new(128, 0, 128),
        name: "Purple",
    },
    FaceSpec {
        color: Rgb::new(255, 165, 0),
        name: "Orange",
    },
];

/// Exactly one `T` per face, addressed by `FaceId`.
///
/// Slots are only swapped through [`FaceMap::replace`], never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceMap<T> {
    slots: [T; 6],
}

impl<T> FaceMap<T> {
    pub fn from_fn(mut f: impl FnMut(FaceId) -> T) -> Self {
        Self {
            slots: FaceId::ALL.map(&mut f),
        }
    }

    pub fn get(&self, face: FaceId) -> &T {
        &self.slots[face.index()]
    }

    /// Swap in a new value for `face`, returning the superseded one.
    pub fn replace(&mut self, face: FaceId, value: T) -> T {
        std::mem::replace(&mut self.slots[face.index()], value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &T)> {
        FaceId::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(FaceId, &T) -> U) -> FaceMap<U> {
        FaceMap::from_fn(|face| f(face, self.get(face)))
    }

    pub fn as_array(&self) -> &[T; 6] {
        &self.slots
    }
}

impl<T: Default> Default for FaceMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> std::ops::Index<FaceId> for FaceMap<T> {
    type Output = T;

    fn index(&self, face: FaceId) -> &T {
        self.get(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_round_trip_in_order() {
        for (i, face) in FaceId::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
            assert_eq!(FaceId::from_index(i).unwrap(), *face);
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(FaceId::from_index(6), Err(InvalidFaceIndex(6)));
    }

    #[test]
    fn parse_accepts_index_and_name() {
        assert_eq!("2".parse::<FaceId>().unwrap(), FaceId::Top);
        assert_eq!("Back".parse::<FaceId>().unwrap(), FaceId::Back);
        assert_eq!(
            "diagonal".parse::<FaceId>(),
            Err(ParseFaceError::UnknownSide("diagonal".into()))
        );
        assert_eq!(
            "9".parse::<FaceId>(),
            Err(ParseFaceError::Index(InvalidFaceIndex(9)))
        );
        let msg = "diagonal".parse::<FaceId>().unwrap_err().to_string();
        assert!(msg.contains("\"diagonal\""));
        assert!(!msg.contains(&usize::MAX.to_string()));
    }

    #[test]
    fn normals_are_unit_and_distinct() {
        for a in FaceId::ALL {
            assert!((a.normal().length() - 1.0).abs() < 1e-6);
            for b in FaceId::ALL {
                if a != b {
                    assert_ne!(a.normal(), b.normal());
                }
            }
        }
    }

    #[test]
    fn palette_matches_face_order() {
        assert_eq!(FaceId::Right.spec().name, "Red");
        assert_eq!(FaceId::Back.spec().color, Rgb::new(255, 165, 0));
    }

    #[test]
    fn replace_touches_one_slot() {
        let mut map = FaceMap::from_fn(|face| face.index() * 10);
        let old = map.replace(FaceId::Top, 99);
        assert_eq!(old, 20);
        assert_eq!(map[FaceId::Top], 99);
        for face in FaceId::ALL.into_iter().filter(|f| *f != FaceId::Top) {
            assert_eq!(map[face], face.index() * 10);
        }
    }

    #[test]
    fn iter_yields_faces_in_index_order() {
        let map: FaceMap<u8> = FaceMap::default();
        let faces: Vec<FaceId> = map.iter().map(|(f, _)| f).collect();
        assert_eq!(faces, FaceId::ALL.to_vec());
    }
}
