//! Shared types used throughout the library.

mod face;

pub use face::CubeFace;

use crate::error::{AtlasError, Result};
use serde::{Deserialize, Serialize};

/// A cell in the 4x3 atlas grid. Rows count upward from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub col: u32,
    pub row: u32,
}

impl GridPosition {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Exactly one value per cube face.
///
/// Construction fails with [`AtlasError::IncompleteFaceSet`] when a face is
/// missing, repeated or unrecognized, so holding a `FaceSet` means all six
/// faces are present.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSet<T> {
    faces: [T; 6],
}

impl<T> FaceSet<T> {
    /// Build a set from values given in [`CubeFace::ALL`] order.
    pub fn new(faces: [T; 6]) -> Self {
        Self { faces }
    }

    /// Build a set by computing a value for every face.
    pub fn from_fn(mut f: impl FnMut(CubeFace) -> T) -> Self {
        Self {
            faces: CubeFace::ALL.map(|face| f(face)),
        }
    }

    /// Build a set from `(face, value)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (CubeFace, T)>) -> Result<Self> {
        let mut slots: [Option<T>; 6] = Default::default();
        let mut unexpected = Vec::new();

        for (face, value) in entries {
            let slot = &mut slots[face.index()];
            if slot.is_some() {
                unexpected.push(format!("duplicate {}", face));
            } else {
                *slot = Some(value);
            }
        }

        Self::from_slots(slots, unexpected)
    }

    /// Build a set from `(name, value)` pairs, parsing names with [`CubeFace::from_str`].
    pub fn from_named<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, T)>) -> Result<Self> {
        let mut slots: [Option<T>; 6] = Default::default();
        let mut unexpected = Vec::new();

        for (name, value) in entries {
            let name = name.as_ref();
            match CubeFace::from_str(name) {
                Some(face) if slots[face.index()].is_none() => slots[face.index()] = Some(value),
                Some(face) => unexpected.push(format!("duplicate {}", face)),
                None => unexpected.push(name.to_string()),
            }
        }

        Self::from_slots(slots, unexpected)
    }

    fn from_slots(slots: [Option<T>; 6], unexpected: Vec<String>) -> Result<Self> {
        let missing: Vec<CubeFace> = CubeFace::ALL
            .into_iter()
            .filter(|face| slots[face.index()].is_none())
            .collect();

        if unexpected.is_empty() {
            if let [Some(a), Some(b), Some(c), Some(d), Some(e), Some(f)] = slots {
                return Ok(Self {
                    faces: [a, b, c, d, e, f],
                });
            }
        }

        Err(AtlasError::incomplete(missing, unexpected))
    }

    /// Get the value for a face.
    pub fn get(&self, face: CubeFace) -> &T {
        &self.faces[face.index()]
    }

    /// Get a mutable reference to the value for a face.
    pub fn get_mut(&mut self, face: CubeFace) -> &mut T {
        &mut self.faces[face.index()]
    }

    /// Iterate over `(face, value)` pairs in [`CubeFace::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (CubeFace, &T)> {
        CubeFace::ALL.into_iter().zip(self.faces.iter())
    }

    /// Transform every value, keeping the face assignment.
    pub fn map<U>(self, mut f: impl FnMut(CubeFace, T) -> U) -> FaceSet<U> {
        let [px, nx, py, ny, pz, nz] = self.faces;
        FaceSet {
            faces: [
                f(CubeFace::PositiveX, px),
                f(CubeFace::NegativeX, nx),
                f(CubeFace::PositiveY, py),
                f(CubeFace::NegativeY, ny),
                f(CubeFace::PositiveZ, pz),
                f(CubeFace::NegativeZ, nz),
            ],
        }
    }

    /// Consume the set into `(face, value)` pairs.
    pub fn into_entries(self) -> impl Iterator<Item = (CubeFace, T)> {
        CubeFace::ALL.into_iter().zip(self.faces)
    }
}

impl<T> std::ops::Index<CubeFace> for FaceSet<T> {
    type Output = T;

    fn index(&self, face: CubeFace) -> &T {
        self.get(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_complete() {
        let set = FaceSet::from_entries(CubeFace::ALL.into_iter().map(|f| (f, f.index()))).unwrap();
        for face in CubeFace::ALL {
            assert_eq!(set[face], face.index());
        }
    }

    #[test]
    fn test_from_entries_missing_face() {
        let entries = CubeFace::ALL
            .into_iter()
            .filter(|f| *f != CubeFace::NegativeY)
            .map(|f| (f, ()));
        match FaceSet::from_entries(entries) {
            Err(AtlasError::IncompleteFaceSet { missing, unexpected }) => {
                assert_eq!(missing, vec!["negativeY".to_string()]);
                assert!(unexpected.is_empty());
            }
            other => panic!("expected IncompleteFaceSet, got {:?}", other),
        }
    }

    #[test]
    fn test_from_entries_duplicate_face() {
        let entries = CubeFace::ALL
            .into_iter()
            .map(|f| (f, 0))
            .chain(std::iter::once((CubeFace::PositiveX, 1)));
        assert!(matches!(
            FaceSet::from_entries(entries),
            Err(AtlasError::IncompleteFaceSet { .. })
        ));
    }

    #[test]
    fn test_from_named_rejects_unknown_names() {
        let mut entries: Vec<(String, u8)> = CubeFace::ALL
            .iter()
            .map(|f| (f.file_stem().to_string(), 0))
            .collect();
        assert!(FaceSet::from_named(entries.clone()).is_ok());

        entries.push(("top".to_string(), 0));
        match FaceSet::from_named(entries) {
            Err(AtlasError::IncompleteFaceSet { missing, unexpected }) => {
                assert!(missing.is_empty());
                assert_eq!(unexpected, vec!["top".to_string()]);
            }
            other => panic!("expected IncompleteFaceSet, got {:?}", other),
        }
    }

    #[test]
    fn test_map_keeps_assignment() {
        let set = FaceSet::from_fn(|f| f.index()).map(|face, i| (face, i * 10));
        for (face, (mapped_face, value)) in set.iter() {
            assert_eq!(face, *mapped_face);
            assert_eq!(*value, face.index() * 10);
        }
    }
}
