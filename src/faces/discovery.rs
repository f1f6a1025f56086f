//! Locating the six face images in an input directory.

use crate::dice::dice_face_set;
use crate::error::{AtlasError, Result};
use crate::types::{CubeFace, FaceSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Face files found in a directory.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceFiles {
    /// `positive_x.png` .. `negative_z.png`.
    Named(FaceSet<PathBuf>),
    /// `1.png` .. `6.png`, treated as die faces 1 through 6.
    Numbered([PathBuf; 6]),
}

impl FaceFiles {
    /// Resolve to a cube face assignment. Numbered files go through the dice mapping.
    pub fn into_face_set(self) -> FaceSet<PathBuf> {
        match self {
            FaceFiles::Named(set) => set,
            FaceFiles::Numbered(paths) => dice_face_set(paths),
        }
    }

    pub fn is_dice(&self) -> bool {
        matches!(self, FaceFiles::Numbered(_))
    }
}

/// File name expected for a named face.
pub fn named_file(face: CubeFace) -> String {
    format!("{}.png", face.file_stem())
}

/// Find a complete set of face images in `dir`.
///
/// Named files take precedence. If neither convention is complete, the error
/// lists the missing files of whichever convention had more files present.
pub fn discover_face_files<P: AsRef<Path>>(dir: P) -> Result<FaceFiles> {
    let dir = dir.as_ref();

    let named: Vec<(CubeFace, PathBuf)> = CubeFace::ALL
        .into_iter()
        .map(|face| (face, dir.join(named_file(face))))
        .collect();
    let named_missing: Vec<String> = missing_files(named.iter().map(|(_, p)| p));

    if named_missing.is_empty() {
        debug!(dir = %dir.display(), "found named face files");
        return Ok(FaceFiles::Named(FaceSet::from_entries(named)?));
    }

    let numbered: [PathBuf; 6] = std::array::from_fn(|i| dir.join(format!("{}.png", i + 1)));
    let numbered_missing = missing_files(numbered.iter());

    if numbered_missing.is_empty() {
        debug!(dir = %dir.display(), "found numbered face files");
        return Ok(FaceFiles::Numbered(numbered));
    }

    let missing = if numbered_missing.len() < named_missing.len() {
        numbered_missing
    } else {
        named_missing
    };
    Err(AtlasError::incomplete(missing, Vec::<String>::new()))
}

fn missing_files<'a>(paths: impl Iterator<Item = &'a PathBuf>) -> Vec<String> {
    paths
        .filter(|p| !p.is_file())
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_named_files() {
        let dir = tempfile::tempdir().unwrap();
        for face in CubeFace::ALL {
            touch(dir.path(), &named_file(face));
        }

        let files = discover_face_files(dir.path()).unwrap();
        assert!(!files.is_dice());
        let set = files.into_face_set();
        assert_eq!(set[CubeFace::NegativeY], dir.path().join("negative_y.png"));
    }

    #[test]
    fn test_numbered_files_use_dice_mapping() {
        let dir = tempfile::tempdir().unwrap();
        for n in 1..=6 {
            touch(dir.path(), &format!("{}.png", n));
        }

        let files = discover_face_files(dir.path()).unwrap();
        assert!(files.is_dice());
        let set = files.into_face_set();
        assert_eq!(set[CubeFace::PositiveX], dir.path().join("1.png"));
        assert_eq!(set[CubeFace::NegativeX], dir.path().join("6.png"));
    }

    #[test]
    fn test_five_of_six_is_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        for face in CubeFace::ALL.into_iter().filter(|f| *f != CubeFace::NegativeZ) {
            touch(dir.path(), &named_file(face));
        }

        match discover_face_files(dir.path()) {
            Err(AtlasError::IncompleteFaceSet { missing, .. }) => {
                assert_eq!(missing, vec!["negative_z.png".to_string()]);
            }
            other => panic!("expected IncompleteFaceSet, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_numbered_reports_numbered_gaps() {
        let dir = tempfile::tempdir().unwrap();
        for n in 1..=5 {
            touch(dir.path(), &format!("{}.png", n));
        }

        match discover_face_files(dir.path()) {
            Err(AtlasError::IncompleteFaceSet { missing, .. }) => {
                assert_eq!(missing, vec!["6.png".to_string()]);
            }
            other => panic!("expected IncompleteFaceSet, got {:?}", other),
        }
    }
}
