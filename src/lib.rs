//! # Cross Atlas
//!
//! A Rust library for packing six cube-face textures into a single
//! "horizontal cross" texture atlas.
//!
//! ## Overview
//!
//! Each face image is stretched to a square cell, optionally inset with a
//! transparent gutter, and placed in a 4x3 grid:
//!
//! ```text
//! [    ] [ +Y ] [    ] [    ]
//! [ -X ] [ +Z ] [ +X ] [ -Z ]
//! [    ] [ -Y ] [    ] [    ]
//! ```
//!
//! A JSON sidecar describes where each face landed, in pixels and in UV
//! space, so that a renderer can slice the atlas without re-deriving the layout.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cross_atlas::{compose_from_directory, AtlasConfig, Gutter};
//!
//! let config = AtlasConfig::default()
//!     .with_cell_size(256)
//!     .with_gutter(Gutter::new(2));
//!
//! // Expects positive_x.png .. negative_z.png, or 1.png .. 6.png for dice.
//! let atlas = compose_from_directory("cube_faces", &config)?;
//! atlas.save_with_report("cube_atlas.png")?;
//! ```
//!
//! ## Dice
//!
//! Die faces map to cube faces through [`dice::DICE_FACE_MAPPING`], which keeps
//! opposite faces summing to seven:
//!
//! ```ignore
//! use cross_atlas::dice::{dice_face_set, render_dice_faces, DiceFaceOptions};
//!
//! let faces = render_dice_faces(&DiceFaceOptions::new(128))?;
//! let atlas = cross_atlas::atlas::compose(&dice_face_set(faces), &AtlasConfig::default())?;
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod faces;
pub mod atlas;
pub mod dice;
pub mod process;
pub mod text;

// Re-export main types for convenience
pub use error::{AtlasError, Result};
pub use types::{CubeFace, FaceSet, GridPosition};
pub use config::{AtlasConfig, ConfigOverrides, Gutter, ResizeFilter};
pub use atlas::{
    validate_atlas_file, AtlasValidation, CrossAtlas, CrossAtlasBuilder, UvReport, CROSS_LAYOUT,
};
pub use faces::{discover_face_files, FaceFiles};

use std::path::{Path, PathBuf};

/// Load six face files and compose them into an atlas.
///
/// The configuration is checked before any file is opened.
pub fn compose_from_paths(paths: &FaceSet<PathBuf>, config: &AtlasConfig) -> Result<CrossAtlas> {
    let faces = faces::load_faces(paths, config)?;
    atlas::compose(&faces, config)
}

/// Find the face files in a directory and compose them into an atlas.
///
/// Numbered files (`1.png` .. `6.png`) are placed with the dice mapping.
pub fn compose_from_directory<P: AsRef<Path>>(dir: P, config: &AtlasConfig) -> Result<CrossAtlas> {
    config.validate()?;
    let files = discover_face_files(dir)?;
    compose_from_paths(&files.into_face_set(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_compose_from_directory_numbered() {
        let dir = tempfile::tempdir().unwrap();
        for n in 1..=6u8 {
            RgbaImage::from_pixel(12, 12, Rgba([n * 40, 0, 0, 255]))
                .save(dir.path().join(format!("{}.png", n)))
                .unwrap();
        }

        let config = AtlasConfig::default().with_cell_size(6);
        let atlas = compose_from_directory(dir.path(), &config).unwrap();
        assert_eq!(atlas.image.dimensions(), (24, 18));
        // Face 1 on +X, face 6 on -X.
        assert_eq!(atlas.face_image(CubeFace::PositiveX).get_pixel(3, 3).0, [40, 0, 0, 255]);
        assert_eq!(atlas.face_image(CubeFace::NegativeX).get_pixel(3, 3).0, [240, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_gutter_before_io() {
        let config = AtlasConfig::default()
            .with_cell_size(100)
            .with_gutter(Gutter::new(64));
        assert!(matches!(
            compose_from_directory("/nonexistent/faces", &config),
            Err(AtlasError::InvalidGutter { .. })
        ));
    }

    #[test]
    fn test_incomplete_directory() {
        let dir = tempfile::tempdir().unwrap();
        for face in CubeFace::ALL.into_iter().skip(1) {
            RgbaImage::new(4, 4)
                .save(dir.path().join(format!("{}.png", face.file_stem())))
                .unwrap();
        }
        assert!(matches!(
            compose_from_directory(dir.path(), &AtlasConfig::default()),
            Err(AtlasError::IncompleteFaceSet { .. })
        ));
    }
}
