//! Horizontal cross atlas composition.

use super::layout::{atlas_dimensions, placement, PixelRect, CROSS_LAYOUT};
use super::report::{report_path_for, UvReport};
use super::{encode_png, write_atomic, write_atomic_all};
use crate::config::{AtlasConfig, Gutter};
use crate::error::{AtlasError, Result};
use crate::types::{CubeFace, FaceSet};
use image::{imageops, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::info;

/// A composed cross atlas.
#[derive(Debug, Clone)]
pub struct CrossAtlas {
    /// Size of one grid cell in pixels.
    pub cell_size: u32,
    /// Gutter applied to the faces before composition.
    pub gutter: Gutter,
    /// RGBA pixels, `cell_size * 4` by `cell_size * 3`.
    pub image: RgbaImage,
}

impl CrossAtlas {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel bounds of a face within the atlas.
    pub fn face_rect(&self, face: CubeFace) -> PixelRect {
        placement(face).pixel_rect(self.cell_size)
    }

    /// Copy a face's cell out of the atlas.
    pub fn face_image(&self, face: CubeFace) -> RgbaImage {
        let rect = self.face_rect(face);
        imageops::crop_imm(&self.image, rect.x[0], rect.y[0], rect.width(), rect.height()).to_image()
    }

    /// UV mapping report for this atlas.
    pub fn report(&self, atlas_name: impl Into<String>) -> Result<UvReport> {
        UvReport::new(atlas_name, self.cell_size, self.gutter)
    }

    /// Export the atlas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }

    /// Write the atlas as PNG. The file only appears once fully written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let png = self.to_png()?;
        write_atomic(path, &png)?;
        info!(path = %path.display(), width = self.width(), height = self.height(), "wrote atlas");
        Ok(())
    }

    /// Write the atlas and its `_uv_mapping.json` sidecar. Returns the sidecar path.
    ///
    /// Both files are staged before either is renamed, and the sidecar is
    /// renamed first, so the atlas never appears without its report.
    pub fn save_with_report<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let report_path = report_path_for(path);

        let png = self.to_png()?;
        let json = self.report(name)?.to_json()?;
        write_atomic_all(&[
            (report_path.as_path(), json.as_bytes()),
            (path, png.as_slice()),
        ])?;

        info!(
            path = %path.display(),
            report = %report_path.display(),
            width = self.width(),
            height = self.height(),
            "wrote atlas and UV mapping report"
        );
        Ok(report_path)
    }
}

/// Collects six prepared faces and composes them into a [`CrossAtlas`].
pub struct CrossAtlasBuilder {
    config: AtlasConfig,
    faces: Vec<(CubeFace, RgbaImage)>,
}

impl CrossAtlasBuilder {
    /// Create a new builder. Fails on an invalid cell size or gutter.
    pub fn new(config: AtlasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            faces: Vec::with_capacity(6),
        })
    }

    /// Add a prepared `cell_size` x `cell_size` face.
    pub fn add_face(&mut self, face: CubeFace, image: RgbaImage) -> &mut Self {
        self.faces.push((face, image));
        self
    }

    /// Compose the atlas. Fails unless every face was added exactly once.
    pub fn build(self) -> Result<CrossAtlas> {
        let faces = FaceSet::from_entries(self.faces)?;
        compose(&faces, &self.config)
    }
}

/// Lay six prepared faces out in the horizontal cross.
///
/// Face pixels replace the canvas, including transparent gutter pixels, so
/// `config.background` only shows in the six empty cells.
pub fn compose(faces: &FaceSet<RgbaImage>, config: &AtlasConfig) -> Result<CrossAtlas> {
    config.validate()?;
    let cell_size = config.cell_size;

    for (face, image) in faces.iter() {
        if image.dimensions() != (cell_size, cell_size) {
            return Err(AtlasError::FaceSize {
                face: face.to_string(),
                width: image.width(),
                height: image.height(),
                cell_size,
            });
        }
    }

    let (width, height) = atlas_dimensions(cell_size)?;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(config.background));

    for p in CROSS_LAYOUT {
        let (x, y) = p.pixel_origin(cell_size);
        imageops::replace(&mut canvas, faces.get(p.face), x as i64, y as i64);
    }

    info!(width, height, cell_size, "composed cross atlas");

    Ok(CrossAtlas {
        cell_size,
        gutter: config.gutter,
        image: canvas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::validate::validate_image;
    use crate::faces::prepare_faces;
    use image::DynamicImage;

    const COLORS: [[u8; 4]; 6] = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 0, 255],
        [0, 255, 255, 255],
        [255, 0, 255, 255],
    ];

    fn solid_faces(size: u32) -> FaceSet<RgbaImage> {
        FaceSet::from_fn(|face| RgbaImage::from_pixel(size, size, Rgba(COLORS[face.index()])))
    }

    #[test]
    fn test_atlas_dimensions() {
        for size in [1, 7, 64, 256] {
            let config = AtlasConfig::default().with_cell_size(size);
            let atlas = compose(&solid_faces(size), &config).unwrap();
            assert_eq!(atlas.image.dimensions(), (size * 4, size * 3));
        }
    }

    #[test]
    fn test_solid_color_scenario() {
        let assignment = [
            (CubeFace::PositiveZ, [255, 0, 0, 255]),
            (CubeFace::PositiveX, [0, 255, 0, 255]),
            (CubeFace::NegativeX, [0, 0, 255, 255]),
            (CubeFace::NegativeZ, [255, 255, 0, 255]),
            (CubeFace::PositiveY, [0, 255, 255, 255]),
            (CubeFace::NegativeY, [255, 0, 255, 255]),
        ];
        let faces = FaceSet::from_entries(
            assignment
                .iter()
                .map(|(face, color)| (*face, RgbaImage::from_pixel(256, 256, Rgba(*color)))),
        )
        .unwrap();

        let config = AtlasConfig::default().with_cell_size(256);
        let atlas = compose(&faces, &config).unwrap();
        assert_eq!(atlas.image.dimensions(), (1024, 768));

        for y in 256..512 {
            for x in 256..512 {
                assert_eq!(atlas.image.get_pixel(x, y).0, [255, 0, 0, 255]);
            }
        }
        assert_eq!(atlas.image.get_pixel(600, 300).0, [0, 255, 0, 255]);
        assert_eq!(atlas.image.get_pixel(300, 10).0, [0, 255, 255, 255]);
        assert_eq!(atlas.image.get_pixel(300, 700).0, [255, 0, 255, 255]);
        assert_eq!(atlas.image.get_pixel(10, 10).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_reported_regions_match_pixels() {
        let size = 16;
        let faces = solid_faces(size);
        let atlas = compose(&faces, &AtlasConfig::default().with_cell_size(size)).unwrap();
        let report = atlas.report("atlas.png").unwrap();

        for entry in &report.face_mapping {
            let r = entry.pixel_range;
            let region =
                imageops::crop_imm(&atlas.image, r.x[0], r.y[0], r.width(), r.height()).to_image();
            assert_eq!(&region, faces.get(entry.face), "face {}", entry.face);
            assert_eq!(atlas.face_image(entry.face), region);
        }
    }

    #[test]
    fn test_empty_cells_are_transparent() {
        let size = 8;
        let atlas = compose(&solid_faces(size), &AtlasConfig::default().with_cell_size(size)).unwrap();
        for (x, y, pixel) in atlas.image.enumerate_pixels() {
            let covered = CROSS_LAYOUT
                .iter()
                .any(|p| p.pixel_rect(size).contains(x, y));
            if !covered {
                assert_eq!(pixel.0, [0, 0, 0, 0], "({}, {})", x, y);
            } else {
                assert_eq!(pixel.0[3], 255);
            }
        }
    }

    #[test]
    fn test_background_fills_empty_cells_only() {
        let size = 8;
        let config = AtlasConfig::default()
            .with_cell_size(size)
            .with_background([10, 10, 10, 255]);
        let atlas = compose(&solid_faces(size), &config).unwrap();
        assert_eq!(atlas.image.get_pixel(0, 0).0, [10, 10, 10, 255]);
        assert_eq!(atlas.face_image(CubeFace::PositiveY).get_pixel(0, 0).0, COLORS[2]);
    }

    #[test]
    fn test_composition_is_deterministic() {
        let config = AtlasConfig::default().with_cell_size(32);
        let a = compose(&solid_faces(32), &config).unwrap().to_png().unwrap();
        let b = compose(&solid_faces(32), &config).unwrap().to_png().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gutter_invariant_in_atlas() {
        let size = 20;
        let gutter = 3;
        let config = AtlasConfig::default()
            .with_cell_size(size)
            .with_gutter(Gutter::new(gutter))
            .with_background([50, 50, 50, 255]);
        let sources = FaceSet::from_fn(|face| {
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 40, Rgba(COLORS[face.index()])))
        });
        let atlas = compose(&prepare_faces(&sources, &config).unwrap(), &config).unwrap();

        for face in CubeFace::ALL {
            let cell = atlas.face_image(face);
            for (x, y, pixel) in cell.enumerate_pixels() {
                let in_border =
                    x < gutter || y < gutter || x >= size - gutter || y >= size - gutter;
                if in_border {
                    assert_eq!(pixel.0[3], 0, "{} border ({}, {})", face, x, y);
                } else {
                    assert_eq!(pixel.0, COLORS[face.index()], "{} content ({}, {})", face, x, y);
                }
            }
        }
    }

    #[test]
    fn test_builder_requires_all_faces() {
        let mut builder = CrossAtlasBuilder::new(AtlasConfig::default().with_cell_size(4)).unwrap();
        for face in CubeFace::ALL.into_iter().take(5) {
            builder.add_face(face, RgbaImage::new(4, 4));
        }
        assert!(matches!(
            builder.build(),
            Err(AtlasError::IncompleteFaceSet { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_extra_face() {
        let mut builder = CrossAtlasBuilder::new(AtlasConfig::default().with_cell_size(4)).unwrap();
        for face in CubeFace::ALL {
            builder.add_face(face, RgbaImage::new(4, 4));
        }
        builder.add_face(CubeFace::PositiveX, RgbaImage::new(4, 4));
        assert!(matches!(
            builder.build(),
            Err(AtlasError::IncompleteFaceSet { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_invalid_gutter() {
        let config = AtlasConfig::default()
            .with_cell_size(100)
            .with_gutter(Gutter::new(64));
        assert!(matches!(
            CrossAtlasBuilder::new(config),
            Err(AtlasError::InvalidGutter { .. })
        ));
    }

    #[test]
    fn test_wrong_face_size_rejected() {
        let mut faces = solid_faces(8);
        *faces.get_mut(CubeFace::NegativeZ) = RgbaImage::new(9, 8);
        assert!(matches!(
            compose(&faces, &AtlasConfig::default().with_cell_size(8)),
            Err(AtlasError::FaceSize { .. })
        ));
    }

    #[test]
    fn test_save_with_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.png");
        let atlas = compose(&solid_faces(8), &AtlasConfig::default().with_cell_size(8)).unwrap();

        let report_path = atlas.save_with_report(&path).unwrap();
        assert_eq!(report_path, dir.path().join("cube_uv_mapping.json"));

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded, atlas.image);
        assert!(validate_image(&reloaded).is_valid());

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(report["atlas"], "cube.png");

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_unwritable_report_leaves_no_atlas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.png");
        std::fs::create_dir(dir.path().join("cube_uv_mapping.json")).unwrap();
        let atlas = compose(&solid_faces(8), &AtlasConfig::default().with_cell_size(8)).unwrap();

        assert!(matches!(atlas.save_with_report(&path), Err(AtlasError::Io(_))));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
