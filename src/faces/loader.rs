//! Face loading and normalization.

use crate::atlas::gutter::apply_gutter;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::types::{CubeFace, FaceSet};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Stretch an image to exactly `cell_size` x `cell_size` RGBA.
///
/// Aspect ratio is not preserved. Images already at the target size are copied as-is.
pub fn normalize_face(image: &DynamicImage, cell_size: u32, filter: FilterType) -> RgbaImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    if (width, height) == (cell_size, cell_size) {
        return rgba;
    }
    if width != height {
        warn!(width, height, "face source is not square, stretching to fill");
    }

    imageops::resize(&rgba, cell_size, cell_size, filter)
}

/// Load a face from disk and normalize it to `cell_size`.
pub fn load_face<P: AsRef<Path>>(path: P, cell_size: u32, filter: FilterType) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| AtlasError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded face");
    Ok(normalize_face(&image, cell_size, filter))
}

/// Load a face from encoded bytes and normalize it to `cell_size`.
pub fn load_face_from_bytes(data: &[u8], cell_size: u32, filter: FilterType) -> Result<RgbaImage> {
    let image = image::load_from_memory(data).map_err(|source| AtlasError::ImageLoad {
        path: PathBuf::from("<memory>"),
        source,
    })?;
    Ok(normalize_face(&image, cell_size, filter))
}

/// Normalize a decoded face and apply the configured gutter.
pub fn prepare_face(image: &DynamicImage, config: &AtlasConfig) -> Result<RgbaImage> {
    let normalized = normalize_face(image, config.cell_size, config.filter.into());
    apply_gutter(&normalized, config.gutter.effective_size(), config.filter.into())
}

/// Load, normalize and inset all six faces in parallel.
///
/// The configuration is validated before any file is opened. The first
/// failing face aborts the whole set.
pub fn load_faces(paths: &FaceSet<PathBuf>, config: &AtlasConfig) -> Result<FaceSet<RgbaImage>> {
    config.validate()?;
    let filter: FilterType = config.filter.into();
    let gutter = config.gutter.effective_size();

    let sources: Vec<(CubeFace, &PathBuf)> = paths.iter().collect();
    let prepared = sources
        .into_par_iter()
        .map(|(face, path)| {
            let normalized = load_face(path, config.cell_size, filter)?;
            let inset = apply_gutter(&normalized, gutter, filter)?;
            debug!(face = %face, path = %path.display(), "prepared face");
            Ok((face, inset))
        })
        .collect::<Result<Vec<_>>>()?;

    FaceSet::from_entries(prepared)
}

/// Normalize and inset six already-decoded faces in parallel.
pub fn prepare_faces(images: &FaceSet<DynamicImage>, config: &AtlasConfig) -> Result<FaceSet<RgbaImage>> {
    config.validate()?;

    let sources: Vec<(CubeFace, &DynamicImage)> = images.iter().collect();
    let prepared = sources
        .into_par_iter()
        .map(|(face, image)| Ok((face, prepare_face(image, config)?)))
        .collect::<Result<Vec<_>>>()?;

    FaceSet::from_entries(prepared)
}
