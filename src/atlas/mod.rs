//! Horizontal cross atlas composition.
//!
//! This module lays six cube faces out in a 4x3 grid, describes the
//! resulting UV mapping and validates finished atlases.

pub mod gutter;
pub mod layout;
mod builder;
mod report;
mod validate;

pub use builder::{compose, CrossAtlas, CrossAtlasBuilder};
pub use gutter::{apply_gutter, validate_gutter};
pub use layout::{FacePlacement, PixelRect, UvRect, CROSS_LAYOUT};
pub use report::{report_path_for, FaceMapping, UvReport};
pub use validate::{
    validate_atlas_bytes, validate_atlas_file, validate_dimensions, validate_image, AtlasIssue,
    AtlasValidation, ASPECT_TOLERANCE,
};

use crate::error::{AtlasError, Result};
use image::{ImageEncoder, RgbaImage};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Encode an RGBA image as PNG bytes.
pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);

    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| AtlasError::Encode(format!("Failed to encode PNG: {}", e)))?;

    Ok(bytes)
}

/// Write `data` to a uniquely named temporary sibling of `path`, then rename it into place.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    write_atomic_all(&[(path, data)])
}

/// Stage every file in its destination directory before renaming any of them.
///
/// Files are renamed in order, so put the one that should only appear last at the end.
/// A failed write or rename removes the remaining temporary files.
pub(crate) fn write_atomic_all(files: &[(&Path, &[u8])]) -> std::io::Result<()> {
    let mut staged = Vec::with_capacity(files.len());
    for (path, data) in files {
        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(data)?;
        tmp.flush()?;
        staged.push((tmp, *path));
    }

    for (tmp, path) in staged {
        tmp.persist(path)?;
    }
    Ok(())
}
