//! Transparent gutter inset around atlas faces.

use crate::error::{AtlasError, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Check that a gutter leaves a non-empty content square inside the cell.
pub fn validate_gutter(cell_size: u32, gutter_size: u32) -> Result<()> {
    if gutter_size == 0 {
        return Ok(());
    }
    if gutter_size.saturating_mul(2) >= cell_size {
        return Err(AtlasError::InvalidGutter {
            gutter_size,
            cell_size,
        });
    }
    Ok(())
}

/// Shrink a normalized square face and pad it with `gutter_size` transparent pixels per side.
///
/// The result has the same size as the input. A zero gutter returns an unchanged copy.
pub fn apply_gutter(face: &RgbaImage, gutter_size: u32, filter: FilterType) -> Result<RgbaImage> {
    let cell_size = face.width();
    validate_gutter(cell_size, gutter_size)?;

    if gutter_size == 0 {
        return Ok(face.clone());
    }

    let inner = cell_size - gutter_size * 2;
    let shrunk = imageops::resize(face, inner, inner, filter);

    let mut padded = RgbaImage::new(cell_size, cell_size);
    imageops::replace(&mut padded, &shrunk, gutter_size as i64, gutter_size as i64);
    Ok(padded)
}
