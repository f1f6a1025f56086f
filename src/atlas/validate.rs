//! Post-hoc checks on atlas images.

use super::layout::{GRID_COLS, GRID_ROWS};
use crate::error::{AtlasError, Result};
use image::{ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tracing::warn;

/// Maximum relative deviation from a 4:3 aspect ratio.
pub const ASPECT_TOLERANCE: f64 = 0.01;

/// Why an atlas failed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AtlasIssue {
    ZeroDimension,
    AspectRatio { actual: f64, expected: f64 },
}

impl std::fmt::Display for AtlasIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasIssue::ZeroDimension => write!(f, "image has a zero dimension"),
            AtlasIssue::AspectRatio { actual, expected } => {
                write!(f, "aspect ratio {:.2}, expected {:.2}", actual, expected)
            }
        }
    }
}

/// Outcome of validating an atlas that could be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasValidation {
    pub width: u32,
    pub height: u32,
    pub issue: Option<AtlasIssue>,
}

impl AtlasValidation {
    pub fn is_valid(&self) -> bool {
        self.issue.is_none()
    }

    /// Width over height, if the height is nonzero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0).then(|| self.width as f64 / self.height as f64)
    }

    /// Cell size implied by the dimensions, when they divide evenly into the grid.
    pub fn cell_size(&self) -> Option<u32> {
        let cell = self.width / GRID_COLS;
        (cell > 0 && self.width == cell * GRID_COLS && self.height == cell * GRID_ROWS)
            .then_some(cell)
    }
}

impl std::fmt::Display for AtlasValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.issue {
            None => write!(f, "valid {}x{} atlas", self.width, self.height),
            Some(issue) => write!(f, "invalid {}x{} atlas: {}", self.width, self.height, issue),
        }
    }
}

/// Check dimensions against the 4:3 cross layout.
pub fn validate_dimensions(width: u32, height: u32) -> AtlasValidation {
    let expected = GRID_COLS as f64 / GRID_ROWS as f64;

    let issue = if width == 0 || height == 0 {
        Some(AtlasIssue::ZeroDimension)
    } else {
        let actual = width as f64 / height as f64;
        ((actual - expected).abs() / expected > ASPECT_TOLERANCE)
            .then_some(AtlasIssue::AspectRatio { actual, expected })
    };

    AtlasValidation {
        width,
        height,
        issue,
    }
}

/// Validate an in-memory atlas.
pub fn validate_image(image: &RgbaImage) -> AtlasValidation {
    validate_dimensions(image.width(), image.height())
}

/// Validate an atlas file. Only the header is read.
///
/// Returns `Err` when the file cannot be read or decoded; a readable file of
/// the wrong shape is `Ok` with an issue.
pub fn validate_atlas_file<P: AsRef<Path>>(path: P) -> Result<AtlasValidation> {
    let path = path.as_ref();
    let (width, height) = image::image_dimensions(path).map_err(|source| AtlasError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let validation = validate_dimensions(width, height);
    if let Some(issue) = &validation.issue {
        warn!(path = %path.display(), %issue, "atlas failed validation");
    }
    Ok(validation)
}

/// Validate encoded atlas bytes.
pub fn validate_atlas_bytes(data: &[u8]) -> Result<AtlasValidation> {
    let (width, height) = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(validate_dimensions(width, height))
}
