//! Error types for atlas composition.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using AtlasError.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for atlas operations.
///
/// An atlas that loads fine but has the wrong shape is not an error; see
/// [`AtlasValidation`](crate::atlas::AtlasValidation).
#[derive(Error, Debug)]
pub enum AtlasError {
    /// A face source was missing or could not be decoded.
    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The gutter does not leave any room for face content.
    #[error("Invalid gutter: 2 * {gutter_size}px leaves no content in a {cell_size}px cell")]
    InvalidGutter { gutter_size: u32, cell_size: u32 },

    /// Cell size must be positive and small enough for a 4x3 atlas to fit in `u32` pixels.
    #[error("Invalid cell size: {0}")]
    InvalidCellSize(u32),

    /// The six cube faces were not supplied exactly once each.
    #[error("Incomplete face set (missing: [{}], unexpected: [{}])", .missing.join(", "), .unexpected.join(", "))]
    IncompleteFaceSet {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A prepared face does not match the atlas cell size.
    #[error("Face {face} is {width}x{height}, expected {cell_size}x{cell_size}")]
    FaceSize {
        face: String,
        width: u32,
        height: u32,
        cell_size: u32,
    },

    /// A text texture needs a positive size that fits in an atlas cell.
    #[error("Invalid texture size: {width}x{height}")]
    InvalidTextureSize { width: u32, height: u32 },

    /// Text label names become file names and must be a single path component.
    #[error("Invalid label name: {0:?}")]
    InvalidLabel(String),

    /// Die faces are numbered 1 through 6.
    #[error("Invalid die face: {0}")]
    InvalidDieFace(u8),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read or write JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to encode an output image.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// A font file could not be parsed.
    #[error("Font error: {0}")]
    Font(String),
}

impl AtlasError {
    /// Build an [`AtlasError::IncompleteFaceSet`] from displayable names.
    pub fn incomplete<M, U>(missing: M, unexpected: U) -> Self
    where
        M: IntoIterator,
        M::Item: ToString,
        U: IntoIterator,
        U::Item: ToString,
    {
        Self::IncompleteFaceSet {
            missing: missing.into_iter().map(|m| m.to_string()).collect(),
            unexpected: unexpected.into_iter().map(|u| u.to_string()).collect(),
        }
    }
}
