//! UV mapping sidecar reports.
//!
//! The report is derived from the layout table and cell size alone. Pixel
//! ranges use a top-left origin, matching the stored image; UV ranges use a
//! bottom-left origin, so `v = 1 - y / height`.

use super::layout::{atlas_dimensions, PixelRect, UvRect, CROSS_LAYOUT, GRID_COLS, GRID_ROWS};
use super::write_atomic;
use crate::config::Gutter;
use crate::error::Result;
use crate::types::{CubeFace, GridPosition};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Coordinate conventions used by the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub pixel: String,
    pub uv: String,
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            pixel: "top-left".to_string(),
            uv: "bottom-left".to_string(),
        }
    }
}

/// Location of one face in the atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceMapping {
    pub face: CubeFace,
    pub grid_position: GridPosition,
    pub uv_range: UvRect,
    pub pixel_range: PixelRect,
}

/// Machine-readable description of a cross atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvReport {
    /// Atlas file name.
    pub atlas: String,
    pub grid_size: GridSize,
    pub cell_size: Size,
    pub total_size: Size,
    pub origin: Origin,
    pub gutter: Gutter,
    pub face_mapping: Vec<FaceMapping>,
}

impl UvReport {
    /// Build the report for an atlas with the given cell size.
    pub fn new(atlas: impl Into<String>, cell_size: u32, gutter: Gutter) -> Result<Self> {
        let (width, height) = atlas_dimensions(cell_size)?;

        Ok(Self {
            atlas: atlas.into(),
            grid_size: GridSize {
                cols: GRID_COLS,
                rows: GRID_ROWS,
            },
            cell_size: Size {
                width: cell_size,
                height: cell_size,
            },
            total_size: Size { width, height },
            origin: Origin::default(),
            gutter,
            face_mapping: CROSS_LAYOUT
                .iter()
                .map(|p| FaceMapping {
                    face: p.face,
                    grid_position: p.grid,
                    uv_range: p.uv_rect(),
                    pixel_range: p.pixel_rect(cell_size),
                })
                .collect(),
        })
    }

    /// Get the mapping for a face.
    pub fn get(&self, face: CubeFace) -> Option<&FaceMapping> {
        self.face_mapping.iter().find(|m| m.face == face)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as JSON.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        write_atomic(path, self.to_json()?.as_bytes())?;
        info!(path = %path.display(), "wrote UV mapping report");
        Ok(())
    }
}

/// Sidecar path for an atlas: `foo.png` becomes `foo_uv_mapping.json`.
pub fn report_path_for<P: AsRef<Path>>(atlas_path: P) -> PathBuf {
    let atlas_path = atlas_path.as_ref();
    let stem = atlas_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "atlas".to_string());
    atlas_path.with_file_name(format!("{}_uv_mapping.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;

    #[test]
    fn test_report_shape() {
        let report = UvReport::new("dice.png", 128, Gutter::default()).unwrap();
        assert_eq!(report.grid_size, GridSize { cols: 4, rows: 3 });
        assert_eq!(report.total_size, Size { width: 512, height: 384 });
        assert_eq!(report.face_mapping.len(), 6);
        assert_eq!(report.face_mapping[0].face, CubeFace::NegativeX);

        let top = report.get(CubeFace::PositiveY).unwrap();
        assert_eq!(top.grid_position, GridPosition::new(1, 2));
        assert_eq!(top.pixel_range.x, [128, 256]);
        assert_eq!(top.pixel_range.y, [0, 128]);
        assert!((top.uv_range.v[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!((top.uv_range.v[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cell_size() {
        assert!(matches!(
            UvReport::new("x.png", 0, Gutter::default()),
            Err(AtlasError::InvalidCellSize(0))
        ));
    }

    #[test]
    fn test_oversized_cell_size() {
        assert!(matches!(
            UvReport::new("x.png", 1 << 30, Gutter::default()),
            Err(AtlasError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn test_json_field_names() {
        let report = UvReport::new("cube.png", 64, Gutter::new(2)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["atlas"], "cube.png");
        assert_eq!(value["gridSize"]["cols"], 4);
        assert_eq!(value["cellSize"]["width"], 64);
        assert_eq!(value["totalSize"]["height"], 192);
        assert_eq!(value["origin"]["uv"], "bottom-left");
        assert_eq!(value["gutter"]["size"], 2);

        let first = &value["faceMapping"][0];
        assert_eq!(first["face"], "negativeX");
        assert_eq!(first["gridPosition"]["col"], 0);
        assert_eq!(first["gridPosition"]["row"], 1);
        assert_eq!(first["uvRange"]["u"][1], 0.25);
        assert_eq!(first["pixelRange"]["y"][0], 64);
    }

    #[test]
    fn test_report_path_for() {
        assert_eq!(
            report_path_for("out/dice_horizontal_cross.png"),
            PathBuf::from("out/dice_horizontal_cross_uv_mapping.json")
        );
        assert_eq!(report_path_for("atlas"), PathBuf::from("atlas_uv_mapping.json"));
    }
}
