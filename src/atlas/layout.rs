//! The horizontal cross layout.
//!
//! ```text
//! row 2:  [    ] [ +Y ] [    ] [    ]
//! row 1:  [ -X ] [ +Z ] [ +X ] [ -Z ]
//! row 0:  [    ] [ -Y ] [    ] [    ]
//! ```
//!
//! Grid rows and UV `v` count upward from the bottom of the atlas. Pixel
//! coordinates count downward from the top, as stored in the image, so a
//! face in grid row `r` starts at pixel `y = (2 - r) * cell_size`.

use crate::error::{AtlasError, Result};
use crate::types::{CubeFace, GridPosition};
use serde::{Deserialize, Serialize};

/// Columns in the atlas grid.
pub const GRID_COLS: u32 = 4;
/// Rows in the atlas grid.
pub const GRID_ROWS: u32 = 3;
/// Index of the top grid row.
pub const MAX_ROW: u32 = GRID_ROWS - 1;
/// Largest cell size whose atlas width still fits in `u32` pixels.
pub const MAX_CELL_SIZE: u32 = u32::MAX / GRID_COLS;

/// Where a face sits in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacePlacement {
    pub face: CubeFace,
    pub grid: GridPosition,
}

/// Fixed face-to-cell table. Any reader of these atlases relies on this exact arrangement.
pub const CROSS_LAYOUT: [FacePlacement; 6] = [
    FacePlacement {
        face: CubeFace::NegativeX,
        grid: GridPosition::new(0, 1),
    },
    FacePlacement {
        face: CubeFace::PositiveZ,
        grid: GridPosition::new(1, 1),
    },
    FacePlacement {
        face: CubeFace::PositiveX,
        grid: GridPosition::new(2, 1),
    },
    FacePlacement {
        face: CubeFace::NegativeZ,
        grid: GridPosition::new(3, 1),
    },
    FacePlacement {
        face: CubeFace::PositiveY,
        grid: GridPosition::new(1, 2),
    },
    FacePlacement {
        face: CubeFace::NegativeY,
        grid: GridPosition::new(1, 0),
    },
];

/// Pixel bounds, half-open, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: [u32; 2],
    pub y: [u32; 2],
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x[1] - self.x[0]
    }

    pub fn height(&self) -> u32 {
        self.y[1] - self.y[0]
    }

    /// Check if a pixel lies inside this rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x[0] && x < self.x[1] && y >= self.y[0] && y < self.y[1]
    }
}

/// Normalized texture bounds, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub u: [f64; 2],
    pub v: [f64; 2],
}

impl FacePlacement {
    /// Top-left pixel of this face's cell.
    ///
    /// Exact for any cell size accepted by [`check_cell_size`]; larger sizes saturate.
    pub fn pixel_origin(&self, cell_size: u32) -> (u32, u32) {
        (
            self.grid.col.saturating_mul(cell_size),
            (MAX_ROW - self.grid.row).saturating_mul(cell_size),
        )
    }

    /// Pixel bounds of this face's cell.
    pub fn pixel_rect(&self, cell_size: u32) -> PixelRect {
        let (x, y) = self.pixel_origin(cell_size);
        PixelRect {
            x: [x, x.saturating_add(cell_size)],
            y: [y, y.saturating_add(cell_size)],
        }
    }

    /// UV bounds of this face's cell. Independent of resolution.
    pub fn uv_rect(&self) -> UvRect {
        let cols = GRID_COLS as f64;
        let rows = GRID_ROWS as f64;
        UvRect {
            u: [
                self.grid.col as f64 / cols,
                (self.grid.col + 1) as f64 / cols,
            ],
            v: [
                self.grid.row as f64 / rows,
                (self.grid.row + 1) as f64 / rows,
            ],
        }
    }
}

/// Look up the placement for a face.
pub fn placement(face: CubeFace) -> FacePlacement {
    let slot = match face {
        CubeFace::NegativeX => 0,
        CubeFace::PositiveZ => 1,
        CubeFace::PositiveX => 2,
        CubeFace::NegativeZ => 3,
        CubeFace::PositiveY => 4,
        CubeFace::NegativeY => 5,
    };
    CROSS_LAYOUT[slot]
}

/// Which face, if any, occupies a grid cell.
pub fn face_at(grid: GridPosition) -> Option<CubeFace> {
    CROSS_LAYOUT.iter().find(|p| p.grid == grid).map(|p| p.face)
}

/// Reject a zero cell size, or one whose atlas overflows `u32` pixel coordinates.
pub fn check_cell_size(cell_size: u32) -> Result<()> {
    if cell_size == 0 || cell_size > MAX_CELL_SIZE {
        return Err(AtlasError::InvalidCellSize(cell_size));
    }
    Ok(())
}

/// Atlas width and height for a cell size.
pub fn atlas_dimensions(cell_size: u32) -> Result<(u32, u32)> {
    check_cell_size(cell_size)?;
    Ok((cell_size * GRID_COLS, cell_size * GRID_ROWS))
}
