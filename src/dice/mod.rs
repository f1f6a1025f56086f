//! Six-sided dice.
//!
//! Dice are one use of the cross atlas: six numbered faces packed onto a
//! cube. The die-to-cube assignment lives here as its own table and is only
//! applied when a caller asks for it.

mod digits;
mod render;

pub use render::{render_dice_face, render_dice_faces, DiceFaceOptions, DiceStyle};

use crate::types::{CubeFace, FaceSet};

/// Die face number to cube face. Opposite faces sum to seven.
pub const DICE_FACE_MAPPING: [(u8, CubeFace); 6] = [
    (1, CubeFace::PositiveX),
    (2, CubeFace::PositiveY),
    (3, CubeFace::PositiveZ),
    (4, CubeFace::NegativeZ),
    (5, CubeFace::NegativeY),
    (6, CubeFace::NegativeX),
];

/// Cube face that shows die face `pips` (1..=6).
pub fn cube_face_for(pips: u8) -> Option<CubeFace> {
    DICE_FACE_MAPPING
        .iter()
        .find(|(n, _)| *n == pips)
        .map(|(_, face)| *face)
}

/// Die face number shown on a cube face.
pub fn pips_for(face: CubeFace) -> u8 {
    match face {
        CubeFace::PositiveX => 1,
        CubeFace::PositiveY => 2,
        CubeFace::PositiveZ => 3,
        CubeFace::NegativeZ => 4,
        CubeFace::NegativeY => 5,
        CubeFace::NegativeX => 6,
    }
}

/// Assign six die faces, given in order 1 through 6, to cube faces.
pub fn dice_face_set<T>(faces: [T; 6]) -> FaceSet<T> {
    let [one, two, three, four, five, six] = faces;
    // CubeFace::ALL order: +X -X +Y -Y +Z -Z
    FaceSet::new([one, six, two, five, three, four])
}
