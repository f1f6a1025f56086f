//! Cube face identifiers.

use serde::{Deserialize, Serialize};

/// One face of a cube, named by its outward normal in a right-handed system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// All six faces in order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Position of this face in [`CubeFace::ALL`].
    pub fn index(self) -> usize {
        match self {
            CubeFace::PositiveX => 0,
            CubeFace::NegativeX => 1,
            CubeFace::PositiveY => 2,
            CubeFace::NegativeY => 3,
            CubeFace::PositiveZ => 4,
            CubeFace::NegativeZ => 5,
        }
    }

    /// Get the outward normal for this face.
    pub fn normal(self) -> [f32; 3] {
        match self {
            CubeFace::PositiveX => [1.0, 0.0, 0.0],
            CubeFace::NegativeX => [-1.0, 0.0, 0.0],
            CubeFace::PositiveY => [0.0, 1.0, 0.0],
            CubeFace::NegativeY => [0.0, -1.0, 0.0],
            CubeFace::PositiveZ => [0.0, 0.0, 1.0],
            CubeFace::NegativeZ => [0.0, 0.0, -1.0],
        }
    }

    /// Get the face on the other side of the cube.
    pub fn opposite(self) -> CubeFace {
        match self {
            CubeFace::PositiveX => CubeFace::NegativeX,
            CubeFace::NegativeX => CubeFace::PositiveX,
            CubeFace::PositiveY => CubeFace::NegativeY,
            CubeFace::NegativeY => CubeFace::PositiveY,
            CubeFace::PositiveZ => CubeFace::NegativeZ,
            CubeFace::NegativeZ => CubeFace::PositiveZ,
        }
    }

    /// Short label used in console output, e.g. `+X`.
    pub fn label(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "+X",
            CubeFace::NegativeX => "-X",
            CubeFace::PositiveY => "+Y",
            CubeFace::NegativeY => "-Y",
            CubeFace::PositiveZ => "+Z",
            CubeFace::NegativeZ => "-Z",
        }
    }

    /// File stem used for named face inputs, e.g. `positive_x`.
    pub fn file_stem(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "positive_x",
            CubeFace::NegativeX => "negative_x",
            CubeFace::PositiveY => "positive_y",
            CubeFace::NegativeY => "negative_y",
            CubeFace::PositiveZ => "positive_z",
            CubeFace::NegativeZ => "negative_z",
        }
    }

    /// Parse from string. Accepts `positiveX`, `positive_x` and `+X` forms (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        let normalized = match lower.as_str() {
            "+x" | "-x" | "+y" | "-y" | "+z" | "-z" => lower.clone(),
            other => other.replace(['_', '-'], ""),
        };
        match normalized.as_str() {
            "positivex" | "+x" => Some(CubeFace::PositiveX),
            "negativex" | "-x" => Some(CubeFace::NegativeX),
            "positivey" | "+y" => Some(CubeFace::PositiveY),
            "negativey" | "-y" => Some(CubeFace::NegativeY),
            "positivez" | "+z" => Some(CubeFace::PositiveZ),
            "negativez" | "-z" => Some(CubeFace::NegativeZ),
            _ => None,
        }
    }
}

impl std::fmt::Display for CubeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CubeFace::PositiveX => write!(f, "positiveX"),
            CubeFace::NegativeX => write!(f, "negativeX"),
            CubeFace::PositiveY => write!(f, "positiveY"),
            CubeFace::NegativeY => write!(f, "negativeY"),
            CubeFace::PositiveZ => write!(f, "positiveZ"),
            CubeFace::NegativeZ => write!(f, "negativeZ"),
        }
    }
}
