use std::fmt;

use serde::{Deserialize, Serialize};

/// Shape the pipeline is tracking.
///
/// Each variant carries the real-world area of its reference object and the
/// vertex counts its polygon approximation is allowed to take. The set is
/// closed and selectable at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetShape {
    #[default]
    Quadrilateral,
    Triangle,
    Circle,
}

impl TargetShape {
    /// Real-world area of the reference object, in cm².
    pub fn reference_area_cm2(self) -> f64 {
        match self {
            TargetShape::Quadrilateral => 196.0,
            TargetShape::Triangle => 119.0,
            TargetShape::Circle => 154.0,
        }
    }

    /// Vertex-count predicate for a polygon approximation of the contour.
    ///
    /// A rasterized circle never simplifies to one exact count, hence the
    /// accepted band.
    pub fn accepts_vertices(self, vertices: usize) -> bool {
        match self {
            TargetShape::Quadrilateral => vertices == 4,
            TargetShape::Triangle => vertices == 3,
            TargetShape::Circle => (7..=20).contains(&vertices),
        }
    }
}

impl fmt::Display for TargetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetShape::Quadrilateral => "quadrilateral",
            TargetShape::Triangle => "triangle",
            TargetShape::Circle => "circle",
        };
        f.write_str(name)
    }
}
