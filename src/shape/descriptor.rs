use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// Declarative description of a clip shape.
///
/// Geometry is always derived from the frame at build time; descriptors carry only the
/// shape-specific parameters. JSON uses an internal `kind` tag:
///
/// ```json
/// { "kind": "star", "points": 5, "inner_radius_ratio": 0.5 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDescriptor {
    /// The full frame rectangle.
    #[default]
    Rect,
    /// Circle of diameter equal to the shorter frame side, centered.
    Circle,
    /// Full-frame rounded rectangle. The radius is clamped to half the shorter side.
    Rounded {
        /// Requested corner radius in logical pixels (`>= 0`).
        corner_radius: f64,
    },
    /// Rounded rectangle with radius equal to half the shorter side.
    Pill,
    /// Rounded rectangle with radius `0.28 *` the shorter side.
    Squircle,
    /// Regular n-gon inscribed in the centered circle of diameter equal to the shorter side.
    RegularPolygon {
        /// Number of sides. Fewer than 3 yields an empty path.
        sides: u32,
        /// Angle of the first vertex in radians (0 points right, y grows downward).
        #[serde(default)]
        start_angle: f64,
    },
    /// Star with `2 * points` vertices alternating outer and inner radius.
    Star {
        /// Number of outer points (`>= 2`).
        points: u32,
        /// Inner radius as a fraction of the outer radius, in `(0, 1]`.
        inner_radius_ratio: f64,
    },
    /// Fixed four-segment Bézier heart.
    Heart,
    /// Smooth closed loop through seeded, perturbed radii (blob / liquid).
    Organic {
        /// Seed for the perturbation hash.
        seed: f64,
        /// Number of control points (`>= 3`).
        complexity: u32,
    },
    /// User-provided SVG path data in frame coordinates.
    CustomPath {
        /// Path data; absent or unparsable data falls back to the full rectangle.
        #[serde(default)]
        path_data: Option<String>,
    },
    /// Static ellipse standing in for subject cutouts.
    ///
    /// This is an approximation, not a segmentation result.
    EllipseApprox,
}

impl ShapeDescriptor {
    /// Regular polygon with its first vertex pointing up.
    pub fn polygon(sides: u32) -> Self {
        Self::RegularPolygon {
            sides,
            start_angle: -FRAC_PI_2,
        }
    }

    /// Upward-pointing triangle.
    pub fn triangle() -> Self {
        Self::polygon(3)
    }

    /// Square rotated so its vertices sit on the axes.
    pub fn diamond() -> Self {
        Self::RegularPolygon {
            sides: 4,
            start_angle: 0.0,
        }
    }

    /// Upward-pointing pentagon.
    pub fn pentagon() -> Self {
        Self::polygon(5)
    }

    /// Hexagon with a vertex at the top.
    pub fn hexagon() -> Self {
        Self::polygon(6)
    }

    /// Octagon with a vertex at the top.
    pub fn octagon() -> Self {
        Self::polygon(8)
    }

    /// Scalloped badge: a 24-point star with a shallow inner radius.
    pub fn badge() -> Self {
        Self::Star {
            points: 24,
            inner_radius_ratio: 0.9,
        }
    }

    /// Stable lower-case name of the variant, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Rounded { .. } => "rounded",
            Self::Pill => "pill",
            Self::Squircle => "squircle",
            Self::RegularPolygon { .. } => "regular_polygon",
            Self::Star { .. } => "star",
            Self::Heart => "heart",
            Self::Organic { .. } => "organic",
            Self::CustomPath { .. } => "custom_path",
            Self::EllipseApprox => "ellipse_approx",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/descriptor.rs"]
mod tests;
