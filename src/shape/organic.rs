use std::f64::consts::TAU;

use crate::foundation::core::{BezPath, Point};

/// Smallest radius multiplier produced by [`radius_multiplier`].
const RADIUS_BASE: f64 = 0.85;

/// Width of the multiplier band above [`RADIUS_BASE`].
const RADIUS_SPAN: f64 = 0.3;

/// Handle length relative to the local radius.
const HANDLE_SCALE: f64 = 1.35;

/// Angular offset of each handle, as a fraction of the step between control points.
const HANDLE_ANGLE_FRACTION: f64 = 0.4;

/// Deterministic pseudo-random value in `[0, 1)` for control point `index` under `seed`.
///
/// `frac(sin(index * 12.9898 + seed * 78.233) * 43758.5453)`. The constants are load-bearing:
/// changing them changes every saved organic shape.
pub fn organic_hash(index: f64, seed: f64) -> f64 {
    let v = (index * 12.9898 + seed * 78.233).sin() * 43758.5453;
    v - v.floor()
}

/// Radius multiplier in `[0.85, 1.15]` for control point `index`.
pub fn radius_multiplier(index: u32, seed: f64) -> f64 {
    RADIUS_BASE + RADIUS_SPAN * organic_hash(f64::from(index), seed)
}

/// One cubic segment of an organic loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrganicSegment {
    /// Handle leaving the previous on-curve point.
    pub ctrl1: Point,
    /// Handle entering `to`.
    pub ctrl2: Point,
    /// On-curve end point.
    pub to: Point,
}

/// Start point and cubic segments of a closed organic loop around `center`.
///
/// `complexity` must be `>= 3`; callers validate it. Segment `i` joins control point `i` to
/// control point `i + 1`, so the final segment ends on the perturbed radius of point
/// `complexity` (the hash is evaluated at that index, not wrapped to 0).
pub fn organic_segments(
    center: Point,
    base_radius: f64,
    seed: f64,
    complexity: u32,
) -> (Point, Vec<OrganicSegment>) {
    let step = TAU / f64::from(complexity);
    let polar = |r: f64, angle: f64| -> Point {
        Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
    };

    let start = Point::new(center.x + base_radius, center.y);
    let segments = (0..complexity)
        .map(|i| {
            let angle = f64::from(i) * step;
            let next_angle = f64::from(i + 1) * step;
            let r = base_radius * radius_multiplier(i, seed);
            let next_r = base_radius * radius_multiplier(i + 1, seed);
            OrganicSegment {
                ctrl1: polar(r * HANDLE_SCALE, angle + step * HANDLE_ANGLE_FRACTION),
                ctrl2: polar(
                    next_r * HANDLE_SCALE,
                    next_angle - step * HANDLE_ANGLE_FRACTION,
                ),
                to: polar(next_r, next_angle),
            }
        })
        .collect();
    (start, segments)
}

/// Build the closed Bézier loop for an organic shape.
pub(crate) fn organic_path(center: Point, base_radius: f64, seed: f64, complexity: u32) -> BezPath {
    let (start, segments) = organic_segments(center, base_radius, seed, complexity);
    let mut path = BezPath::new();
    path.move_to(start);
    for s in segments {
        path.curve_to(s.ctrl1, s.ctrl2, s.to);
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/shape/organic.rs"]
mod tests;
