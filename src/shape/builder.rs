use std::f64::consts::{PI, TAU};

use kurbo::{Circle, Ellipse, RoundedRect};

use crate::foundation::core::{BezPath, FrameGeometry, Point};
use crate::shape::descriptor::ShapeDescriptor;
use crate::shape::organic::organic_path;
use crate::shape::path::ClosedPath;
use crate::shape::path_data::parse_path_data;

/// Largest vertex-generating parameter (polygon sides, star points, organic complexity) accepted.
///
/// Larger values are treated as invalid and fall back to the full-frame rectangle.
pub const MAX_SHAPE_DIVISIONS: u32 = 1024;

/// Pill radius as a fraction of the shorter frame side.
const PILL_RADIUS_FRACTION: f64 = 0.5;
/// Squircle radius as a fraction of the shorter frame side.
const SQUIRCLE_RADIUS_FRACTION: f64 = 0.28;
/// Heart size as a fraction of the shorter frame side.
const HEART_SIZE_FRACTION: f64 = 0.8;
/// Organic base radius is the shorter side divided by this.
const ORGANIC_RADIUS_DIVISOR: f64 = 2.1;
/// Ellipse placeholder radii as fractions of width and height.
const ELLIPSE_RADII_FRACTION: (f64, f64) = (0.38, 0.45);
/// Ellipse placeholder rotation in radians.
const ELLIPSE_ROTATION: f64 = 0.05;

/// Build the clip boundary for `shape` inside `frame`.
///
/// Total and deterministic. Invalid parameters yield the full-frame rectangle; a regular polygon
/// with fewer than three sides yields the empty path.
pub fn build_path(shape: &ShapeDescriptor, frame: FrameGeometry) -> ClosedPath {
    let center = frame.center();
    let size = frame.short_side();

    match shape {
        ShapeDescriptor::Rect => full_rect(frame),
        ShapeDescriptor::Circle => ClosedPath::from_shape(&Circle::new(center, size / 2.0)),
        ShapeDescriptor::Rounded { corner_radius } => {
            match effective_corner_radius(*corner_radius, frame) {
                Some(r) => rounded(frame, r),
                None => fallback(shape, "corner_radius must be finite and >= 0", frame),
            }
        }
        ShapeDescriptor::Pill => rounded(frame, size * PILL_RADIUS_FRACTION),
        ShapeDescriptor::Squircle => rounded(frame, size * SQUIRCLE_RADIUS_FRACTION),
        ShapeDescriptor::RegularPolygon { sides, start_angle } => {
            if *sides < 3 {
                tracing::debug!(sides, "degenerate polygon, emitting empty path");
                return ClosedPath::empty();
            }
            if *sides > MAX_SHAPE_DIVISIONS || !start_angle.is_finite() {
                return fallback(shape, "polygon parameters out of range", frame);
            }
            ClosedPath::from_bez(regular_polygon(center, size / 2.0, *sides, *start_angle))
        }
        ShapeDescriptor::Star {
            points,
            inner_radius_ratio,
        } => {
            let ratio_ok = *inner_radius_ratio > 0.0 && *inner_radius_ratio <= 1.0;
            if *points < 2 || *points > MAX_SHAPE_DIVISIONS || !ratio_ok {
                return fallback(shape, "star parameters out of range", frame);
            }
            let outer = size / 2.0;
            ClosedPath::from_bez(star(center, *points, outer, outer * inner_radius_ratio))
        }
        ShapeDescriptor::Heart => ClosedPath::from_bez(heart(center, size)),
        ShapeDescriptor::Organic { seed, complexity } => {
            if *complexity < 3 || *complexity > MAX_SHAPE_DIVISIONS || !seed.is_finite() {
                return fallback(shape, "organic parameters out of range", frame);
            }
            ClosedPath::from_bez(organic_path(
                center,
                size / ORGANIC_RADIUS_DIVISOR,
                *seed,
                *complexity,
            ))
        }
        ShapeDescriptor::CustomPath { path_data } => {
            let Some(d) = path_data.as_deref() else {
                return fallback(shape, "custom path data is absent", frame);
            };
            match parse_path_data(d) {
                Ok(bp) => ClosedPath::from_bez(bp),
                Err(e) => fallback(shape, &e.to_string(), frame),
            }
        }
        ShapeDescriptor::EllipseApprox => {
            let (fx, fy) = ELLIPSE_RADII_FRACTION;
            let e = Ellipse::new(
                center,
                (frame.width() * fx, frame.height() * fy),
                ELLIPSE_ROTATION,
            );
            ClosedPath::from_shape(&e)
        }
    }
}

/// Corner radius actually used for a `rounded` shape: `requested` clamped to half the shorter
/// side. `None` when `requested` is negative or not finite.
pub fn effective_corner_radius(requested: f64, frame: FrameGeometry) -> Option<f64> {
    if !requested.is_finite() || requested < 0.0 {
        return None;
    }
    Some(requested.min(frame.short_side() / 2.0))
}

fn full_rect(frame: FrameGeometry) -> ClosedPath {
    ClosedPath::from_shape(&frame.rect())
}

fn fallback(shape: &ShapeDescriptor, reason: &str, frame: FrameGeometry) -> ClosedPath {
    tracing::debug!(
        kind = shape.kind_name(),
        reason,
        "invalid shape, using full frame"
    );
    full_rect(frame)
}

fn rounded(frame: FrameGeometry, radius: f64) -> ClosedPath {
    ClosedPath::from_shape(&RoundedRect::from_rect(frame.rect(), radius))
}

fn regular_polygon(center: Point, radius: f64, sides: u32, start_angle: f64) -> BezPath {
    let step = TAU / f64::from(sides);
    let vertex = |k: u32| -> Point {
        let theta = start_angle + step * f64::from(k);
        Point::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
        )
    };

    let mut path = BezPath::new();
    path.move_to(vertex(0));
    for k in 1..sides {
        path.line_to(vertex(k));
    }
    path.close_path();
    path
}

fn star(center: Point, points: u32, outer: f64, inner: f64) -> BezPath {
    let angle = PI / f64::from(points);
    let vertex = |i: u32| -> Point {
        let r = if i % 2 == 0 { outer } else { inner };
        let theta = f64::from(i) * angle - PI / 2.0;
        Point::new(center.x + r * theta.cos(), center.y + r * theta.sin())
    };

    let mut path = BezPath::new();
    path.move_to(vertex(0));
    for i in 1..points * 2 {
        path.line_to(vertex(i));
    }
    path.close_path();
    path
}

fn heart(center: Point, size: f64) -> BezPath {
    let s = size * HEART_SIZE_FRACTION;
    let (x, y) = (center.x, center.y);

    let mut path = BezPath::new();
    path.move_to((x, y + s / 4.0));
    path.curve_to((x, y), (x - s / 2.0, y), (x - s / 2.0, y + s / 4.0));
    path.curve_to(
        (x - s / 2.0, y + s / 2.0),
        (x, y + s * 0.75),
        (x, y + s),
    );
    path.curve_to(
        (x, y + s * 0.75),
        (x + s / 2.0, y + s / 2.0),
        (x + s / 2.0, y + s / 4.0),
    );
    path.curve_to((x + s / 2.0, y), (x, y), (x, y + s / 4.0));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/shape/builder.rs"]
mod tests;
