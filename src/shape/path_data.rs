use kurbo::PathEl;

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{GodcropError, GodcropResult};

/// Upper bound on accepted path-data length, in bytes.
pub const MAX_PATH_DATA_LEN: usize = 64 * 1024;

/// Largest accepted coordinate magnitude, in logical pixels.
pub const MAX_PATH_COORD: f64 = 1.0e6;

/// Parse SVG path data: move, line, quadratic and cubic curves, and close, in absolute or
/// relative form.
///
/// Arc commands (`A`/`a`) are rejected: kurbo flattens them into a segment count that grows
/// with the radius. Also rejects empty input, oversized input, parse failures, coordinates that
/// are non-finite or beyond [`MAX_PATH_COORD`], and paths with no drawing commands. Callers in
/// the shape builder turn every error into the full-frame fallback.
pub fn parse_path_data(d: &str) -> GodcropResult<BezPath> {
    let d = d.trim();
    if d.is_empty() {
        return Err(GodcropError::validation("path data is empty"));
    }
    if d.len() > MAX_PATH_DATA_LEN {
        return Err(GodcropError::validation(format!(
            "path data too long: {} bytes (max {MAX_PATH_DATA_LEN})",
            d.len()
        )));
    }

    if d.contains(['A', 'a']) {
        return Err(GodcropError::validation(
            "path data contains arc commands, which are not supported",
        ));
    }

    let path = BezPath::from_svg(d)
        .map_err(|e| GodcropError::validation(format!("invalid path data: {e}")))?;

    let in_range = |p: Point| {
        p.is_finite() && p.x.abs() <= MAX_PATH_COORD && p.y.abs() <= MAX_PATH_COORD
    };
    let mut has_move = false;
    for el in path.elements() {
        let ok = match *el {
            PathEl::MoveTo(p) => {
                has_move = true;
                in_range(p)
            }
            PathEl::LineTo(p) => in_range(p),
            PathEl::QuadTo(a, b) => in_range(a) && in_range(b),
            PathEl::CurveTo(a, b, c) => in_range(a) && in_range(b) && in_range(c),
            PathEl::ClosePath => true,
        };
        if !ok {
            return Err(GodcropError::validation(format!(
                "path data coordinates must be finite and within +/-{MAX_PATH_COORD}"
            )));
        }
    }
    if !has_move {
        return Err(GodcropError::validation("path data has no subpaths"));
    }
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/path_data.rs"]
mod tests;
