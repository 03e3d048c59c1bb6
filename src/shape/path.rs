use kurbo::{PathEl, Shape};

use crate::foundation::core::{BezPath, Point, Rect};

/// Flattening tolerance used when converting analytic shapes into Bézier paths.
pub(crate) const PATH_TOLERANCE: f64 = 0.1;

/// A clip boundary in frame-local logical coordinates.
///
/// An empty path is a valid value and means "nothing visible".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClosedPath {
    path: BezPath,
}

impl ClosedPath {
    /// The empty boundary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a Bézier path, closing its final subpath if needed.
    pub fn from_bez(mut path: BezPath) -> Self {
        if let Some(last) = path.elements().last()
            && !matches!(last, PathEl::ClosePath)
        {
            path.close_path();
        }
        Self { path }
    }

    /// Convert any `kurbo` shape into a closed path.
    pub fn from_shape(shape: &impl Shape) -> Self {
        Self::from_bez(shape.to_path(PATH_TOLERANCE))
    }

    /// Return `true` when the path has no drawing commands.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Borrow the underlying Bézier path.
    pub fn bez(&self) -> &BezPath {
        &self.path
    }

    /// Path elements in drawing order.
    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    /// On-curve points (move, line and curve end points) in drawing order.
    ///
    /// Control handles are not included.
    pub fn vertices(&self) -> Vec<Point> {
        self.path
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                PathEl::QuadTo(_, p) => Some(p),
                PathEl::CurveTo(_, _, p) => Some(p),
                PathEl::ClosePath => None,
            })
            .collect()
    }

    /// Tight bounding box, or `None` for the empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| self.path.bounding_box())
    }

    /// Serialize as SVG path data.
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }

    /// Return `true` when `p` lies inside the path (non-zero winding).
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty() && self.path.contains(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/path.rs"]
mod tests;
