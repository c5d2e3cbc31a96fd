//! Per-shape area and perimeter metrics.
//!
//! Two definitions of each measure are computed side by side:
//!
//! - **cell-count**: area as the number of foreground lattice cells,
//!   perimeter as the number of boundary cells. Unit: cells.
//! - **polygon**: area via the shoelace formula and perimeter as the
//!   summed Euclidean edge lengths of the replayed boundary polygon.
//!
//! The two disagree in general (a tiling measure vs a boundary-curve
//! measure); the discrepancy is itself a useful diagnostic, so both
//! are carried in every [`ShapeRecord`].

use serde::{Deserialize, Serialize};

use crate::types::{Point, Polygon};

/// Area of a polygon by the shoelace formula.
///
/// Sums the cross terms over consecutive vertex pairs, including the
/// wraparound edge from the last vertex back to the first, and returns
/// half the absolute value. Winding order does not affect the result.
/// Self-intersecting polygons produce a deterministic but
/// mathematically ill-defined value; no simplicity check is made.
///
/// Returns 0.0 for polygons with fewer than 3 vertices.
///
/// # Examples
///
/// ```
/// use grainscan_analysis::metrics::polygon_area;
/// use grainscan_analysis::types::{Point, Polygon};
///
/// let square = Polygon::new(vec![
///     Point::new(0, 0),
///     Point::new(1, 0),
///     Point::new(1, 1),
///     Point::new(0, 1),
/// ]);
/// assert!((polygon_area(&square) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn polygon_area(polygon: &Polygon) -> f64 {
    let vertices = polygon.vertices();
    if vertices.len() < 3 {
        return 0.0;
    }

    // i64 accumulation: the cross terms are exact in integer arithmetic
    // and cannot overflow for image-sized coordinates.
    let mut doubled: i64 = 0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        doubled += i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y);
    }

    #[allow(clippy::cast_precision_loss)]
    let magnitude = doubled.unsigned_abs() as f64;
    magnitude / 2.0
}

/// Perimeter of a polygon as the sum of Euclidean edge lengths,
/// including the wraparound edge from the last vertex to the first.
///
/// Returns 0.0 for polygons with fewer than 2 vertices.
#[must_use]
pub fn polygon_perimeter(polygon: &Polygon) -> f64 {
    let vertices = polygon.vertices();
    if vertices.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        total += a.distance(b);
    }
    total
}

/// Area as the cardinality of the component's cell set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cell_count_area(cells: &[Point]) -> f64 {
    cells.len() as f64
}

/// Perimeter as the length of the boundary trace, in boundary cells.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cell_count_perimeter(boundary: &[Point]) -> f64 {
    boundary.len() as f64
}

/// The four per-shape measurements for one connected component.
///
/// Created once per component after its boundary has been traced and
/// its chain code closed; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Number of foreground cells in the component.
    pub area_by_cell_count: f64,
    /// Shoelace area of the replayed boundary polygon.
    pub area_by_polygon: f64,
    /// Number of cells in the boundary trace.
    pub perimeter_by_cell_count: f64,
    /// Euclidean length of the replayed boundary polygon.
    pub perimeter_by_polygon: f64,
}

impl ShapeRecord {
    /// Measure one component from its cell set, boundary trace, and
    /// replayed boundary polygon.
    #[must_use]
    pub fn measure(cells: &[Point], boundary: &[Point], polygon: &Polygon) -> Self {
        Self {
            area_by_cell_count: cell_count_area(cells),
            area_by_polygon: polygon_area(polygon),
            perimeter_by_cell_count: cell_count_perimeter(boundary),
            perimeter_by_polygon: polygon_perimeter(polygon),
        }
    }
}
