//! Shared types for the grainscan analysis core.

use serde::{Deserialize, Serialize};

/// A 2D lattice coordinate.
///
/// Boundary traces, chain-code replays, and component pixel lists all
/// live on the integer pixel grid, so coordinates are `i32` rather
/// than floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
}

/// An ordered, implicitly closed sequence of lattice vertices.
///
/// The last vertex connects back to the first. Vertices may repeat and
/// edges may self-intersect; no simplicity validation is performed.
/// Fewer than 3 vertices degenerate to zero area (see
/// [`metrics::polygon_area`](crate::metrics::polygon_area)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    /// Create a new polygon from a vector of vertices.
    #[must_use]
    pub const fn new(vertices: Vec<Point>) -> Self {
        Self(vertices)
    }

    /// Returns `true` if the polygon has no vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polygon and returns the underlying vertex vector.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point> {
        self.0
    }

    /// Returns a polygon with the vertex order reversed.
    ///
    /// Reversal flips the winding (clockwise vs counter-clockwise) but
    /// leaves area and perimeter unchanged.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut vertices = self.0.clone();
        vertices.reverse();
        Self(vertices)
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for per-file analysis.
///
/// All parameters have defaults matching the behavior of the original
/// batch drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Pixels with a value strictly greater than this threshold are
    /// foreground. The default of 1 treats the value range (1, 255]
    /// as object and everything else as background.
    pub foreground_threshold: u8,

    /// Keep components that touch the image border.
    ///
    /// Border-touching components are clipped by the image frame and
    /// bias the shape statistics, so they are dropped by default.
    pub keep_border_components: bool,
}

impl AnalysisConfig {
    /// Default foreground threshold.
    pub const DEFAULT_FOREGROUND_THRESHOLD: u8 = 1;
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            foreground_threshold: Self::DEFAULT_FOREGROUND_THRESHOLD,
            keep_border_components: false,
        }
    }
}

/// Errors that can occur while analyzing one input file.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_new() {
        let p = Point::new(3, -4);
        assert_eq!(p.x, 3);
        assert_eq!(p.y, -4);
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7, 11);
        assert!(p.distance(p).abs() < f64::EPSILON);
    }

    // --- Polygon tests ---

    #[test]
    fn polygon_new_and_len() {
        let poly = Polygon::new(vec![Point::new(0, 0), Point::new(1, 0)]);
        assert_eq!(poly.len(), 2);
        assert!(!poly.is_empty());
    }

    #[test]
    fn polygon_empty() {
        let poly = Polygon::new(vec![]);
        assert!(poly.is_empty());
        assert_eq!(poly.len(), 0);
        assert!(poly.vertices().is_empty());
    }

    #[test]
    fn polygon_into_vertices_returns_owned_vec() {
        let vertices = vec![Point::new(0, 0), Point::new(1, 1)];
        let poly = Polygon::new(vertices.clone());
        assert_eq!(poly.into_vertices(), vertices);
    }

    #[test]
    fn polygon_reversed_reverses_vertex_order() {
        let poly = Polygon::new(vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]);
        let rev = poly.reversed();
        assert_eq!(
            rev.vertices(),
            &[Point::new(1, 1), Point::new(1, 0), Point::new(0, 0)],
        );
    }

    // --- AnalysisConfig tests ---

    #[test]
    fn config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.foreground_threshold, 1);
        assert!(!config.keep_border_components);
    }

    // --- AnalysisError tests ---

    #[test]
    fn error_empty_input_display() {
        let err = AnalysisError::EmptyInput;
        assert_eq!(err.to_string(), "input image data is empty");
    }

    // --- Serde round-trip tests ---

    #[test]
    fn point_serde_round_trip() {
        let p = Point::new(-3, 17);
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }

    #[test]
    fn polygon_serde_round_trip() {
        let poly = Polygon::new(vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]);
        let json = serde_json::to_string(&poly).unwrap();
        let deserialized: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(poly, deserialized);
    }

    #[test]
    fn config_serde_round_trip() {
        let config = AnalysisConfig {
            foreground_threshold: 128,
            keep_border_components: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
