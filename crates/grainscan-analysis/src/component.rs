//! Connected-component extraction and boundary tracing.
//!
//! Both of the hard digital-geometry algorithms here are delegated to
//! `imageproc`: 4-connected labeling via
//! [`region_labelling::connected_components`](imageproc::region_labelling::connected_components)
//! and Suzuki-Abe border following via
//! [`contours::find_contours`](imageproc::contours::find_contours).
//! This module only regroups their output into per-component records.
//!
//! Note that Suzuki-Abe walks the border with 8-connectivity, so the
//! traces it returns may contain diagonal steps. The chain encoder
//! repairs those (see [`ChainCode::encode`](crate::chain::ChainCode::encode)),
//! but a trace whose endpoints sit diagonally from each other will
//! still fail closure and the component is skipped.

use std::collections::BTreeMap;

use image::{GrayImage, Luma};
use imageproc::contours::find_contours;
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::types::{Dimensions, Point};

/// One 4-connected foreground component of a binary image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Label assigned by the labeling pass (1-based; 0 is background).
    pub label: u32,
    /// All foreground cells of the component.
    pub cells: Vec<Point>,
    /// `true` if any cell lies on the image border. Such components
    /// are clipped by the frame and are dropped by default.
    pub touches_border: bool,
}

/// Extract all 4-connected foreground components from a binary image.
///
/// Foreground is any nonzero pixel. Components are returned in label
/// order, with their cells in row-major order.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn find_components(binary: &GrayImage) -> Vec<Component> {
    let labels = connected_components(binary, Connectivity::Four, Luma([0u8]));
    let (width, height) = binary.dimensions();

    let mut by_label: BTreeMap<u32, Component> = BTreeMap::new();
    for (x, y, pixel) in labels.enumerate_pixels() {
        let label = pixel.0[0];
        if label == 0 {
            continue;
        }
        let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
        let component = by_label.entry(label).or_insert_with(|| Component {
            label,
            cells: Vec::new(),
            touches_border: false,
        });
        component.cells.push(Point::new(x as i32, y as i32));
        component.touches_border |= on_border;
    }

    by_label.into_values().collect()
}

/// Trace the outer boundary of a single component.
///
/// Rasterizes the component onto a blank mask and runs border
/// following on it, keeping the longest top-level outer contour (hole
/// borders and nested contours are ignored). Returns the ordered
/// boundary cell sequence; empty only if the component has no cells.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn trace_boundary(dimensions: Dimensions, component: &Component) -> Vec<Point> {
    let mut mask = GrayImage::new(dimensions.width, dimensions.height);
    for cell in &component.cells {
        if cell.x >= 0 && cell.y >= 0 {
            let (x, y) = (cell.x as u32, cell.y as u32);
            if x < dimensions.width && y < dimensions.height {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    let contours = find_contours::<i32>(&mask);
    contours
        .into_iter()
        .filter(|c| c.parent.is_none())
        .max_by_key(|c| c.points.len())
        .map(|c| c.points.into_iter().map(|p| Point::new(p.x, p.y)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Paint a filled rectangle of foreground pixels.
    fn rect_image(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if x >= x0 && x < x1 && y >= y0 && y < y1 {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }

    #[test]
    fn empty_image_has_no_components() {
        let img = GrayImage::new(8, 8);
        assert!(find_components(&img).is_empty());
    }

    #[test]
    fn single_rectangle_is_one_component() {
        let img = rect_image(10, 10, 2, 2, 6, 5);
        let components = find_components(&img);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].cells.len(), 4 * 3);
        assert!(!components[0].touches_border);
    }

    #[test]
    fn two_separate_rectangles_are_two_components() {
        let mut img = rect_image(12, 12, 1, 1, 4, 4);
        for y in 6..10 {
            for x in 6..10 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let components = find_components(&img);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn diagonally_adjacent_cells_are_separate_components() {
        // 4-connectivity: a diagonal touch does not merge components.
        let mut img = GrayImage::new(4, 4);
        img.put_pixel(1, 1, Luma([255]));
        img.put_pixel(2, 2, Luma([255]));
        let components = find_components(&img);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn border_touching_component_is_flagged() {
        let img = rect_image(8, 8, 0, 3, 3, 5);
        let components = find_components(&img);
        assert_eq!(components.len(), 1);
        assert!(components[0].touches_border);
    }

    #[test]
    fn interior_component_is_not_flagged() {
        let img = rect_image(8, 8, 2, 2, 5, 5);
        let components = find_components(&img);
        assert!(!components[0].touches_border);
    }

    #[test]
    fn boundary_of_rectangle_is_nonempty_and_on_the_hull() {
        let img = rect_image(10, 10, 2, 2, 7, 6);
        let components = find_components(&img);
        let boundary = trace_boundary(dims(10, 10), &components[0]);
        assert!(
            boundary.len() >= 4,
            "rectangle boundary should have at least 4 cells, got {}",
            boundary.len(),
        );
        // Every boundary cell must belong to the component.
        for p in &boundary {
            assert!(
                components[0].cells.contains(p),
                "boundary cell {p:?} is not a component cell",
            );
        }
    }

    #[test]
    fn boundary_of_single_cell_is_that_cell() {
        let mut img = GrayImage::new(5, 5);
        img.put_pixel(2, 2, Luma([255]));
        let components = find_components(&img);
        let boundary = trace_boundary(dims(5, 5), &components[0]);
        assert_eq!(boundary, vec![Point::new(2, 2)]);
    }
}
