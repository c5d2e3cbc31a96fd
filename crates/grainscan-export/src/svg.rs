//! SVG export serializer.
//!
//! Converts boundary polygons into an SVG string with closed `<path>`
//! elements using the [`svg`] crate for document construction, XML
//! escaping, and path data formatting.
//!
//! Each polygon becomes a separate `<path>` element using `M` (move
//! to), `L` (line to), and `z` (close path) commands.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements for
//! accessibility and to help file managers identify exported files.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Path, Title};
use svg::node::{Text, Value};

use grainscan_analysis::{Dimensions, Polygon};

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag. Text
/// values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title -- emitted as `<title>`.
    ///
    /// Typically the source image filename (without extension).
    pub title: Option<&'a str>,

    /// Document description -- emitted as `<desc>`.
    ///
    /// Typically the analysis parameters, so exported files are
    /// distinguishable.
    pub description: Option<&'a str>,
}

/// Build a closed SVG path `d` attribute string from a polygon.
///
/// Uses `M` for the first vertex, `L` for subsequent vertices, and a
/// final `z` to close the outline. Returns an empty string for
/// polygons with fewer than 2 vertices.
///
/// # Examples
///
/// ```
/// use grainscan_analysis::{Point, Polygon};
/// use grainscan_export::svg::build_path_data;
///
/// let polygon = Polygon::new(vec![
///     Point::new(2, 3),
///     Point::new(7, 3),
///     Point::new(7, 8),
/// ]);
/// assert_eq!(build_path_data(&polygon), "M2,3 L7,3 L7,8 z");
/// ```
#[must_use]
pub fn build_path_data(polygon: &Polygon) -> String {
    let vertices = polygon.vertices();
    if vertices.len() < 2 {
        return String::new();
    }

    let first = vertices[0];
    let mut data = Data::new().move_to((f64::from(first.x), f64::from(first.y)));
    for v in &vertices[1..] {
        data = data.line_to((f64::from(v.x), f64::from(v.y)));
    }
    data = data.close();
    String::from(Value::from(data))
}

/// Serialize boundary polygons into an SVG document string.
///
/// Each [`Polygon`] with 2 or more vertices becomes a closed `<path>`
/// element; smaller polygons are skipped (a single vertex cannot form
/// a visible outline). The `viewBox` is set from [`Dimensions`] so the
/// SVG coordinate space matches the source image pixel grid.
///
/// # Examples
///
/// ```
/// use grainscan_analysis::{Dimensions, Point, Polygon};
/// use grainscan_export::{SvgMetadata, to_svg};
///
/// let polygons = vec![Polygon::new(vec![
///     Point::new(2, 3),
///     Point::new(7, 3),
///     Point::new(7, 8),
/// ])];
/// let dims = Dimensions { width: 32, height: 32 };
/// let metadata = SvgMetadata {
///     title: Some("rice_japonais_seg_bin"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&polygons, dims, &metadata);
/// assert!(svg.contains("<title>rice_japonais_seg_bin</title>"));
/// assert!(svg.contains("M2,3 L7,3 L7,8 z"));
/// ```
#[must_use]
pub fn to_svg(polygons: &[Polygon], dimensions: Dimensions, metadata: &SvgMetadata<'_>) -> String {
    let mut doc = Document::new()
        .set("width", dimensions.width)
        .set("height", dimensions.height)
        .set("viewBox", (0, 0, dimensions.width, dimensions.height));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    for polygon in polygons {
        let d = build_path_data(polygon);
        if d.is_empty() {
            continue;
        }

        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1);
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
