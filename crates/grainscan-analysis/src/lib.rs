//! grainscan-analysis: Pure shape-analysis core (sans-IO).
//!
//! Converts a binary-segmented raster image into per-component shape
//! measurements through: decode + binarize -> 4-connected component
//! labeling -> border filtering -> boundary tracing -> Freeman chain
//! code synthesis and closure -> polygon replay -> area/perimeter
//! metrics -> per-file descriptive statistics.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Directory scanning and
//! report printing live in the `grainscan` CLI crate.

pub mod chain;
pub mod component;
pub mod metrics;
pub mod raster;
pub mod stats;
pub mod types;

use serde::{Deserialize, Serialize};

pub use chain::{ChainCode, ChainError, Direction};
pub use component::Component;
pub use metrics::ShapeRecord;
pub use stats::{BatchStatistics, ShapeStatistics};
pub use types::{AnalysisConfig, AnalysisError, Dimensions, Point, Polygon};

/// One successfully measured connected component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentShape {
    /// Label assigned by the labeling pass.
    pub label: u32,
    /// The closed Freeman chain code of the component boundary.
    pub chain: ChainCode,
    /// The boundary polygon replayed from the closed chain code.
    pub polygon: Polygon,
    /// The four shape measurements.
    pub record: ShapeRecord,
}

/// A component whose chain-code path failed, with the reason.
///
/// Skips are ordinary per-component outcomes, carried as values so the
/// caller can report them; they never abort the rest of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedComponent {
    /// Label assigned by the labeling pass.
    pub label: u32,
    /// Why the component could not be measured.
    pub reason: ChainError,
}

/// Result of analyzing one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,
    /// Component count before border filtering.
    pub initial_components: usize,
    /// Components dropped for touching the image border.
    pub border_components: usize,
    /// Successfully measured components.
    pub shapes: Vec<ComponentShape>,
    /// Components skipped with their failure reason.
    pub skipped: Vec<SkippedComponent>,
}

impl FileReport {
    /// Per-file statistics over the successfully measured shapes.
    ///
    /// Skipped components contribute nothing; an all-skipped or empty
    /// file yields all-zero statistics rather than an error.
    #[must_use]
    pub fn statistics(&self) -> ShapeStatistics {
        let records: Vec<ShapeRecord> = self.shapes.iter().map(|s| s.record).collect();
        ShapeStatistics::from_records(&records)
    }
}

/// Analyze one binary-segmented image.
///
/// Pure per-file computation: takes raw image bytes and a
/// configuration, returns a [`FileReport`]. Aggregation across files
/// is owned entirely by the caller.
///
/// # Pipeline steps
///
/// 1. Decode image and binarize by threshold
/// 2. 4-connected component labeling
/// 3. Drop components touching the image border (unless configured)
/// 4. Trace each component's outer boundary
/// 5. Encode the trace as a Freeman chain code and close it
/// 6. Replay the closed code into a boundary polygon
/// 7. Measure areas and perimeters
///
/// Per-component failures in steps 5-6 are recorded as
/// [`SkippedComponent`] entries and do not affect other components.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`AnalysisError::ImageDecode`] if the image cannot be
/// decoded.
pub fn analyze(image_bytes: &[u8], config: &AnalysisConfig) -> Result<FileReport, AnalysisError> {
    // 1. Decode and binarize.
    let binary = raster::decode_and_binarize(image_bytes, config.foreground_threshold)?;
    let dimensions = Dimensions {
        width: binary.width(),
        height: binary.height(),
    };

    // 2. Label 4-connected components.
    let components = component::find_components(&binary);
    let initial_components = components.len();

    // 3. Border filtering.
    let (kept, border_components) = if config.keep_border_components {
        (components, 0)
    } else {
        let total = components.len();
        let kept: Vec<Component> = components
            .into_iter()
            .filter(|c| !c.touches_border)
            .collect();
        let removed = total - kept.len();
        (kept, removed)
    };

    // 4-7. Trace, encode, close, replay, measure. Failures are
    // collected per component; processing always continues.
    let mut shapes = Vec::new();
    let mut skipped = Vec::new();
    for comp in &kept {
        let boundary = component::trace_boundary(dimensions, comp);
        match measure_component(comp, &boundary) {
            Ok(shape) => shapes.push(shape),
            Err(reason) => skipped.push(SkippedComponent {
                label: comp.label,
                reason,
            }),
        }
    }

    Ok(FileReport {
        dimensions,
        initial_components,
        border_components,
        shapes,
        skipped,
    })
}

/// Chain-code path for one component: encode, close, replay, measure.
fn measure_component(comp: &Component, boundary: &[Point]) -> Result<ComponentShape, ChainError> {
    let chain = ChainCode::encode(boundary)?.closed()?;
    let polygon = chain.replay();
    let record = ShapeRecord::measure(&comp.cells, boundary, &polygon);
    Ok(ComponentShape {
        label: comp.label,
        chain,
        polygon,
        record,
    })
}
