//! Descriptive statistics over batches of scalar measurements.

use serde::{Deserialize, Serialize};

use crate::metrics::ShapeRecord;

/// Descriptive statistics for one measurement series.
///
/// Recomputed fresh per file; never updated incrementally. An empty
/// series is benign: `count` is 0 and every other field is 0.0 by
/// convention, so batch reporting stays total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    /// Number of values in the series.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Middle element for odd counts, average of the two middle
    /// elements for even counts.
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation (summed squared deviations divided
    /// by `count`, not `count - 1`).
    pub stddev: f64,
}

impl BatchStatistics {
    /// Compute statistics over a series of values.
    ///
    /// Uses the classic two-pass formulation: one pass for the mean,
    /// one for the variance.
    ///
    /// # Examples
    ///
    /// ```
    /// use grainscan_analysis::stats::BatchStatistics;
    ///
    /// let stats = BatchStatistics::from_values(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(stats.count, 4);
    /// assert!((stats.mean - 2.5).abs() < 1e-12);
    /// assert!((stats.median - 2.5).abs() < 1e-12);
    /// assert!((stats.stddev - 1.25f64.sqrt()).abs() < 1e-12);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                median: 0.0,
                min: 0.0,
                max: 0.0,
                stddev: 0.0,
            };
        }

        let count = values.len();
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            f64::midpoint(sorted[count / 2 - 1], sorted[count / 2])
        };

        Self {
            count,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
            stddev: variance.sqrt(),
        }
    }
}

/// The four per-file statistics series, one per [`ShapeRecord`] field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStatistics {
    /// Statistics over `area_by_cell_count`.
    pub cell_count_area: BatchStatistics,
    /// Statistics over `area_by_polygon`.
    pub polygon_area: BatchStatistics,
    /// Statistics over `perimeter_by_cell_count`.
    pub cell_count_perimeter: BatchStatistics,
    /// Statistics over `perimeter_by_polygon`.
    pub polygon_perimeter: BatchStatistics,
}

impl ShapeStatistics {
    /// Compute all four series over the successfully measured shapes of
    /// one file.
    #[must_use]
    pub fn from_records(records: &[ShapeRecord]) -> Self {
        let series = |extract: fn(&ShapeRecord) -> f64| {
            let values: Vec<f64> = records.iter().map(extract).collect();
            BatchStatistics::from_values(&values)
        };

        Self {
            cell_count_area: series(|r| r.area_by_cell_count),
            polygon_area: series(|r| r.area_by_polygon),
            cell_count_perimeter: series(|r| r.perimeter_by_cell_count),
            polygon_perimeter: series(|r| r.perimeter_by_polygon),
        }
    }
}
