//! Error types for curve operations.

use thiserror::Error;

/// Error type for curve construction and editing.
///
/// Evaluation itself never fails; all structural problems are rejected when
/// a curve is built or edited so the per-sample path stays infallible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A curve needs at least two control points to define a segment.
    #[error("curve needs at least 2 control points, got {count}")]
    TooFewPoints {
        /// Number of points that were supplied.
        count: usize,
    },

    /// A control point coordinate is non-finite or outside `[0,100]`.
    #[error("control point {index} {coordinate} coordinate {value} is outside [0,100]")]
    PointOutOfRange {
        /// Index of the offending point in the supplied order.
        index: usize,
        /// Which coordinate is out of range (`"input"` or `"output"`).
        coordinate: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// A point edit referenced an index past the end of the curve.
    #[error("point index {index} out of bounds for curve with {len} points")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of points in the curve.
        len: usize,
    },
}
