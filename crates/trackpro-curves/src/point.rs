//! Control point definitions.

use serde::{Deserialize, Serialize};

/// Minimum horizontal separation between adjacent control points, in
/// input-percent units.
///
/// A dragged point may approach its neighbors no closer than this, which
/// keeps every segment's width strictly positive after an edit.
pub const MIN_POINT_SEPARATION: f64 = 0.1;

/// A single response-curve anchor.
///
/// Maps an input percentage to an output percentage, both in `[0,100]`.
/// Control points are placed by the user by dragging them on the
/// calibration chart; a curve is an input-ascending sequence of them.
///
/// # Examples
///
/// ```
/// use trackpro_curves::CurvePoint;
///
/// let point = CurvePoint::new(50.0, 80.0);
/// assert!((point.input - 50.0).abs() < f64::EPSILON);
/// assert!((point.output - 80.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Input percentage in `[0,100]`.
    pub input: f64,
    /// Output percentage in `[0,100]`.
    pub output: f64,
}

impl CurvePoint {
    /// Creates a control point from input/output percentages.
    pub fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }

    /// Creates a control point with both coordinates clamped to `[0,100]`.
    ///
    /// Non-finite coordinates clamp to 0.
    pub fn clamped(input: f64, output: f64) -> Self {
        Self {
            input: clamp_percent(input),
            output: clamp_percent(output),
        }
    }

    /// Whether both coordinates are finite and within `[0,100]`.
    pub fn is_valid(&self) -> bool {
        is_valid_percent(self.input) && is_valid_percent(self.output)
    }
}

impl From<(f64, f64)> for CurvePoint {
    fn from((input, output): (f64, f64)) -> Self {
        Self::new(input, output)
    }
}

impl From<CurvePoint> for (f64, f64) {
    fn from(point: CurvePoint) -> Self {
        (point.input, point.output)
    }
}

#[inline]
pub(crate) fn is_valid_percent(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

#[inline]
pub(crate) fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
