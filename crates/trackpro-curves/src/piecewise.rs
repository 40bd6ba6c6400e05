//! Piecewise-linear curve evaluation and control-point editing.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::point::{CurvePoint, MIN_POINT_SEPARATION, clamp_percent};

/// An input-sorted piecewise-linear response curve.
///
/// The curve owns at least two [`CurvePoint`]s sorted by ascending input
/// percentage. Between neighboring points the output is linearly
/// interpolated; outside the endpoint inputs the output is held flat at the
/// nearest endpoint's output (no linear extrapolation).
///
/// Sorting is an internal invariant: points are sorted on construction and
/// stay sorted through every edit, so [`evaluate`](Self::evaluate) never has
/// to trust caller order and never allocates.
///
/// # Examples
///
/// ```
/// use trackpro_curves::{CurvePoint, PiecewiseCurve};
///
/// let mut curve = PiecewiseCurve::linear_default();
/// assert!((curve.evaluate(50.0) - 50.0).abs() < 1e-9);
///
/// // Drag the second point up and the curve responds
/// curve.move_point(1, 33.0, 60.0)?;
/// assert!(curve.evaluate(33.0) > 50.0);
/// # Ok::<(), trackpro_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurvePoint>", into = "Vec<CurvePoint>")]
pub struct PiecewiseCurve {
    points: Vec<CurvePoint>,
}

impl PiecewiseCurve {
    /// Builds a curve from the given control points.
    ///
    /// The points are sorted by input percentage; supplied order does not
    /// matter.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::TooFewPoints`] for fewer than two points and
    /// [`CurveError::PointOutOfRange`] if any coordinate is non-finite or
    /// outside `[0,100]`.
    pub fn new(points: Vec<CurvePoint>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints {
                count: points.len(),
            });
        }

        for (index, point) in points.iter().enumerate() {
            if !crate::point::is_valid_percent(point.input) {
                return Err(CurveError::PointOutOfRange {
                    index,
                    coordinate: "input",
                    value: point.input,
                });
            }
            if !crate::point::is_valid_percent(point.output) {
                return Err(CurveError::PointOutOfRange {
                    index,
                    coordinate: "output",
                    value: point.output,
                });
            }
        }

        let mut curve = Self { points };
        curve.sort_points();
        Ok(curve)
    }

    /// The default linear curve: four evenly spaced identity points.
    ///
    /// This is the curve every control starts with and the target of
    /// reset-to-linear.
    pub fn linear_default() -> Self {
        Self {
            points: vec![
                CurvePoint::new(0.0, 0.0),
                CurvePoint::new(33.0, 33.0),
                CurvePoint::new(67.0, 67.0),
                CurvePoint::new(100.0, 100.0),
            ],
        }
    }

    /// The control points in ascending input order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Evaluates the curve at the given input percentage.
    ///
    /// Input is clamped to `[0,100]` (NaN clamps to 0). Inputs at or below
    /// the first point return the first point's output; at or above the
    /// last point, the last point's output. A zero-width segment returns
    /// its left point's output rather than dividing by zero.
    #[inline]
    pub fn evaluate(&self, input_percent: f64) -> f64 {
        let input = clamp_percent(input_percent);

        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            // Unreachable through the public API (len >= 2 invariant).
            return input;
        };

        if input <= first.input {
            return first.output;
        }
        if input >= last.input {
            return last.output;
        }

        for pair in self.points.windows(2) {
            let [left, right] = pair else { continue };
            if input <= right.input {
                if right.input <= left.input {
                    return left.output;
                }
                let t = (input - left.input) / (right.input - left.input);
                return left.output + t * (right.output - left.output);
            }
        }

        last.output
    }

    /// Moves the point at `index` to a new position, applying the drag
    /// constraints.
    ///
    /// The new input is clamped strictly between the neighboring points'
    /// inputs, keeping at least [`MIN_POINT_SEPARATION`] away from each, so
    /// a drag can never make two points share an input coordinate. When the
    /// neighbors sit too close to leave any legal input, the horizontal
    /// move is refused and only the output changes. The new output is
    /// clamped to `[0,100]`. Endpoints are free to move horizontally
    /// within `[0,100]`; pinning them at 0 and 100 is the chart widget's
    /// policy, not enforced here.
    ///
    /// Returns the position the point actually ended up at.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::IndexOutOfBounds`] if `index` is past the end
    /// of the curve.
    pub fn move_point(
        &mut self,
        index: usize,
        new_input: f64,
        new_output: f64,
    ) -> Result<CurvePoint, CurveError> {
        let len = self.points.len();
        if index >= len {
            return Err(CurveError::IndexOutOfBounds { index, len });
        }

        let lower = match index.checked_sub(1).and_then(|i| self.points.get(i)) {
            Some(prev) => prev.input + MIN_POINT_SEPARATION,
            None => 0.0,
        };
        let upper = match self.points.get(index + 1) {
            Some(next) => next.input - MIN_POINT_SEPARATION,
            None => 100.0,
        };

        // Neighbors closer than twice the separation leave no legal band;
        // keep the point's current input so the edit cannot introduce a
        // shared or out-of-range coordinate.
        let input = if lower <= upper {
            clamp_percent(new_input).clamp(lower, upper)
        } else {
            self.points.get(index).map_or(0.0, |p| p.input)
        };
        let moved = CurvePoint::new(input, clamp_percent(new_output));

        if let Some(slot) = self.points.get_mut(index) {
            *slot = moved;
        }
        self.sort_points();
        Ok(moved)
    }

    fn sort_points(&mut self) {
        self.points
            .sort_by(|a, b| a.input.partial_cmp(&b.input).unwrap_or(Ordering::Equal));
    }
}

impl Default for PiecewiseCurve {
    fn default() -> Self {
        Self::linear_default()
    }
}

impl TryFrom<Vec<CurvePoint>> for PiecewiseCurve {
    type Error = CurveError;

    fn try_from(points: Vec<CurvePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PiecewiseCurve> for Vec<CurvePoint> {
    fn from(curve: PiecewiseCurve) -> Self {
        curve.points
    }
}
