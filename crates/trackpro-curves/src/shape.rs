//! Built-in curve shapes offered by the calibration UI.

use serde::{Deserialize, Serialize};

use crate::piecewise::PiecewiseCurve;
use crate::point::CurvePoint;

/// Input fractions the shape formulas are sampled at (0%, 25%, ... 100%).
const SAMPLE_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Sigmoid steepness for the S-Curve shape.
const S_CURVE_STEEPNESS: f64 = 10.0;

/// Sigmoid steepness for the Heel-Toe shape (gentler than S-Curve).
const HEEL_TOE_STEEPNESS: f64 = 6.0;

/// The closed set of built-in response-curve shapes.
///
/// Each shape is a pure function `f: [0,1] → [0,1]` with `f(0) = 0` and
/// `f(1) = 1`, sampled at five evenly spaced inputs to produce the control
/// points the user then sees (and may drag, at which point the curve
/// becomes [`Custom`](Self::Custom)).
///
/// Shapes are deterministic and stateless; picking the same shape twice
/// produces identical points.
///
/// # Example
///
/// ```
/// use trackpro_curves::CurveShape;
///
/// let curve = CurveShape::Progressive.to_curve();
/// // Progressive (x³) stays under the diagonal until the top
/// assert!(curve.evaluate(50.0) < 50.0);
/// assert!((curve.evaluate(100.0) - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveShape {
    /// Identity mapping, the default for every control.
    #[default]
    Linear,
    /// Progressive response: `f(x) = x³`. Soft at the top of the travel.
    Progressive,
    /// Logarithmic response: `f(x) = √x`. Strong initial bite.
    Logarithmic,
    /// Sigmoid S-curve, rescaled so the endpoints hit exactly 0 and 1.
    SCurve,
    /// Brake: early bite that eases off, `f(x) = 1 - (1-x)²`.
    TrailBrake,
    /// Brake: slow start building to a sharp threshold, `f(x) = x²`.
    Threshold,
    /// Throttle: very lazy start, `f(x) = x⁴`.
    TurboLag,
    /// Clutch: gentle sigmoid for rev-match blips.
    HeelToe,
    /// User-edited control points; no generator formula.
    Custom,
}

impl CurveShape {
    /// Every built-in shape, in menu order.
    pub const ALL: [CurveShape; 8] = [
        CurveShape::Linear,
        CurveShape::Progressive,
        CurveShape::Logarithmic,
        CurveShape::SCurve,
        CurveShape::TrailBrake,
        CurveShape::Threshold,
        CurveShape::TurboLag,
        CurveShape::HeelToe,
    ];

    /// Evaluates the shape formula at an input fraction in `[0,1]`.
    ///
    /// Input is clamped. `Custom` has no formula and evaluates as identity.
    pub fn apply(&self, x: f64) -> f64 {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        match self {
            CurveShape::Linear | CurveShape::Custom => x,
            CurveShape::Progressive => x * x * x,
            CurveShape::Logarithmic => x.sqrt(),
            CurveShape::SCurve => rescaled_sigmoid(x, S_CURVE_STEEPNESS),
            CurveShape::TrailBrake => 1.0 - (1.0 - x) * (1.0 - x),
            CurveShape::Threshold => x * x,
            CurveShape::TurboLag => x * x * x * x,
            CurveShape::HeelToe => rescaled_sigmoid(x, HEEL_TOE_STEEPNESS),
        }
    }

    /// Samples the shape into its fixed five-point control-point set
    /// (inputs at 0, 25, 50, 75 and 100 percent).
    pub fn control_points(&self) -> Vec<CurvePoint> {
        SAMPLE_FRACTIONS
            .iter()
            .map(|&x| CurvePoint::new(x * 100.0, self.apply(x) * 100.0))
            .collect()
    }

    /// Builds the piecewise-linear curve for this shape.
    pub fn to_curve(&self) -> PiecewiseCurve {
        // Five valid, distinct-input points: construction cannot fail.
        PiecewiseCurve::new(self.control_points())
            .unwrap_or_else(|_| PiecewiseCurve::linear_default())
    }

    /// The label this shape is persisted and displayed under.
    ///
    /// The default shape keeps the legacy "Linear (Default)" wording so
    /// existing preset files round-trip.
    pub fn label(&self) -> &'static str {
        match self {
            CurveShape::Linear => "Linear (Default)",
            CurveShape::Progressive => "Progressive",
            CurveShape::Logarithmic => "Logarithmic",
            CurveShape::SCurve => "S-Curve",
            CurveShape::TrailBrake => "Trail Brake",
            CurveShape::Threshold => "Threshold",
            CurveShape::TurboLag => "Turbo Lag",
            CurveShape::HeelToe => "Heel-Toe",
            CurveShape::Custom => "Custom",
        }
    }

    /// Resolves a persisted label back to a shape.
    ///
    /// Unknown labels (including shapes from newer versions) come back as
    /// [`Custom`](Self::Custom): the stored points still load, only the
    /// generator association is lost.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Linear (Default)" | "Linear" => CurveShape::Linear,
            "Progressive" => CurveShape::Progressive,
            "Logarithmic" => CurveShape::Logarithmic,
            "S-Curve" => CurveShape::SCurve,
            "Trail Brake" => CurveShape::TrailBrake,
            "Threshold" => CurveShape::Threshold,
            "Turbo Lag" => CurveShape::TurboLag,
            "Heel-Toe" => CurveShape::HeelToe,
            _ => CurveShape::Custom,
        }
    }
}

/// Logistic sigmoid centered at 0.5, rescaled so `f(0) = 0` and `f(1) = 1`.
fn rescaled_sigmoid(x: f64, steepness: f64) -> f64 {
    let sigmoid = |v: f64| 1.0 / (1.0 + (-steepness * (v - 0.5)).exp());
    let low = sigmoid(0.0);
    let high = sigmoid(1.0);
    ((sigmoid(x) - low) / (high - low)).clamp(0.0, 1.0)
}
