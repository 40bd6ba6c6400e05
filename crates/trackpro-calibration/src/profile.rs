//! Per-control calibration profiles and the composed mapping pipeline.

use serde::{Deserialize, Serialize};
use trackpro_curves::{CurvePoint, CurveShape, PiecewiseCurve};

use crate::deadzone::DeadzoneSettings;
use crate::range::CalibrationRange;
use crate::{CalibrationResult, MAX_AXIS_VALUE};

/// The calibratable controls TrackPro knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    /// Throttle pedal.
    Throttle,
    /// Brake pedal.
    Brake,
    /// Clutch pedal.
    Clutch,
    /// Analog handbrake axis.
    Handbrake,
}

impl Control {
    /// All controls, in UI order.
    pub const ALL: [Control; 4] = [
        Control::Throttle,
        Control::Brake,
        Control::Clutch,
        Control::Handbrake,
    ];

    /// The identifier this control is persisted under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Throttle => "throttle",
            Control::Brake => "brake",
            Control::Clutch => "clutch",
            Control::Handbrake => "handbrake",
        }
    }

    /// The curve shapes the UI offers for this control.
    ///
    /// Mirrors the original per-pedal curve menus: brakes get braking
    /// shapes, throttle gets throttle shapes, and so on. Every menu starts
    /// with Linear.
    pub fn recommended_shapes(&self) -> &'static [CurveShape] {
        match self {
            Control::Throttle => &[
                CurveShape::Linear,
                CurveShape::Progressive,
                CurveShape::TurboLag,
                CurveShape::SCurve,
            ],
            Control::Brake => &[
                CurveShape::Linear,
                CurveShape::Threshold,
                CurveShape::TrailBrake,
                CurveShape::Logarithmic,
            ],
            Control::Clutch => &[
                CurveShape::Linear,
                CurveShape::HeelToe,
                CurveShape::SCurve,
            ],
            Control::Handbrake => &[
                CurveShape::Linear,
                CurveShape::Progressive,
                CurveShape::Threshold,
            ],
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The intermediate values of one pass through the pipeline.
///
/// Produced by [`CalibrationProfile::preview`] for the live calibration
/// chart, which displays the raw reading, the normalized input position and
/// the final output percentage side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSample {
    /// The raw hardware reading.
    pub raw: u16,
    /// After range normalization, in `[0,100]`.
    pub input_percent: f64,
    /// After deadzone remapping, in `[0,100]`.
    pub deadzone_percent: f64,
    /// After the response curve, in `[0,100]`.
    pub output_percent: f64,
    /// The final scaled integer output.
    pub output: u16,
}

/// Complete calibration state for one control.
///
/// Aggregates the raw range, the deadzones and the response curve, and owns
/// the composed raw→output pipeline. A fresh profile is linear: full
/// 16-bit range, zero deadzones, the default 4-point identity curve.
///
/// # Examples
///
/// ```
/// use trackpro_calibration::{CalibrationProfile, Control};
///
/// let profile = CalibrationProfile::new(Control::Throttle);
/// assert_eq!(profile.map_raw_to_output(0), 0);
/// assert_eq!(profile.map_raw_to_output(u16::MAX), u16::MAX);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Which control this profile calibrates.
    pub control: Control,
    /// Raw range mapped onto 0–100% input.
    pub range: CalibrationRange,
    /// Deadzone margins.
    pub deadzone: DeadzoneSettings,
    /// The response curve.
    curve: PiecewiseCurve,
    /// The shape the curve was generated from; `Custom` once edited.
    shape: CurveShape,
    /// Full-scale output value (65535 for a 16-bit virtual axis).
    #[serde(default = "default_output_scale")]
    pub output_scale: u16,
}

fn default_output_scale() -> u16 {
    MAX_AXIS_VALUE
}

impl CalibrationProfile {
    /// Creates the default linear profile for a control.
    pub fn new(control: Control) -> Self {
        Self {
            control,
            range: CalibrationRange::default(),
            deadzone: DeadzoneSettings::default(),
            curve: PiecewiseCurve::linear_default(),
            shape: CurveShape::Linear,
            output_scale: MAX_AXIS_VALUE,
        }
    }

    /// Replaces the raw range.
    pub fn with_range(mut self, range: CalibrationRange) -> Self {
        self.range = range;
        self
    }

    /// Replaces the deadzone settings.
    pub fn with_deadzone(mut self, deadzone: DeadzoneSettings) -> Self {
        self.deadzone = deadzone;
        self
    }

    /// Installs a user-supplied curve, labelling the profile `Custom`.
    pub fn with_custom_curve(mut self, curve: PiecewiseCurve) -> Self {
        self.curve = curve;
        self.shape = CurveShape::Custom;
        self
    }

    /// Scales output to a different integer domain (default is 16-bit).
    pub fn with_output_scale(mut self, output_scale: u16) -> Self {
        self.output_scale = output_scale;
        self
    }

    /// The response curve.
    pub fn curve(&self) -> &PiecewiseCurve {
        &self.curve
    }

    /// The shape label attached to the curve.
    pub fn shape(&self) -> CurveShape {
        self.shape
    }

    /// Switches to a built-in curve shape, regenerating the control points.
    pub fn select_shape(&mut self, shape: CurveShape) {
        if shape != CurveShape::Custom {
            self.curve = shape.to_curve();
        }
        self.shape = shape;
    }

    /// Drags a control point; the profile becomes `Custom`.
    ///
    /// Returns the position the point settled at after the drag
    /// constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of bounds for the curve.
    pub fn drag_point(
        &mut self,
        index: usize,
        input: f64,
        output: f64,
    ) -> CalibrationResult<CurvePoint> {
        let moved = self.curve.move_point(index, input, output)?;
        self.shape = CurveShape::Custom;
        Ok(moved)
    }

    /// Attaches a shape label without regenerating the control points.
    ///
    /// Used when restoring persisted presets: the stored points are
    /// authoritative (the user may have dragged them after picking the
    /// shape), only the label association is restored.
    pub fn set_shape_label(&mut self, shape: CurveShape) {
        self.shape = shape;
    }

    /// Resets the curve to the default linear shape, keeping range and
    /// deadzones.
    pub fn reset_curve(&mut self) {
        self.curve = PiecewiseCurve::linear_default();
        self.shape = CurveShape::Linear;
    }

    /// Checks the profile is structurally sound.
    ///
    /// Call this once when a profile is loaded or edited; the mapping path
    /// itself never re-validates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CalibrationError::InvalidRange`] for an inverted or
    /// empty raw range. Curve structure is already guaranteed by
    /// `PiecewiseCurve`'s constructor.
    pub fn validate(&self) -> CalibrationResult<()> {
        CalibrationRange::new(self.range.min_raw, self.range.max_raw)?;
        Ok(())
    }

    /// Maps a raw hardware sample to the scaled output value.
    ///
    /// The full pipeline: range normalization, deadzone remap, response
    /// curve, scale to `[0, output_scale]` with rounding. Pure and
    /// infallible; out-of-range and degenerate configurations clamp.
    #[inline]
    pub fn map_raw_to_output(&self, raw: u16) -> u16 {
        let input_percent = self.range.to_input_percent(raw);
        let deadzone_percent = self.deadzone.apply(input_percent);
        let output_percent = self.curve.evaluate(deadzone_percent);
        self.scale_output(output_percent)
    }

    /// Runs the pipeline keeping every intermediate stage, for the live
    /// calibration chart.
    pub fn preview(&self, raw: u16) -> PreviewSample {
        let input_percent = self.range.to_input_percent(raw);
        let deadzone_percent = self.deadzone.apply(input_percent);
        let output_percent = self.curve.evaluate(deadzone_percent);
        PreviewSample {
            raw,
            input_percent,
            deadzone_percent,
            output_percent,
            output: self.scale_output(output_percent),
        }
    }

    #[inline]
    fn scale_output(&self, output_percent: f64) -> u16 {
        let full_scale = f64::from(self.output_scale);
        let scaled = (output_percent / 100.0 * full_scale)
            .round()
            .clamp(0.0, full_scale);
        scaled as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalibrationError;
    use approx::assert_relative_eq;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    fn scenario_profile() -> CalibrationProfile {
        // The worked example from the calibration chart documentation
        CalibrationProfile::new(Control::Throttle)
            .with_range(must(CalibrationRange::new(1000, 9000)))
            .with_deadzone(DeadzoneSettings::new(10.0, 5.0))
            .with_custom_curve(must(PiecewiseCurve::new(vec![
                CurvePoint::new(0.0, 0.0),
                CurvePoint::new(50.0, 80.0),
                CurvePoint::new(100.0, 100.0),
            ])))
    }

    #[test]
    fn test_default_profile_is_identity() {
        let profile = CalibrationProfile::new(Control::Brake);
        assert_eq!(profile.map_raw_to_output(0), 0);
        assert_eq!(profile.map_raw_to_output(MAX_AXIS_VALUE), MAX_AXIS_VALUE);

        // Mid-travel maps to mid-scale within rounding
        let mid = profile.map_raw_to_output(32768);
        assert!((i32::from(mid) - 32768).abs() <= 1);
    }

    #[test]
    fn test_two_point_curve_reduces_to_range_normalization() {
        let profile = CalibrationProfile::new(Control::Clutch)
            .with_range(must(CalibrationRange::new(1000, 9000)))
            .with_custom_curve(must(PiecewiseCurve::new(vec![
                CurvePoint::new(0.0, 0.0),
                CurvePoint::new(100.0, 100.0),
            ])));

        for raw in [0u16, 1000, 3000, 5000, 7000, 9000, 65535] {
            let expected = (profile.range.to_input_percent(raw) / 100.0 * 65535.0).round();
            let actual = f64::from(profile.map_raw_to_output(raw));
            assert!(
                (expected - actual).abs() < 0.5,
                "mismatch at raw {raw}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn test_scenario_endpoints() {
        let profile = scenario_profile();
        assert_eq!(profile.map_raw_to_output(1000), 0);
        assert_eq!(profile.map_raw_to_output(9000), 65535);
        assert_eq!(profile.map_raw_to_output(0), 0);
        assert_eq!(profile.map_raw_to_output(65535), 65535);
    }

    #[test]
    fn test_scenario_midpoint_exact() {
        // raw=5000 -> input 50% -> deadzone (50-10)/85*100 = 800/17 %
        // -> curve t = (800/17)/50, out = t*80 = 1280/17 %
        // -> output = round(1280/17/100 * 65535) = round(49344.0) = 49344
        let profile = scenario_profile();
        let sample = profile.preview(5000);

        assert_relative_eq!(sample.input_percent, 50.0);
        assert_relative_eq!(sample.deadzone_percent, 800.0 / 17.0, max_relative = 1e-12);
        assert_relative_eq!(sample.output_percent, 1280.0 / 17.0, max_relative = 1e-12);
        assert_eq!(sample.output, 49344);
        assert_eq!(profile.map_raw_to_output(5000), 49344);
    }

    #[test]
    fn test_preview_stages_consistent_with_output() {
        let profile = scenario_profile();
        for raw in (0..=65535u16).step_by(4099) {
            let sample = profile.preview(raw);
            assert_eq!(sample.raw, raw);
            assert_eq!(sample.output, profile.map_raw_to_output(raw));
            assert!((0.0..=100.0).contains(&sample.input_percent));
            assert!((0.0..=100.0).contains(&sample.deadzone_percent));
            assert!((0.0..=100.0).contains(&sample.output_percent));
        }
    }

    #[test]
    fn test_output_monotonic_in_raw() {
        let profile = scenario_profile();
        let mut last = profile.map_raw_to_output(0);
        for raw in (0..=65535u16).step_by(499) {
            let now = profile.map_raw_to_output(raw);
            assert!(now >= last, "output decreased at raw {raw}");
            last = now;
        }
    }

    #[test]
    fn test_custom_output_scale() {
        let profile = CalibrationProfile::new(Control::Handbrake).with_output_scale(1000);
        assert_eq!(profile.map_raw_to_output(0), 0);
        assert_eq!(profile.map_raw_to_output(MAX_AXIS_VALUE), 1000);
        let mid = profile.map_raw_to_output(32768);
        assert!((i32::from(mid) - 500).abs() <= 1);
    }

    #[test]
    fn test_select_shape_regenerates_points() {
        let mut profile = CalibrationProfile::new(Control::Brake);
        profile.select_shape(CurveShape::Threshold);

        assert_eq!(profile.shape(), CurveShape::Threshold);
        assert_eq!(profile.curve().points().len(), 5);
        // Threshold (x²) sits under the diagonal mid-travel
        assert!(profile.curve().evaluate(50.0) < 50.0);
    }

    #[test]
    fn test_select_custom_keeps_points() {
        let mut profile = CalibrationProfile::new(Control::Brake);
        profile.select_shape(CurveShape::TrailBrake);
        let points_before = profile.curve().points().to_vec();

        profile.select_shape(CurveShape::Custom);
        assert_eq!(profile.curve().points(), points_before.as_slice());
    }

    #[test]
    fn test_drag_point_marks_custom() {
        let mut profile = CalibrationProfile::new(Control::Throttle);
        assert_eq!(profile.shape(), CurveShape::Linear);

        must(profile.drag_point(1, 33.0, 60.0));
        assert_eq!(profile.shape(), CurveShape::Custom);
        assert!(profile.curve().evaluate(33.0) > 50.0);
    }

    #[test]
    fn test_drag_point_out_of_bounds() {
        let mut profile = CalibrationProfile::new(Control::Throttle);
        let result = profile.drag_point(10, 50.0, 50.0);
        assert!(matches!(result, Err(CalibrationError::InvalidCurve(_))));
    }

    #[test]
    fn test_reset_curve() {
        let mut profile = CalibrationProfile::new(Control::Clutch)
            .with_range(must(CalibrationRange::new(1000, 9000)));
        profile.select_shape(CurveShape::HeelToe);
        profile.reset_curve();

        assert_eq!(profile.shape(), CurveShape::Linear);
        assert_eq!(profile.curve().points().len(), 4);
        // Range survives a curve reset
        assert_eq!(profile.range.min_raw, 1000);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut profile = CalibrationProfile::new(Control::Throttle);
        profile.range = CalibrationRange {
            min_raw: 9000,
            max_raw: 1000,
        };
        assert_eq!(
            profile.validate(),
            Err(CalibrationError::InvalidRange { min: 9000, max: 1000 })
        );
    }

    #[test]
    fn test_validate_accepts_default() {
        let profile = CalibrationProfile::new(Control::Throttle);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_degenerate_range_maps_to_zero() {
        let mut profile = CalibrationProfile::new(Control::Throttle);
        profile.range = CalibrationRange {
            min_raw: 5000,
            max_raw: 5000,
        };
        // Hot path must not panic or divide by zero even when validation
        // was skipped
        assert_eq!(profile.map_raw_to_output(60000), 0);
    }

    #[test]
    fn test_control_identifiers() {
        assert_eq!(Control::Throttle.as_str(), "throttle");
        assert_eq!(Control::Handbrake.to_string(), "handbrake");
    }

    #[test]
    fn test_recommended_shapes_start_linear() {
        for control in Control::ALL {
            let shapes = control.recommended_shapes();
            assert_eq!(shapes.first(), Some(&CurveShape::Linear));
        }
    }

    #[test]
    fn test_profile_serde_round_trip_outputs_identical() {
        let profile = scenario_profile();
        let json = serde_json::to_string(&profile).expect("serialization failed");
        let back: CalibrationProfile = serde_json::from_str(&json).expect("deserialization failed");

        for raw in [0u16, 16384, 32768, 49152, 65535] {
            assert_eq!(profile.map_raw_to_output(raw), back.map_raw_to_output(raw));
        }
    }

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_output_never_exceeds_scale(raw in any::<u16>()) {
            let profile = scenario_profile();
            let output = profile.map_raw_to_output(raw);
            prop_assert!(output <= profile.output_scale);
        }

        #[test]
        fn prop_mapping_is_pure(raw in any::<u16>()) {
            let profile = scenario_profile();
            prop_assert_eq!(profile.map_raw_to_output(raw), profile.map_raw_to_output(raw));
        }
    }
}
