//! The persisted preset record.

use serde::{Deserialize, Serialize};
use trackpro_calibration::{
    CalibrationProfile, CalibrationRange, Control, DeadzoneSettings,
};
use trackpro_curves::{CurvePoint, CurveShape, PiecewiseCurve};

use crate::{CURRENT_SCHEMA_VERSION, PresetError, PresetResult};

/// A named calibration preset as stored on disk.
///
/// This is the flat, serialization-friendly mirror of a
/// [`CalibrationProfile`]: points as `[input, output]` pairs, the curve
/// shape as its display label, deadzones as plain percentages. Conversion
/// back into a profile re-runs all structural validation, so a hand-edited
/// or corrupted file surfaces a [`PresetError::InvalidPreset`] instead of a
/// misbehaving pedal.
///
/// # Examples
///
/// ```
/// use trackpro_calibration::{CalibrationProfile, Control};
/// use trackpro_presets::CurvePreset;
///
/// let profile = CalibrationProfile::new(Control::Brake);
/// let preset = CurvePreset::from_profile("My Brake", &profile);
/// let restored = preset.to_profile()?;
/// assert_eq!(restored.control, Control::Brake);
/// # Ok::<(), trackpro_presets::PresetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePreset {
    /// User-chosen preset name.
    pub name: String,
    /// Which control the preset applies to.
    pub control: Control,
    /// Curve points as `[input_percent, output_percent]` pairs.
    pub points: Vec<[f64; 2]>,
    /// Raw value mapped to 0%.
    pub min_raw: u16,
    /// Raw value mapped to 100%.
    pub max_raw: u16,
    /// Minimum-end deadzone in percent.
    pub min_deadzone_percent: f64,
    /// Maximum-end deadzone in percent.
    pub max_deadzone_percent: f64,
    /// Display label of the curve shape ("Linear (Default)", "Custom", ...).
    pub curve_type: String,
    /// Schema format version. Files predating the field deserialize as 0.
    #[serde(default)]
    pub schema_version: u32,
}

impl CurvePreset {
    /// Captures a profile as a named preset record.
    pub fn from_profile(name: impl Into<String>, profile: &CalibrationProfile) -> Self {
        Self {
            name: name.into(),
            control: profile.control,
            points: profile
                .curve()
                .points()
                .iter()
                .map(|p| [p.input, p.output])
                .collect(),
            min_raw: profile.range.min_raw,
            max_raw: profile.range.max_raw,
            min_deadzone_percent: profile.deadzone.min_percent(),
            max_deadzone_percent: profile.deadzone.max_percent(),
            curve_type: profile.shape().label().to_string(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Rebuilds the calibration profile this preset describes.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::UnsupportedVersion`] for files written by a
    /// newer release and [`PresetError::InvalidPreset`] when the stored
    /// range or point list fails structural validation.
    pub fn to_profile(&self) -> PresetResult<CalibrationProfile> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(PresetError::UnsupportedVersion(
                self.schema_version,
                CURRENT_SCHEMA_VERSION,
            ));
        }

        let invalid = |source| PresetError::InvalidPreset {
            name: self.name.clone(),
            source,
        };

        let range = CalibrationRange::new(self.min_raw, self.max_raw).map_err(&invalid)?;
        let curve = PiecewiseCurve::new(
            self.points
                .iter()
                .map(|&[input, output]| CurvePoint::new(input, output))
                .collect(),
        )
        .map_err(|e| invalid(e.into()))?;

        let mut profile = CalibrationProfile::new(self.control)
            .with_range(range)
            .with_deadzone(DeadzoneSettings::new(
                self.min_deadzone_percent,
                self.max_deadzone_percent,
            ))
            .with_custom_curve(curve);
        profile.set_shape_label(CurveShape::from_label(&self.curve_type));
        Ok(profile)
    }
}
