//! Factory preset sets seeded on first run.

use trackpro_calibration::{CalibrationProfile, Control};

use crate::types::CurvePreset;

/// Builds the factory presets for a control.
///
/// One preset per recommended shape, named after the shape, with the
/// default full range and zero deadzones. Users tune the range and
/// deadzones afterwards through the calibration wizard.
pub fn factory_presets(control: Control) -> Vec<CurvePreset> {
    control
        .recommended_shapes()
        .iter()
        .map(|&shape| {
            let mut profile = CalibrationProfile::new(control);
            profile.select_shape(shape);
            CurvePreset::from_profile(shape.label(), &profile)
        })
        .collect()
}
