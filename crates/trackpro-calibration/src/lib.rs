//! Axis calibration for TrackPro pedals and handbrake
//!
//! This crate turns raw hardware axis samples into the mapped values sent
//! to the virtual joystick output. The pipeline for every sample is:
//!
//! 1. normalize the raw reading to an input percentage using the
//!    calibrated min/max range ([`CalibrationRange`])
//! 2. remap through the configured deadzones ([`DeadzoneSettings`])
//! 3. shape through the control's response curve
//!    (`trackpro_curves::PiecewiseCurve`)
//! 4. scale to the output integer domain (16-bit by default)
//!
//! The composed pipeline lives on [`CalibrationProfile`] and is pure and
//! infallible: structural problems (inverted range, too few curve points)
//! are rejected when the profile is built or edited, never on the per-sample
//! path, which runs at hardware polling rate.
//!
//! For the split between the polling thread and the UI thread, see
//! [`SharedProfile`]: edits install a fresh snapshot, the polling loop reads
//! whichever snapshot is current.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod deadzone;
pub mod profile;
pub mod range;
pub mod shared;

pub use deadzone::DeadzoneSettings;
pub use profile::{CalibrationProfile, Control, PreviewSample};
pub use range::{CalibrationRange, RangeCapture};
pub use shared::SharedProfile;

use thiserror::Error;

/// Full-scale raw and output value (16-bit axis domain).
pub const MAX_AXIS_VALUE: u16 = u16::MAX;

/// Error type for calibration configuration.
///
/// These are structural errors surfaced at profile load or edit time. The
/// per-sample mapping path never produces them; numeric edge cases there
/// are handled by clamping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Minimum raw value must be strictly below the maximum.
    #[error("minimum value {min} must be less than maximum value {max}")]
    InvalidRange {
        /// Configured minimum raw value.
        min: u16,
        /// Configured maximum raw value.
        max: u16,
    },

    /// The response curve is structurally invalid.
    #[error("invalid response curve: {0}")]
    InvalidCurve(#[from] trackpro_curves::CurveError),
}

/// Result type for calibration operations.
pub type CalibrationResult<T> = Result<T, CalibrationError>;
