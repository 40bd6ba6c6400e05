//! Raw range normalization and calibration-wizard range capture.

use serde::{Deserialize, Serialize};

use crate::{CalibrationError, CalibrationResult, MAX_AXIS_VALUE};

/// The raw hardware values mapped to 0% and 100% input.
///
/// Readings at or below `min_raw` normalize to 0, at or above `max_raw`
/// to 100, with linear interpolation in between.
///
/// # Examples
///
/// ```
/// use trackpro_calibration::CalibrationRange;
///
/// let range = CalibrationRange::new(1000, 9000)?;
/// assert!((range.to_input_percent(5000) - 50.0).abs() < 1e-9);
/// assert!((range.to_input_percent(500) - 0.0).abs() < 1e-9);
/// # Ok::<(), trackpro_calibration::CalibrationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationRange {
    /// Raw value mapped to 0% (pedal fully released).
    pub min_raw: u16,
    /// Raw value mapped to 100% (pedal fully pressed).
    pub max_raw: u16,
}

impl CalibrationRange {
    /// Creates a range after checking `min_raw < max_raw`.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidRange`] when the minimum is not
    /// strictly below the maximum. This is the error the UI reports as
    /// "Minimum value must be less than maximum value".
    pub fn new(min_raw: u16, max_raw: u16) -> CalibrationResult<Self> {
        if min_raw >= max_raw {
            return Err(CalibrationError::InvalidRange {
                min: min_raw,
                max: max_raw,
            });
        }
        Ok(Self { min_raw, max_raw })
    }

    /// Normalizes a raw sample to an input percentage in `[0,100]`.
    ///
    /// A degenerate range (`max_raw <= min_raw`, possible only by mutating
    /// the public fields) returns 0 rather than dividing by zero.
    #[inline]
    pub fn to_input_percent(&self, raw: u16) -> f64 {
        if self.max_raw <= self.min_raw {
            return 0.0;
        }
        let span = f64::from(self.max_raw) - f64::from(self.min_raw);
        let offset = f64::from(raw) - f64::from(self.min_raw);
        (offset / span * 100.0).clamp(0.0, 100.0)
    }

    /// Whether the range is structurally valid.
    pub fn is_valid(&self) -> bool {
        self.min_raw < self.max_raw
    }
}

impl Default for CalibrationRange {
    fn default() -> Self {
        Self {
            min_raw: 0,
            max_raw: MAX_AXIS_VALUE,
        }
    }
}

/// Min/max tracker for the calibration wizard.
///
/// While the user sweeps the pedal through its travel, every raw sample is
/// fed in and the observed extremes are recorded; afterwards the capture is
/// converted into a [`CalibrationRange`].
///
/// # Examples
///
/// ```
/// use trackpro_calibration::RangeCapture;
///
/// let mut capture = RangeCapture::new();
/// for raw in [1200, 800, 8900, 4000] {
///     capture.sample(raw);
/// }
/// let range = capture.into_range()?;
/// assert_eq!(range.min_raw, 800);
/// assert_eq!(range.max_raw, 8900);
/// # Ok::<(), trackpro_calibration::CalibrationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeCapture {
    observed: Option<(u16, u16)>,
}

impl RangeCapture {
    /// Starts a capture with no samples observed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one raw sample, widening the observed extremes.
    pub fn sample(&mut self, raw: u16) {
        self.observed = Some(match self.observed {
            Some((min, max)) => (min.min(raw), max.max(raw)),
            None => (raw, raw),
        });
    }

    /// Number of distinct extremes seen so far: `None` until the first
    /// sample arrives.
    pub fn observed(&self) -> Option<(u16, u16)> {
        self.observed
    }

    /// Finishes the capture and builds a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidRange`] when no samples arrived or
    /// the pedal never moved (all samples identical), since that cannot form
    /// a usable range.
    pub fn into_range(self) -> CalibrationResult<CalibrationRange> {
        let (min, max) = self.observed.unwrap_or((0, 0));
        CalibrationRange::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    #[test]
    fn test_full_range_normalization() {
        let range = CalibrationRange::default();
        assert!((range.to_input_percent(0) - 0.0).abs() < 1e-9);
        assert!((range.to_input_percent(MAX_AXIS_VALUE) - 100.0).abs() < 1e-9);
        let mid = range.to_input_percent(32768);
        assert!((mid - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_values_below_min_clamp_to_zero() {
        let range = must(CalibrationRange::new(1000, 9000));
        assert!((range.to_input_percent(0) - 0.0).abs() < 1e-9);
        assert!((range.to_input_percent(999) - 0.0).abs() < 1e-9);
        assert!((range.to_input_percent(1000) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_values_above_max_clamp_to_hundred() {
        let range = must(CalibrationRange::new(1000, 9000));
        assert!((range.to_input_percent(9000) - 100.0).abs() < 1e-9);
        assert!((range.to_input_percent(MAX_AXIS_VALUE) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_between_min_and_max() {
        let range = must(CalibrationRange::new(1000, 9000));
        assert!((range.to_input_percent(5000) - 50.0).abs() < 1e-9);
        assert!((range.to_input_percent(3000) - 25.0).abs() < 1e-9);
        assert!((range.to_input_percent(7000) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_in_raw() {
        let range = must(CalibrationRange::new(1000, 9000));
        let mut last = range.to_input_percent(0);
        for raw in (0..=MAX_AXIS_VALUE).step_by(997) {
            let now = range.to_input_percent(raw);
            assert!(now >= last, "normalization decreased at raw {raw}");
            last = now;
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            CalibrationRange::new(9000, 1000),
            Err(CalibrationError::InvalidRange { min: 9000, max: 1000 })
        );
        assert_eq!(
            CalibrationRange::new(5000, 5000),
            Err(CalibrationError::InvalidRange { min: 5000, max: 5000 })
        );
    }

    #[test]
    fn test_degenerate_range_returns_zero() {
        // Possible only through direct field mutation; must not divide by zero
        let range = CalibrationRange {
            min_raw: 5000,
            max_raw: 5000,
        };
        assert!(!range.is_valid());
        assert!((range.to_input_percent(5000) - 0.0).abs() < 1e-9);
        assert!((range.to_input_percent(60000) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_capture_tracks_extremes() {
        let mut capture = RangeCapture::new();
        assert!(capture.observed().is_none());

        capture.sample(100);
        capture.sample(50);
        capture.sample(200);

        assert_eq!(capture.observed(), Some((50, 200)));
        let range = must(capture.into_range());
        assert_eq!(range.min_raw, 50);
        assert_eq!(range.max_raw, 200);
    }

    #[test]
    fn test_capture_without_movement_rejected() {
        let capture = RangeCapture::new();
        assert!(capture.into_range().is_err());

        let mut capture = RangeCapture::new();
        capture.sample(4242);
        capture.sample(4242);
        assert!(capture.into_range().is_err());
    }

    #[test]
    fn test_range_serde_round_trip() {
        let range = must(CalibrationRange::new(1000, 9000));
        let json = serde_json::to_string(&range).expect("serialization failed");
        let back: CalibrationRange = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(range, back);
    }
}
