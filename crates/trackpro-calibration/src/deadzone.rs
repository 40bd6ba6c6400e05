//! Deadzone remapping at both ends of the input range.

use serde::{Deserialize, Serialize};

/// Largest deadzone allowed at either end, in percent.
pub const MAX_SINGLE_DEADZONE: f64 = 50.0;

/// Largest combined size of both deadzones, in percent.
///
/// Leaves at least a 20% usable band in the middle of the travel.
pub const MAX_COMBINED_DEADZONE: f64 = 80.0;

/// Margins at the ends of the input travel that clamp to the extremes.
///
/// Input below the minimum deadzone reads as fully released; input within
/// the maximum deadzone reads as fully pressed. The band in between is
/// rescaled linearly onto the full `[0,100]` range, so the response curve
/// always sees the whole domain.
///
/// Both margins are clamped on adjustment to keep each within `[0,50]`
/// and their sum within 80; the setters enforce the invariants, they are
/// never silently violated.
///
/// # Examples
///
/// ```
/// use trackpro_calibration::DeadzoneSettings;
///
/// let dz = DeadzoneSettings::new(10.0, 5.0);
/// assert!((dz.apply(5.0) - 0.0).abs() < 1e-9);   // inside the low deadzone
/// assert!((dz.apply(97.0) - 100.0).abs() < 1e-9); // inside the high deadzone
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "DeadzoneMargins")]
pub struct DeadzoneSettings {
    min_percent: f64,
    max_percent: f64,
}

/// Raw margins as stored on disk; deserialization funnels through
/// [`DeadzoneSettings::new`] so a hand-edited file cannot smuggle in
/// margins the setters would have clamped.
#[derive(Deserialize)]
struct DeadzoneMargins {
    min_percent: f64,
    max_percent: f64,
}

impl From<DeadzoneMargins> for DeadzoneSettings {
    fn from(margins: DeadzoneMargins) -> Self {
        Self::new(margins.min_percent, margins.max_percent)
    }
}

impl DeadzoneSettings {
    /// Creates settings with both margins clamped into their legal ranges.
    ///
    /// When the requested pair exceeds the combined limit, the maximum
    /// deadzone is reduced first (matching how the UI sliders resolve the
    /// conflict: the slider moved last wins).
    pub fn new(min_percent: f64, max_percent: f64) -> Self {
        let mut dz = Self::default();
        dz.set_max(max_percent);
        dz.set_min(min_percent);
        dz
    }

    /// The minimum-end deadzone in percent.
    pub fn min_percent(&self) -> f64 {
        self.min_percent
    }

    /// The maximum-end deadzone in percent.
    pub fn max_percent(&self) -> f64 {
        self.max_percent
    }

    /// Adjusts the minimum-end deadzone, shrinking the other margin if the
    /// combined limit would be exceeded.
    pub fn set_min(&mut self, percent: f64) {
        self.min_percent = clamp_margin(percent);
        if self.min_percent + self.max_percent > MAX_COMBINED_DEADZONE {
            self.max_percent = clamp_margin(MAX_COMBINED_DEADZONE - self.min_percent);
        }
    }

    /// Adjusts the maximum-end deadzone, shrinking the other margin if the
    /// combined limit would be exceeded.
    pub fn set_max(&mut self, percent: f64) {
        self.max_percent = clamp_margin(percent);
        if self.min_percent + self.max_percent > MAX_COMBINED_DEADZONE {
            self.min_percent = clamp_margin(MAX_COMBINED_DEADZONE - self.max_percent);
        }
    }

    /// Remaps an input percentage through the deadzones.
    ///
    /// Below the minimum deadzone returns 0; at or above
    /// `100 - max_percent` returns 100; the usable band in between is
    /// rescaled onto `[0,100]`. A non-positive usable band (only reachable
    /// if the struct invariants were bypassed) returns 0.
    #[inline]
    pub fn apply(&self, input_percent: f64) -> f64 {
        let input = if input_percent.is_nan() {
            0.0
        } else {
            input_percent.clamp(0.0, 100.0)
        };

        if input < self.min_percent {
            return 0.0;
        }
        if input >= 100.0 - self.max_percent {
            return 100.0;
        }

        let usable = 100.0 - self.min_percent - self.max_percent;
        if usable <= 0.0 {
            return 0.0;
        }
        ((input - self.min_percent) / usable * 100.0).clamp(0.0, 100.0)
    }

    /// Whether both deadzones are zero (identity remap).
    pub fn is_disabled(&self) -> bool {
        // Margins are never negative, so <= 0 means exactly zero
        self.min_percent <= 0.0 && self.max_percent <= 0.0
    }
}

#[inline]
fn clamp_margin(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, MAX_SINGLE_DEADZONE)
}
