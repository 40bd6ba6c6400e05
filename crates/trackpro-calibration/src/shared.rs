//! Copy-on-write profile sharing between the UI and the polling thread.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::profile::CalibrationProfile;

/// A copy-on-write handle to the current calibration profile.
///
/// The hardware polling loop and the UI thread both touch the same
/// profile, but never the same instance: edits build a complete new
/// [`CalibrationProfile`] and install it atomically, while readers take an
/// `Arc` snapshot and evaluate against that. A snapshot is always fully
/// formed; the polling loop can never observe a half-dragged point list.
///
/// The lock is held only for the pointer swap or clone, never across a
/// sample.
///
/// # Examples
///
/// ```
/// use trackpro_calibration::{CalibrationProfile, Control, SharedProfile};
///
/// let shared = SharedProfile::new(CalibrationProfile::new(Control::Throttle));
///
/// // Polling thread: grab a snapshot once per batch of samples
/// let snapshot = shared.snapshot();
/// let _output = snapshot.map_raw_to_output(32768);
///
/// // UI thread: edit a copy, then publish it
/// shared.update(|profile| profile.select_shape(trackpro_curves::CurveShape::Progressive));
/// ```
#[derive(Debug, Clone)]
pub struct SharedProfile {
    current: Arc<RwLock<Arc<CalibrationProfile>>>,
}

impl SharedProfile {
    /// Wraps a profile in a shared handle.
    pub fn new(profile: CalibrationProfile) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(profile))),
        }
    }

    /// Takes a snapshot of the current profile.
    ///
    /// Cheap (one `Arc` clone); the snapshot stays valid and immutable even
    /// if an edit is published immediately afterwards.
    pub fn snapshot(&self) -> Arc<CalibrationProfile> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the current profile wholesale.
    pub fn replace(&self, profile: CalibrationProfile) {
        *self.current.write() = Arc::new(profile);
    }

    /// Edits a copy of the current profile and publishes the result.
    ///
    /// The closure runs on a private clone; readers keep seeing the old
    /// snapshot until the swap at the end.
    pub fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut CalibrationProfile),
    {
        let mut copy = (*self.snapshot()).clone();
        edit(&mut copy);
        self.replace(copy);
    }
}
