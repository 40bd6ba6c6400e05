//! Calibration preset persistence for TrackPro
//!
//! This crate defines the serialized form of a calibration profile (a
//! named, schema-versioned preset record) and the storage behind the
//! preset manager UI: a [`PresetStore`] trait with a JSON
//! file-per-control implementation, plus the factory presets each control
//! ships with.
//!
//! The on-disk format is the flat record described by the calibration
//! engine's external contract: name, control, point list, raw range,
//! deadzone percentages and the curve-type label. Anything that preserves
//! those fields round-trips; JSON is what the desktop app uses.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod defaults;
pub mod store;
pub mod types;

pub use defaults::factory_presets;
pub use store::{JsonFileStore, PresetStore};
pub use types::CurvePreset;

use thiserror::Error;

/// Current preset schema version.
/// Increment when the `CurvePreset` structure changes incompatibly.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Error type for preset operations.
#[derive(Error, Debug)]
pub enum PresetError {
    /// The preset record cannot be turned into a usable profile.
    #[error("invalid preset '{name}': {source}")]
    InvalidPreset {
        /// Name of the offending preset.
        name: String,
        /// The underlying configuration error.
        #[source]
        source: trackpro_calibration::CalibrationError,
    },

    /// No preset with the requested name exists for the control.
    #[error("preset not found: {0}")]
    NotFound(String),

    /// The stored file carries a schema version from a newer release.
    #[error("unsupported preset schema version {0}: maximum supported is {1}")]
    UnsupportedVersion(u32, u32),

    /// The preset file could not be read, written or parsed.
    #[error("preset storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for PresetError {
    fn from(err: std::io::Error) -> Self {
        PresetError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(err: serde_json::Error) -> Self {
        PresetError::Storage(err.to_string())
    }
}

/// Result type for preset operations.
pub type PresetResult<T> = Result<T, PresetError>;
