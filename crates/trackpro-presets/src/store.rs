//! Preset storage: the store trait and the JSON file implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use trackpro_calibration::Control;

use crate::types::CurvePreset;
use crate::{PresetError, PresetResult};

/// Storage backend for named calibration presets.
///
/// The calibration UI only ever talks to this trait; the desktop app backs
/// it with [`JsonFileStore`], tests back it with an in-memory map.
pub trait PresetStore {
    /// Names of the stored presets for a control, in stored order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing data cannot be read.
    fn list(&self, control: Control) -> PresetResult<Vec<String>>;

    /// Loads one preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::NotFound`] if no preset with that name exists
    /// for the control.
    fn load(&self, control: Control, name: &str) -> PresetResult<CurvePreset>;

    /// Saves a preset, replacing any existing preset with the same name.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing data cannot be written.
    fn save(&self, preset: &CurvePreset) -> PresetResult<()>;

    /// Deletes a preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::NotFound`] if the preset does not exist.
    fn delete(&self, control: Control, name: &str) -> PresetResult<()>;
}

/// JSON file-per-control preset store.
///
/// Each control's presets live in one document
/// (`<dir>/<control>_presets.json`) holding an array of [`CurvePreset`]
/// records. Writes are atomic: the new document is written to a temporary
/// file next to the target and renamed over it, so a crash mid-save never
/// leaves a truncated preset file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> PresetResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Seeds the factory presets for every control that has no preset file
    /// yet. Existing files are left alone.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a preset file cannot be written.
    pub fn ensure_factory_presets(&self) -> PresetResult<()> {
        for control in Control::ALL {
            let path = self.control_path(control);
            if path.exists() {
                continue;
            }
            let presets = crate::defaults::factory_presets(control);
            info!(
                control = control.as_str(),
                count = presets.len(),
                "seeding factory presets"
            );
            self.write_all(control, &presets)?;
        }
        Ok(())
    }

    fn control_path(&self, control: Control) -> PathBuf {
        self.dir.join(format!("{}_presets.json", control.as_str()))
    }

    fn read_all(&self, control: Control) -> PresetResult<Vec<CurvePreset>> {
        let path = self.control_path(control);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        let presets: Vec<CurvePreset> = serde_json::from_str(&data)?;
        debug!(
            control = control.as_str(),
            count = presets.len(),
            "loaded preset file"
        );
        Ok(presets)
    }

    fn write_all(&self, control: Control, presets: &[CurvePreset]) -> PresetResult<()> {
        let path = self.control_path(control);
        let data = serde_json::to_string_pretty(presets)?;
        write_atomic(&path, &data)?;
        debug!(
            control = control.as_str(),
            count = presets.len(),
            "wrote preset file"
        );
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, data: &str) -> PresetResult<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data.as_bytes())?;
    if let Err(err) = fs::rename(&tmp, path) {
        warn!(path = %path.display(), error = %err, "atomic rename failed, cleaning up");
        if let Err(cleanup) = fs::remove_file(&tmp) {
            debug!(path = %tmp.display(), error = %cleanup, "temp file cleanup failed");
        }
        return Err(err.into());
    }
    Ok(())
}

impl PresetStore for JsonFileStore {
    fn list(&self, control: Control) -> PresetResult<Vec<String>> {
        Ok(self
            .read_all(control)?
            .into_iter()
            .map(|p| p.name)
            .collect())
    }

    fn load(&self, control: Control, name: &str) -> PresetResult<CurvePreset> {
        self.read_all(control)?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    fn save(&self, preset: &CurvePreset) -> PresetResult<()> {
        let mut presets = self.read_all(preset.control)?;
        match presets.iter_mut().find(|p| p.name == preset.name) {
            Some(slot) => *slot = preset.clone(),
            None => presets.push(preset.clone()),
        }
        self.write_all(preset.control, &presets)
    }

    fn delete(&self, control: Control, name: &str) -> PresetResult<()> {
        let mut presets = self.read_all(control)?;
        let before = presets.len();
        presets.retain(|p| p.name != name);
        if presets.len() == before {
            return Err(PresetError::NotFound(name.to_string()));
        }
        self.write_all(control, &presets)
    }
}
