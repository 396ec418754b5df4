//! Reading and writing `config.json`.

use super::model::Settings;
use crate::error::{Result, ToolkitError};
use crate::fs::atomic_write_file;
use chrono::Local;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of a settings import.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Settings after the merge (saved when `updated > 0`).
    pub settings: Settings,
    /// Number of keys taken from the imported file.
    pub updated: usize,
}

/// Persistent settings file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults.
    ///
    /// A missing or unparsable file is replaced by the defaults. The returned
    /// settings are normalized: a vanished folder is dropped and log saving is
    /// only kept with a valid folder.
    pub fn load(&self) -> Result<Settings> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file; writing defaults");
                return self.reset_to_defaults();
            }
            Err(e) => {
                return Err(ToolkitError::ConfigError(format!(
                    "failed to read settings file '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        match Settings::from_json(&content) {
            Ok(mut settings) => {
                settings.normalize();
                Ok(settings)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "settings file is corrupt; using defaults"
                );
                self.reset_to_defaults()
            }
        }
    }

    /// Write settings atomically, stamped with this release's identity.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json = settings.stamped().to_json()?;
        atomic_write_file(&self.path, &json).map_err(|e| {
            ToolkitError::ConfigError(format!(
                "failed to save settings to '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Replace the stored settings with the defaults and return them.
    pub fn reset_to_defaults(&self) -> Result<Settings> {
        let defaults = Settings::default();
        if let Err(e) = self.save(&defaults) {
            warn!(path = %self.path.display(), error = %e, "failed to write default settings");
        }
        Ok(defaults)
    }

    /// Import settings from another file into the stored settings.
    ///
    /// Saves only when at least one key was taken.
    pub fn import_from(&self, file: &Path) -> Result<ImportReport> {
        let content = fs::read_to_string(file).map_err(|e| {
            ToolkitError::ConfigError(format!(
                "failed to read settings file '{}': {}",
                file.display(),
                e
            ))
        })?;
        let imported: Value = serde_json::from_str(&content).map_err(|e| {
            ToolkitError::ConfigError(format!(
                "failed to parse settings file '{}': {}",
                file.display(),
                e
            ))
        })?;

        let mut settings = self.load()?;
        let updated = settings.merge_import(&imported)?;

        if updated > 0 {
            settings.normalize();
            self.save(&settings)?;
        }

        Ok(ImportReport { settings, updated })
    }

    /// Save `settings`, then copy the stored file's content to `dest`.
    pub fn export_to(&self, settings: &Settings, dest: &Path) -> Result<()> {
        self.save(settings)?;
        let stored = self.load()?;
        let json = stored.stamped().to_json()?;
        atomic_write_file(dest, &json)
    }
}

/// Default export file name, e.g. `PST-2026-10-19-14-05.json`.
pub fn default_export_filename() -> String {
    format!("PST-{}.json", Local::now().format("%Y-%m-%d-%H-%M"))
}
