//! Settings parsing, validation and the folder/switch rules.

use super::model::Settings;
use super::types::{IMPORTABLE_KEYS, ThemeMode};
use crate::app_info::{APP_NAME, APP_VERSION};
use crate::error::{Result, ToolkitError};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ToolkitError::ConfigError(format!("failed to parse settings: {}", e)))
    }

    /// Serialize settings as JSON indented with four spaces.
    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(self)
    }

    /// Copy with the identity fields set to this release.
    pub fn stamped(&self) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            app_version: APP_VERSION.to_string(),
            ..self.clone()
        }
    }

    /// The selected folder, if any.
    pub fn folder(&self) -> Option<&Path> {
        if self.folder_path.is_empty() {
            None
        } else {
            Some(Path::new(&self.folder_path))
        }
    }

    /// Whether a folder is selected and is an existing directory.
    pub fn has_valid_folder(&self) -> bool {
        self.folder().is_some_and(Path::is_dir)
    }

    /// Select `path` as the source folder.
    ///
    /// An existing directory is stored and returns `true`. Anything else
    /// clears the selection and turns log saving off, returning `false`.
    pub fn select_folder(&mut self, path: &Path) -> bool {
        if path.is_dir() {
            self.folder_path = path.to_string_lossy().to_string();
            true
        } else {
            self.folder_path.clear();
            self.save_logs = false;
            false
        }
    }

    /// Enforce the folder/log-switch rule on freshly loaded settings.
    ///
    /// A folder that no longer exists is dropped, and logs cannot be saved
    /// without a folder.
    pub fn normalize(&mut self) {
        if !self.has_valid_folder() {
            self.folder_path.clear();
            self.save_logs = false;
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme_mode == ThemeMode::Dark
    }

    /// Set the appearance mode.
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
    }

    /// Turn log saving on or off.
    ///
    /// Enabling requires a valid folder, because logs are written inside it.
    pub fn set_save_logs(&mut self, enabled: bool) -> Result<()> {
        if enabled && !self.has_valid_folder() {
            return Err(ToolkitError::UserError(
                "select a valid folder before enabling logs".to_string(),
            ));
        }
        self.save_logs = enabled;
        Ok(())
    }

    /// Merge an imported settings document into these settings.
    ///
    /// The document must be a JSON object whose `app_name` matches this
    /// application. Only [`IMPORTABLE_KEYS`] are taken. Returns the number of
    /// keys updated. Switch values are read leniently; a folder that is not
    /// a string rejects the whole import.
    pub fn merge_import(&mut self, imported: &Value) -> Result<usize> {
        let object = imported.as_object().ok_or_else(|| {
            ToolkitError::ConfigError("settings file must contain a JSON object".to_string())
        })?;

        if object.get("app_name").and_then(Value::as_str) != Some(APP_NAME) {
            return Err(ToolkitError::ConfigError(
                "invalid configuration file for this application".to_string(),
            ));
        }

        let mut merged = serde_json::to_value(&*self).map_err(|e| {
            ToolkitError::ConfigError(format!("failed to serialize settings: {}", e))
        })?;

        let mut updated = 0;
        if let Some(target) = merged.as_object_mut() {
            for (key, value) in object {
                if IMPORTABLE_KEYS.contains(&key.as_str()) {
                    target.insert(key.clone(), value.clone());
                    updated += 1;
                }
            }
        }

        if updated > 0 {
            *self = serde_json::from_value(merged).map_err(|e| {
                ToolkitError::ConfigError(format!("imported settings are invalid: {}", e))
            })?;
        }
        Ok(updated)
    }
}

/// Serialize any value as JSON indented with four spaces.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| ToolkitError::ConfigError(format!("failed to serialize settings: {}", e)))?;

    String::from_utf8(buf)
        .map_err(|e| ToolkitError::ConfigError(format!("settings are not valid UTF-8: {}", e)))
}
