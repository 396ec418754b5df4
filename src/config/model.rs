//! Settings struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Persisted user settings.
///
/// This struct represents the contents of `config.json`. Unknown keys are
/// ignored and missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Application identity; an import must carry the same name.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Version of the release that wrote the file.
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Source folder containing subtitles (empty when none is selected).
    pub folder_path: String,

    /// Appearance mode.
    pub theme_mode: ThemeMode,

    /// Whether activity is logged under `<folder>/logs/`.
    #[serde(with = "int_flag")]
    pub save_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_version: default_app_version(),
            folder_path: String::new(),
            theme_mode: ThemeMode::Dark,
            save_logs: false,
        }
    }
}
