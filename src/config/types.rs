//! Settings value types and defaults.
//!
//! The settings file stores switches as integers (`1`/`0`) so that files
//! written by earlier releases keep loading. Switches are read leniently: only
//! `1` or `true` means on, and any other value means off.

use crate::app_info::{APP_NAME, APP_VERSION};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Keys an imported settings file may update. `app_name` and `app_version`
/// identify the writer and are never imported.
pub const IMPORTABLE_KEYS: &[&str] = &["folder_path", "theme_mode", "save_logs"];

/// Appearance mode, stored as `1` (dark) or `0` (light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(into = "u8")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// Parse a theme mode from a user-facing string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" | "1" => Some(Self::Dark),
            "light" | "0" => Some(Self::Light),
            _ => None,
        }
    }

    /// User-facing name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

impl<'de> Deserialize<'de> for ThemeMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if switch_is_on(&Value::deserialize(deserializer)?) {
            Ok(ThemeMode::Dark)
        } else {
            Ok(ThemeMode::Light)
        }
    }
}

impl From<ThemeMode> for u8 {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => 1,
            ThemeMode::Light => 0,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an on/off switch value from a user-facing string.
pub fn parse_switch(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Some(true),
        "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Whether a stored switch value means on: `1` or `true`.
fn switch_is_on(value: &Value) -> bool {
    match value {
        Value::Bool(on) => *on,
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Serde adapter storing a `bool` as `1`/`0`; reads any value leniently.
pub(crate) mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(super::switch_is_on(&Value::deserialize(deserializer)?))
    }
}

// Default value functions for serde
pub(crate) fn default_app_name() -> String {
    APP_NAME.to_string()
}
pub(crate) fn default_app_version() -> String {
    APP_VERSION.to_string()
}
