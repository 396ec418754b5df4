//! Tests for settings functionality.

use crate::app_info::{APP_NAME, APP_VERSION};
use crate::config::{ConfigStore, Settings, ThemeMode, default_export_filename, parse_switch};
use crate::error::ToolkitError;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn store_in(temp_dir: &TempDir) -> ConfigStore {
    ConfigStore::new(temp_dir.path().join("config.json"))
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.app_name, APP_NAME);
    assert_eq!(settings.app_version, APP_VERSION);
    assert_eq!(settings.folder_path, "");
    assert_eq!(settings.theme_mode, ThemeMode::Dark);
    assert!(settings.is_dark());
    assert!(!settings.save_logs);
}

#[test]
fn test_serialization_uses_integer_switches() {
    let json = Settings::default().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["theme_mode"], 1);
    assert_eq!(value["save_logs"], 0);
    assert_eq!(value["app_name"], APP_NAME);
    // Four-space indentation
    assert!(json.contains("\n    \"app_name\""));
}

#[test]
fn test_parse_partial_json() {
    let settings = Settings::from_json(r#"{"theme_mode": 0}"#).unwrap();

    assert_eq!(settings.theme_mode, ThemeMode::Light);
    assert_eq!(settings.app_name, APP_NAME);
    assert!(!settings.save_logs);
}

#[test]
fn test_parse_ignores_unknown_fields() {
    let settings = Settings::from_json(r#"{"window": "1000x800", "save_logs": 1}"#).unwrap();
    assert!(settings.save_logs);
}

#[test]
fn test_parse_accepts_boolean_switch() {
    let settings = Settings::from_json(r#"{"save_logs": true}"#).unwrap();
    assert!(settings.save_logs);
}

#[test]
fn test_parse_reads_switches_leniently() {
    let settings = Settings::from_json(r#"{"theme_mode": 2, "save_logs": 5}"#).unwrap();
    assert_eq!(settings.theme_mode, ThemeMode::Light);
    assert!(!settings.save_logs);

    let settings = Settings::from_json(r#"{"theme_mode": "dark", "save_logs": null}"#).unwrap();
    assert_eq!(settings.theme_mode, ThemeMode::Light);
    assert!(!settings.save_logs);

    let settings = Settings::from_json(r#"{"theme_mode": true, "save_logs": 1.0}"#).unwrap();
    assert_eq!(settings.theme_mode, ThemeMode::Dark);
    assert!(settings.save_logs);
}

#[test]
fn test_theme_mode_from_str() {
    assert_eq!(ThemeMode::from_str("dark"), Some(ThemeMode::Dark));
    assert_eq!(ThemeMode::from_str("Light"), Some(ThemeMode::Light));
    assert_eq!(ThemeMode::from_str("1"), Some(ThemeMode::Dark));
    assert_eq!(ThemeMode::from_str("sepia"), None);
    assert_eq!(ThemeMode::Light.to_string(), "light");
}

#[test]
fn test_parse_switch() {
    assert_eq!(parse_switch("on"), Some(true));
    assert_eq!(parse_switch("OFF"), Some(false));
    assert_eq!(parse_switch("maybe"), None);
}

#[test]
fn test_select_folder() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = Settings::default();

    assert!(settings.select_folder(temp_dir.path()));
    assert!(settings.has_valid_folder());
    settings.set_save_logs(true).unwrap();

    assert!(!settings.select_folder(&temp_dir.path().join("missing")));
    assert_eq!(settings.folder_path, "");
    assert!(!settings.save_logs);
}

#[test]
fn test_save_logs_requires_folder() {
    let mut settings = Settings::default();

    let err = settings.set_save_logs(true).unwrap_err();
    assert!(matches!(err, ToolkitError::UserError(_)));
    assert!(!settings.save_logs);

    // Turning off never fails
    settings.set_save_logs(false).unwrap();
}

#[test]
fn test_normalize_drops_vanished_folder() {
    let mut settings = Settings {
        folder_path: "/definitely/not/here/pst".to_string(),
        save_logs: true,
        ..Settings::default()
    };

    settings.normalize();

    assert_eq!(settings.folder_path, "");
    assert!(!settings.save_logs);
}

#[test]
fn test_load_missing_file_writes_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let settings = store.load().unwrap();

    assert_eq!(settings, Settings::default());
    assert!(store.path().exists());
}

#[test]
fn test_load_corrupt_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    fs::write(store.path(), "{ not json").unwrap();

    let settings = store.load().unwrap();

    assert_eq!(settings, Settings::default());
    let rewritten = fs::read_to_string(store.path()).unwrap();
    assert!(Settings::from_json(&rewritten).is_ok());
}

#[test]
fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let folder = temp_dir.path().join("subs");
    fs::create_dir(&folder).unwrap();

    let mut settings = Settings::default();
    settings.select_folder(&folder);
    settings.set_theme(ThemeMode::Light);
    settings.set_save_logs(true).unwrap();
    store.save(&settings).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_save_stamps_identity() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let settings = Settings {
        app_version: "0.9.0".to_string(),
        ..Settings::default()
    };

    store.save(&settings).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.app_version, APP_VERSION);
}

#[test]
fn test_load_keeps_folder_when_switch_is_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let folder = temp_dir.path().join("subs");
    fs::create_dir(&folder).unwrap();
    fs::write(
        store.path(),
        json!({
            "app_name": APP_NAME,
            "folder_path": folder.to_string_lossy(),
            "theme_mode": 2,
            "save_logs": 1
        })
        .to_string(),
    )
    .unwrap();

    let loaded = store.load().unwrap();

    assert_eq!(loaded.folder(), Some(folder.as_path()));
    assert_eq!(loaded.theme_mode, ThemeMode::Light);
    assert!(loaded.save_logs);
}

#[test]
fn test_load_normalizes_missing_folder() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    fs::write(
        store.path(),
        json!({"app_name": APP_NAME, "folder_path": "/gone/away", "save_logs": 1}).to_string(),
    )
    .unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.folder_path, "");
    assert!(!loaded.save_logs);
}

#[test]
fn test_merge_import_rejects_other_app() {
    let mut settings = Settings::default();
    let err = settings
        .merge_import(&json!({"app_name": "Other", "theme_mode": 0}))
        .unwrap_err();

    assert!(err.to_string().contains("invalid configuration file"));
    assert_eq!(settings.theme_mode, ThemeMode::Dark);
}

#[test]
fn test_merge_import_rejects_non_object() {
    let mut settings = Settings::default();
    assert!(settings.merge_import(&json!([1, 2, 3])).is_err());
}

#[test]
fn test_merge_import_skips_identity_and_unknown_keys() {
    let mut settings = Settings::default();
    let updated = settings
        .merge_import(&json!({
            "app_name": APP_NAME,
            "app_version": "0.0.1",
            "theme_mode": 0,
            "unknown": true
        }))
        .unwrap();

    assert_eq!(updated, 1);
    assert_eq!(settings.theme_mode, ThemeMode::Light);
    assert_eq!(settings.app_version, APP_VERSION);
}

#[test]
fn test_merge_import_rejects_bad_values() {
    let mut settings = Settings::default();
    let result = settings.merge_import(&json!({"app_name": APP_NAME, "folder_path": 5}));

    assert!(matches!(result, Err(ToolkitError::ConfigError(_))));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_import_from_file_saves_merged_settings() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let folder = temp_dir.path().join("subs");
    fs::create_dir(&folder).unwrap();
    let import_file = temp_dir.path().join("import.json");
    fs::write(
        &import_file,
        json!({
            "app_name": APP_NAME,
            "folder_path": folder.to_string_lossy(),
            "theme_mode": 0,
            "save_logs": 1
        })
        .to_string(),
    )
    .unwrap();

    let report = store.import_from(&import_file).unwrap();

    assert_eq!(report.updated, 3);
    let loaded = store.load().unwrap();
    assert_eq!(loaded.theme_mode, ThemeMode::Light);
    assert!(loaded.save_logs);
    assert_eq!(loaded.folder(), Some(folder.as_path()));
}

#[test]
fn test_import_with_nothing_to_update() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let import_file = temp_dir.path().join("import.json");
    fs::write(&import_file, json!({"app_name": APP_NAME}).to_string()).unwrap();

    let report = store.import_from(&import_file).unwrap();

    assert_eq!(report.updated, 0);
    assert_eq!(report.settings, Settings::default());
}

#[test]
fn test_import_unreadable_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let err = store
        .import_from(&temp_dir.path().join("nope.json"))
        .unwrap_err();
    assert!(matches!(err, ToolkitError::ConfigError(_)));
}

#[test]
fn test_export_writes_current_settings() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let settings = Settings {
        theme_mode: ThemeMode::Light,
        ..Settings::default()
    };
    let dest = temp_dir.path().join("out").join("export.json");

    store.export_to(&settings, &dest).unwrap();

    let exported = Settings::from_json(&fs::read_to_string(&dest).unwrap()).unwrap();
    assert_eq!(exported.theme_mode, ThemeMode::Light);
    assert_eq!(store.load().unwrap().theme_mode, ThemeMode::Light);
}

#[test]
fn test_default_export_filename() {
    let name = default_export_filename();
    assert!(name.starts_with("PST-"));
    assert!(name.ends_with(".json"));
    // PST-YYYY-MM-DD-HH-MM.json
    assert_eq!(name.len(), "PST-2026-10-19-14-05.json".len());
}
