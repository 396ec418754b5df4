//! Activity logging for pst.
//!
//! When the user turns on "Save Logs", every activity message is appended to
//! `<folder>/logs/activity.ndjson` inside the selected subtitle folder, one
//! JSON object per line:
//! - `ts`: RFC3339 timestamp
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `message`: what happened
//! - `details`: optional freeform object
//!
//! Writing the activity log never fails an operation. Problems are reported
//! through `tracing` and otherwise ignored. Every message is also emitted as a
//! `tracing` event whether or not it is saved.

use crate::app_info::APP_VERSION;
use crate::config::Settings;
use crate::error::{Result, ToolkitError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory created inside the selected folder.
pub const LOGS_DIR: &str = "logs";

/// Activity log file name.
pub const ACTIVITY_FILE: &str = "activity.ndjson";

/// One line of the activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the activity happened.
    pub ts: DateTime<Utc>,

    /// Who performed it (e.g., `user@HOST`).
    pub actor: String,

    /// Human-readable message.
    pub message: String,

    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ActivityEntry {
    /// Create an entry stamped with the current time and actor.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            actor: get_actor_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize the entry to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ToolkitError::IoError(format!("failed to serialize activity entry: {}", e))
        })
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host_name())
}

fn host_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Path of the activity log inside `folder`.
pub fn activity_file_path(folder: &Path) -> PathBuf {
    folder.join(LOGS_DIR).join(ACTIVITY_FILE)
}

/// Append `entry` to the activity log in `folder`, creating `logs/` if needed.
pub fn append_entry(folder: &Path, entry: &ActivityEntry) -> Result<()> {
    let json_line = entry.to_ndjson_line()?;

    let logs_dir = folder.join(LOGS_DIR);
    fs::create_dir_all(&logs_dir).map_err(|e| {
        ToolkitError::IoError(format!(
            "failed to create logs directory '{}': {}",
            logs_dir.display(),
            e
        ))
    })?;

    let path = activity_file_path(folder);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            ToolkitError::IoError(format!(
                "failed to open activity log '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        ToolkitError::IoError(format!(
            "failed to write activity log '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Record an activity, saving it when the settings have log saving on.
pub fn record(settings: &Settings, entry: ActivityEntry) {
    write(settings, entry, settings.save_logs);
}

/// Record an activity, saving it whenever a valid folder is selected.
///
/// Used for the log switch itself, so that turning logging off is still
/// written to the log.
pub fn record_forced(settings: &Settings, entry: ActivityEntry) {
    write(settings, entry, true);
}

fn write(settings: &Settings, entry: ActivityEntry, save: bool) {
    info!(target: "pst::activity", "{}", entry.message);

    if !save || !settings.has_valid_folder() {
        return;
    }
    if let Some(folder) = settings.folder()
        && let Err(e) = append_entry(folder, &entry)
    {
        warn!(error = %e, "failed to save activity log entry");
    }
}

/// Describe the host for the startup log line.
pub fn system_info() -> Value {
    json!({
        "os": std::env::consts::OS,
        "family": std::env::consts::FAMILY,
        "arch": std::env::consts::ARCH,
        "hostname": host_name(),
        "pid": std::process::id(),
        "app_version": APP_VERSION,
    })
}
