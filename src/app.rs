//! The application session.
//!
//! An [`AppShell`] owns the instance lock, the settings store and the current
//! settings for as long as pst is running. Every action that changes settings
//! saves them immediately, and every action is recorded in the activity log.
//!
//! Two kinds of session exist:
//! - [`AppShell::launch`] is the interactive session: the lock is refreshed by
//!   a heartbeat and the session start and close are logged.
//! - [`AppShell::attach`] is used by one-shot config commands: the lock is held
//!   for the duration of the command without a heartbeat.

use crate::activity::{self, ActivityEntry};
use crate::app_info::APP_NAME;
use crate::config::{ConfigStore, Settings, ThemeMode, default_export_filename};
use crate::context::AppContext;
use crate::error::{Result, ToolkitError};
use crate::locks::InstanceLock;
use crate::processor::SubtitleProcessor;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionKind {
    Interactive,
    Command,
}

/// A running pst session.
#[derive(Debug)]
pub struct AppShell {
    kind: SessionKind,
    lock: InstanceLock,
    store: ConfigStore,
    settings: Settings,
    closed: bool,
}

impl AppShell {
    /// Start an interactive session.
    ///
    /// Takes the instance lock, starts its heartbeat and loads the settings.
    ///
    /// # Errors
    ///
    /// * `ToolkitError::IoError` - The data directory cannot be created
    /// * `ToolkitError::AlreadyRunning` - Another live instance holds the lock
    pub fn launch(ctx: &AppContext, timeout: Duration) -> Result<Self> {
        Self::open(ctx, timeout, SessionKind::Interactive)
    }

    /// Start a session for a single command, without a heartbeat.
    pub fn attach(ctx: &AppContext, timeout: Duration) -> Result<Self> {
        Self::open(ctx, timeout, SessionKind::Command)
    }

    fn open(ctx: &AppContext, timeout: Duration, kind: SessionKind) -> Result<Self> {
        ctx.ensure_dirs()?;

        let mut lock = InstanceLock::new(ctx.lock_path(), timeout);
        let outcome = lock.try_acquire();
        if !outcome.is_acquired() {
            warn!(%outcome, "instance lock not acquired");
            return Err(ToolkitError::AlreadyRunning(APP_NAME.to_string()));
        }

        if kind == SessionKind::Interactive {
            lock.start_updater();
        }

        let store = ConfigStore::new(ctx.config_path());
        let settings = store.load()?;

        let shell = Self {
            kind,
            lock,
            store,
            settings,
            closed: false,
        };
        if kind == SessionKind::Interactive {
            shell.log_loaded();
        }
        Ok(shell)
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The instance lock held by this session.
    #[cfg(test)]
    pub fn lock(&self) -> &InstanceLock {
        &self.lock
    }

    /// Path of the settings file.
    pub fn config_path(&self) -> &Path {
        self.store.path()
    }

    fn log(&self, message: impl Into<String>) {
        activity::record(&self.settings, ActivityEntry::new(message));
    }

    fn log_loaded(&self) {
        let info = activity::system_info();
        self.log(format!("System Info: {}", info));
        self.log("Application config loaded/reloaded.");
    }

    fn save(&self) -> Result<()> {
        self.log("Config saved.");
        self.store.save(&self.settings)
    }

    /// Select the source folder.
    ///
    /// A path that is not a directory clears the selection (and turns log
    /// saving off) before the error is returned.
    pub fn browse_folder(&mut self, path: &Path) -> Result<()> {
        self.log(format!("Target folder changing to: {}", path.display()));

        let selected = self.settings.select_folder(path);
        self.save()?;

        if !selected {
            return Err(ToolkitError::UserError(format!(
                "'{}' is not a directory; folder selection cleared",
                path.display()
            )));
        }
        self.log("Target folder successfully changed.");
        Ok(())
    }

    pub fn set_theme(&mut self, mode: ThemeMode) -> Result<()> {
        self.settings.set_theme(mode);
        self.log(format!("Appearance mode changed to {}", mode));
        self.save()
    }

    /// Turn log saving on or off.
    ///
    /// The change is written to the activity log in both directions.
    pub fn toggle_logs(&mut self, enabled: bool) -> Result<()> {
        self.settings.set_save_logs(enabled)?;

        let message = if enabled {
            "Logging enabled by user."
        } else {
            "Logging disabled by user."
        };
        activity::record_forced(&self.settings, ActivityEntry::new(message));
        self.save()
    }

    /// Restore the default settings.
    pub fn reset_settings(&mut self) -> Result<()> {
        self.log("Settings reset to default.");
        self.settings = Settings::default();
        self.save()
    }

    /// Import settings from `file`, returning the number of keys applied.
    pub fn import_settings(&mut self, file: &Path) -> Result<usize> {
        let report = self.store.import_from(file)?;

        if report.updated > 0 {
            self.settings = report.settings;
            self.log_loaded();
            self.log(format!(
                "Settings imported successfully from: {}",
                file.display()
            ));
        }
        Ok(report.updated)
    }

    /// Export settings to `dest`, or to a timestamped file in the current
    /// directory. Returns the path written.
    pub fn export_settings(&self, dest: Option<&Path>) -> Result<PathBuf> {
        let dest = dest
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(default_export_filename()));

        self.log("Config saved.");
        self.store.export_to(&self.settings, &dest)?;
        self.log(format!("Settings exported successfully to: {}", dest.display()));
        Ok(dest)
    }

    /// Run the subtitle processor on the selected folder.
    ///
    /// The processor runs on its own thread; this call waits for it.
    /// Returns the number of subtitle files found.
    pub fn start_process(&self) -> Result<usize> {
        let folder = self
            .settings
            .folder()
            .map(Path::to_path_buf)
            .ok_or_else(|| ToolkitError::UserError("please select a folder first".to_string()))?;

        let processor = SubtitleProcessor::new(folder);
        let settings = self.settings.clone();
        let handle = thread::Builder::new()
            .name("pst-processor".to_string())
            .spawn(move || processor.run(&settings))
            .map_err(|e| {
                ToolkitError::IoError(format!("failed to start subtitle processor: {}", e))
            })?;

        handle
            .join()
            .map_err(|_| ToolkitError::IoError("subtitle processor panicked".to_string()))?
    }

    /// End the session: save settings and release the instance lock.
    ///
    /// Idempotent. The lock is released even when saving fails.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.kind == SessionKind::Interactive {
            self.log("Application closing.");
        }
        let saved = self.save();
        self.lock.release();
        debug!("session closed");
        saved
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(error = %e, "failed to save settings on exit");
        }
    }
}
