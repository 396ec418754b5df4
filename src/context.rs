//! Application path resolution for pst.
//!
//! This module resolves, once at startup, where pst keeps its state: the
//! settings file and the instance lock record. The resolved [`AppContext`] is
//! passed by reference to everything that needs a path; nothing in the crate
//! reads these locations from globals.
//!
//! The base directory is `$PST_HOME` when set, otherwise the platform's
//! user-local application data directory for "Persian Subtitle Toolkit".

use crate::app_info::{APP_NAME, CONFIG_FILENAME, HOME_ENV_VAR, LOCK_FILENAME};
use crate::error::{Result, ToolkitError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved paths for a pst session. All paths are absolute when resolved
/// from the platform directories.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Directory holding `config.json` and `app.lock`.
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Resolve the context from the environment.
    ///
    /// # Returns
    ///
    /// * `Ok(AppContext)` - Resolved context (directory not yet created)
    /// * `Err(ToolkitError::IoError)` - No home directory could be determined
    pub fn resolve() -> Result<Self> {
        if let Some(home) = env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::resolve_from(PathBuf::from(home)));
        }

        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| Self::resolve_from(dirs.data_local_dir()))
            .ok_or_else(|| {
                ToolkitError::IoError(
                    "failed to determine the application data directory".to_string(),
                )
            })
    }

    /// Build a context rooted at a specific directory.
    ///
    /// This is useful for testing or when the data directory is known.
    pub fn resolve_from<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Create the data directory if needed.
    ///
    /// This is the one hard startup failure: if the directory cannot be
    /// created, neither settings nor the instance lock can work.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            ToolkitError::IoError(format!(
                "failed to create data directory '{}': {}",
                self.data_dir.display(),
                e
            ))
        })
    }

    /// Path to the settings file.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILENAME)
    }

    /// Path to the instance lock record.
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    struct EnvGuard {
        previous: Option<std::ffi::OsString>,
    }

    impl EnvGuard {
        fn set(value: &Path) -> Self {
            let previous = env::var_os(HOME_ENV_VAR);
            // SAFETY: tests touching the environment are serialized with #[serial].
            unsafe { env::set_var(HOME_ENV_VAR, value) };
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: see EnvGuard::set.
            unsafe {
                match &self.previous {
                    Some(v) => env::set_var(HOME_ENV_VAR, v),
                    None => env::remove_var(HOME_ENV_VAR),
                }
            }
        }
    }

    #[test]
    fn test_resolve_from_paths() {
        let ctx = AppContext::resolve_from("/data/pst");
        assert_eq!(ctx.config_path(), PathBuf::from("/data/pst/config.json"));
        assert_eq!(ctx.lock_path(), PathBuf::from("/data/pst/app.lock"));
    }

    #[test]
    #[serial]
    fn test_resolve_honors_home_override() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = EnvGuard::set(temp_dir.path());

        let ctx = AppContext::resolve().unwrap();
        assert_eq!(ctx.data_dir, temp_dir.path());
    }

    #[test]
    #[serial]
    fn test_resolve_without_override_uses_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = EnvGuard::set(temp_dir.path());
        // SAFETY: serialized; the guard restores the variable.
        unsafe { env::remove_var(HOME_ENV_VAR) };

        if let Ok(ctx) = AppContext::resolve() {
            let rendered = ctx.data_dir.to_string_lossy().to_string();
            assert!(rendered.contains("Persian") || rendered.contains("persian"));
        }
    }

    #[test]
    fn test_ensure_dirs_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = AppContext::resolve_from(temp_dir.path().join("a").join("b"));

        ctx.ensure_dirs().unwrap();
        assert!(ctx.data_dir.is_dir());

        // Idempotent
        ctx.ensure_dirs().unwrap();
    }

    #[test]
    fn test_ensure_dirs_fails_when_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a dir").unwrap();

        let ctx = AppContext::resolve_from(blocker.join("pst"));
        let err = ctx.ensure_dirs().unwrap_err();
        assert!(matches!(err, ToolkitError::IoError(_)));
    }
}
