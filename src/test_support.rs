use crate::context::AppContext;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// An isolated application data directory plus room for subtitle folders.
pub(crate) struct TestHome {
    pub(crate) dir: TempDir,
    pub(crate) ctx: AppContext,
}

impl TestHome {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::resolve_from(dir.path().join("data"));
        ctx.ensure_dirs().unwrap();
        Self { dir, ctx }
    }

    /// Create a folder named `name` next to the data directory.
    pub(crate) fn folder(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a lock record owned by `pid`, last refreshed `age` ago.
    pub(crate) fn plant_lock(&self, pid: u32, age: Duration) -> PathBuf {
        let path = self.ctx.lock_path();
        fs::write(&path, pid.to_string()).unwrap();
        backdate(&path, age);
        path
    }
}

/// Set a file's modification time to `by` in the past.
pub(crate) fn backdate(path: &Path, by: Duration) {
    OpenOptions::new()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::now() - by)
        .unwrap_or_else(|e| panic!("failed to backdate {}: {}", path.display(), e));
}
