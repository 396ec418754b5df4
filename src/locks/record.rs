//! The on-disk lock record.
//!
//! The record is a small text file: the owner's process id on the first line
//! and the id of the owning handle within that process on the second. The
//! content only identifies the owner; the file's modification time is the
//! heartbeat and the only liveness signal.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A lock record as observed on disk.
#[derive(Debug, Clone)]
pub struct LockRecord {
    /// Path of the record.
    pub path: PathBuf,

    /// Process id written by the owner, if the content parses as one.
    pub owner_pid: Option<u32>,

    /// Id of the owning handle within its process, if recorded.
    pub owner_handle: Option<u64>,

    /// Last refresh time (the file's modification time).
    pub modified: SystemTime,
}

impl LockRecord {
    /// Read the record at `path`.
    ///
    /// Fails with `NotFound` when no record exists.
    pub fn read<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let modified = fs::metadata(path)?.modified()?;
        let content = fs::read_to_string(path).unwrap_or_default();
        let mut lines = content.lines().map(str::trim);
        let owner_pid = lines.next().and_then(|line| line.parse().ok());
        let owner_handle = lines.next().and_then(|line| line.parse().ok());

        Ok(Self {
            path: path.to_path_buf(),
            owner_pid,
            owner_handle,
            modified,
        })
    }

    /// Time since the last refresh.
    ///
    /// A modification time in the future (clock skew) counts as zero age.
    pub fn age(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.modified)
            .unwrap_or(Duration::ZERO)
    }

    /// A record is stale once its age strictly exceeds `timeout`.
    pub fn is_stale(&self, timeout: Duration) -> bool {
        self.age() > timeout
    }

    /// Format the age as a short human-readable string.
    pub fn age_string(&self) -> String {
        format_age(self.age())
    }
}

pub(crate) fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let (days, hours, minutes) = (secs / 86_400, secs / 3_600, secs / 60);

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

/// Create a new record exclusively.
///
/// Fails with `AlreadyExists` if any record is present. A partially written
/// record is removed again.
pub(crate) fn create(path: &Path, pid: u32, handle: u64) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

    let written = file
        .write_all(format!("{}\n{}\n", pid, handle).as_bytes())
        .and_then(|()| file.sync_all());

    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

/// Refresh the record's modification time without changing its content.
///
/// Never creates the file: touching a removed record fails with `NotFound`.
pub(crate) fn touch(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_modified(SystemTime::now())
}

/// Remove the record. Returns `false` if it was already gone.
pub(crate) fn remove(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
