//! The single-instance lock handle.

use super::heartbeat::Heartbeat;
use super::record::{self, LockRecord};
use super::types::AcquireOutcome;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long `release` waits for the heartbeat to observe the cleared flag.
pub const RELEASE_JOIN_BOUND: Duration = Duration::from_millis(500);

/// Create attempts before giving up when the record keeps changing underneath us.
const MAX_ACQUIRE_ATTEMPTS: usize = 3;

/// Source of per-process handle ids written into the record.
static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// In-process handle on the instance lock record.
///
/// States: unlocked (`active == false`) and locked. While locked, an optional
/// heartbeat thread keeps the record fresh. Dropping the handle releases it.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    timeout: Duration,
    id: u64,
    active: Arc<AtomicBool>,
    heartbeat: Option<Heartbeat>,
}

impl InstanceLock {
    /// Create an unlocked handle for the record at `path`.
    ///
    /// The directory containing `path` must already exist.
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            active: Arc::new(AtomicBool::new(false)),
            heartbeat: None,
        }
    }

    /// Path of the lock record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Age after which an unrefreshed record is considered abandoned.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether this handle currently owns the lock.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Whether a heartbeat thread is running for this handle.
    pub fn is_updating(&self) -> bool {
        self.heartbeat.as_ref().is_some_and(|hb| !hb.is_finished())
    }

    /// Try to take ownership. Returns `true` on success.
    pub fn acquire(&mut self) -> bool {
        self.try_acquire().is_acquired()
    }

    /// Try to take ownership and report why it did or did not succeed.
    ///
    /// A missing record is created; a record older than the timeout is
    /// replaced; a fresh record is left untouched. Creation is exclusive, so
    /// two racing acquirers cannot both create the record.
    pub fn try_acquire(&mut self) -> AcquireOutcome {
        if self.is_active() {
            return AcquireOutcome::Acquired;
        }

        let pid = process::id();
        let mut recovered: Option<Option<u32>> = None;

        for _ in 0..MAX_ACQUIRE_ATTEMPTS {
            match record::create(&self.path, pid, self.id) {
                Ok(()) => {
                    self.active.store(true, Ordering::SeqCst);
                    return match recovered {
                        Some(previous_pid) => {
                            info!(
                                path = %self.path.display(),
                                ?previous_pid,
                                "recovered stale instance lock"
                            );
                            AcquireOutcome::RecoveredStale { previous_pid }
                        }
                        None => {
                            debug!(path = %self.path.display(), pid, "instance lock acquired");
                            AcquireOutcome::Acquired
                        }
                    };
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return self.io_failure("failed to create lock record", &e),
            }

            let existing = match LockRecord::read(&self.path) {
                Ok(existing) => existing,
                // Vanished between create and read; try again.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return self.io_failure("failed to read lock record", &e),
            };

            if !existing.is_stale(self.timeout) {
                debug!(
                    path = %self.path.display(),
                    owner_pid = ?existing.owner_pid,
                    age = %existing.age_string(),
                    "instance lock held by a live owner"
                );
                return AcquireOutcome::AlreadyRunning {
                    owner_pid: existing.owner_pid,
                    age: existing.age(),
                };
            }

            if let Err(e) = record::remove(&self.path) {
                return self.io_failure("failed to remove stale lock record", &e);
            }
            recovered = Some(existing.owner_pid);
        }

        // Another process keeps re-creating the record: it is alive.
        AcquireOutcome::AlreadyRunning {
            owner_pid: LockRecord::read(&self.path).ok().and_then(|r| r.owner_pid),
            age: Duration::ZERO,
        }
    }

    /// Start the background refresh for a held lock.
    ///
    /// The record is touched every `timeout / 2`. Does nothing when the lock
    /// is not held or a heartbeat is already running.
    pub fn start_updater(&mut self) {
        if !self.is_active() {
            debug!("start_updater called without holding the instance lock");
            return;
        }
        if self.is_updating() {
            return;
        }

        match Heartbeat::spawn(self.path.clone(), self.timeout / 2, self.active.clone()) {
            Ok(heartbeat) => self.heartbeat = Some(heartbeat),
            Err(e) => warn!(error = %e, "failed to start lock heartbeat"),
        }
    }

    /// Give up ownership and remove the record.
    ///
    /// The active flag is cleared before the record is deleted, and the
    /// heartbeat gets a bounded chance to exit first. Idempotent; never fails.
    /// A record now owned by another process or by another handle in this
    /// process is left in place.
    pub fn release(&mut self) {
        let was_active = self.active.swap(false, Ordering::SeqCst);

        if let Some(heartbeat) = self.heartbeat.take()
            && !heartbeat.stop_and_join(RELEASE_JOIN_BOUND)
        {
            debug!("lock heartbeat still running at release; detached");
        }

        if !was_active {
            return;
        }

        match LockRecord::read(&self.path) {
            Ok(existing) if !self.owns(&existing) => {
                warn!(
                    path = %self.path.display(),
                    owner_pid = ?existing.owner_pid,
                    owner_handle = ?existing.owner_handle,
                    "lock record was taken over by another owner; leaving it"
                );
                return;
            }
            _ => {}
        }

        match record::remove(&self.path) {
            Ok(true) => debug!(path = %self.path.display(), "instance lock released"),
            Ok(false) => debug!(path = %self.path.display(), "lock record already gone"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove lock record"
            ),
        }
    }

    /// Whether `existing` was written by this handle. Unreadable fields count
    /// as ours.
    fn owns(&self, existing: &LockRecord) -> bool {
        existing.owner_pid.is_none_or(|pid| pid == process::id())
            && existing.owner_handle.is_none_or(|id| id == self.id)
    }

    fn io_failure(&self, what: &str, err: &io::Error) -> AcquireOutcome {
        warn!(path = %self.path.display(), error = %err, "{}", what);
        AcquireOutcome::IoFailure(format!("{} '{}': {}", what, self.path.display(), err))
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        self.release();
    }
}
