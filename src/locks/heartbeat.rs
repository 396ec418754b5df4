//! Background refresh of a held lock record.
//!
//! The heartbeat thread shares one `AtomicBool` with its [`super::InstanceLock`].
//! Clearing the flag is the only cancellation signal: the thread notices it at
//! its next tick and exits without touching the record again.

use super::record;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Granularity at which a waiting heartbeat re-checks the active flag.
const TICK: Duration = Duration::from_millis(50);

/// Lower bound on the refresh interval.
const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Handle to a running heartbeat thread.
#[derive(Debug)]
pub struct Heartbeat {
    handle: JoinHandle<()>,
    active: Arc<AtomicBool>,
}

impl Heartbeat {
    /// Spawn a thread that touches `path` every `interval` while `active` is set.
    pub fn spawn(path: PathBuf, interval: Duration, active: Arc<AtomicBool>) -> io::Result<Self> {
        let interval = interval.max(MIN_INTERVAL);
        let flag = active.clone();
        let handle = thread::Builder::new()
            .name("pst-lock-heartbeat".to_string())
            .spawn(move || run(&path, interval, &flag))?;

        Ok(Self { handle, active })
    }

    /// Whether the thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Clear the active flag and wait at most `bound` for the thread to exit.
    pub fn stop_and_join(self, bound: Duration) -> bool {
        self.active.store(false, Ordering::SeqCst);
        self.join_within(bound)
    }

    /// Wait at most `bound` for the thread to exit.
    ///
    /// Returns `false` if the thread was still running; it is then detached
    /// and exits on its own at its next tick. A bound too large to represent
    /// waits until the thread exits.
    pub fn join_within(self, bound: Duration) -> bool {
        let deadline = Instant::now().checked_add(bound);
        while !self.handle.is_finished() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
        let _ = self.handle.join();
        true
    }
}

fn run(path: &std::path::Path, interval: Duration, active: &AtomicBool) {
    debug!(path = %path.display(), ?interval, "lock heartbeat started");

    while wait(interval, active) {
        match record::touch(path) {
            Ok(()) => trace!(path = %path.display(), "lock record refreshed"),
            Err(e) => {
                if active.load(Ordering::SeqCst) {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to refresh lock record; heartbeat stopped"
                    );
                }
                break;
            }
        }
    }

    debug!(path = %path.display(), "lock heartbeat exited");
}

/// Sleep for `interval` in ticks. Returns `false` as soon as `active` clears.
///
/// An interval past the clock's range never elapses; only clearing `active`
/// ends the wait.
fn wait(interval: Duration, active: &AtomicBool) -> bool {
    let deadline = Instant::now().checked_add(interval);
    loop {
        if !active.load(Ordering::SeqCst) {
            return false;
        }
        let remaining = match deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => TICK,
        };
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(TICK.min(remaining));
    }
}
