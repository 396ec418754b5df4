//! Lock outcome definitions.

use super::record::format_age;
use std::fmt;
use std::time::Duration;

/// Result of an acquisition attempt.
///
/// Only [`AcquireOutcome::Acquired`] and [`AcquireOutcome::RecoveredStale`]
/// mean the handle now owns the lock. Callers that only need a yes/no answer
/// use [`super::InstanceLock::acquire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// No record existed (or this handle already owned it).
    Acquired,

    /// An abandoned record was replaced.
    RecoveredStale {
        /// Process id found in the abandoned record, if readable.
        previous_pid: Option<u32>,
    },

    /// A live record is held by another instance.
    AlreadyRunning {
        /// Process id found in the live record, if readable.
        owner_pid: Option<u32>,
        /// Age of the live record when observed.
        age: Duration,
    },

    /// The record could not be read, removed or written.
    IoFailure(String),
}

impl AcquireOutcome {
    /// Whether the handle owns the lock after this outcome.
    pub fn is_acquired(&self) -> bool {
        matches!(
            self,
            AcquireOutcome::Acquired | AcquireOutcome::RecoveredStale { .. }
        )
    }
}

impl fmt::Display for AcquireOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireOutcome::Acquired => write!(f, "acquired"),
            AcquireOutcome::RecoveredStale { previous_pid } => match previous_pid {
                Some(pid) => write!(f, "acquired (recovered stale lock of pid {})", pid),
                None => write!(f, "acquired (recovered stale lock)"),
            },
            AcquireOutcome::AlreadyRunning { owner_pid, age } => {
                write!(f, "held by ")?;
                match owner_pid {
                    Some(pid) => write!(f, "pid {}", pid)?,
                    None => write!(f, "another instance")?,
                }
                write!(f, ", refreshed {} ago", format_age(*age))
            }
            AcquireOutcome::IoFailure(msg) => write!(f, "lock record unavailable: {}", msg),
        }
    }
}
