//! Single-instance locking for pst.
//!
//! Only one pst session may run per user. Ownership is expressed by a lock
//! record, `app.lock`, in the application data directory.
//!
//! # Lock Record
//!
//! The record holds the owner's process id as decimal text. Its modification
//! time is the heartbeat: a record whose age exceeds the configured timeout is
//! presumed abandoned by a crashed owner and may be replaced.
//!
//! # Protocol
//!
//! - **Acquire**: exclusive create (`create_new`). If a record exists and is
//!   stale it is removed and the create retried; if it is fresh the attempt
//!   fails without touching it.
//! - **Refresh**: a heartbeat thread touches the record every `timeout / 2`
//!   while the handle is active. Touching never re-creates a removed record.
//! - **Release**: clear the active flag, give the heartbeat a bounded chance to
//!   exit, then delete the record. Idempotent.
//!
//! Exclusion is advisory: it relies on every instance following this
//! protocol, not on OS file locking. All filesystem errors are absorbed here
//! and reported as outcomes, never as `ToolkitError`.

mod heartbeat;
mod instance;
mod record;
mod types;


pub use instance::InstanceLock;
pub use record::LockRecord;
pub use types::AcquireOutcome;

/// Remove a lock record found at `path`, for `pst lock clear`.
///
/// Returns `Ok(false)` when there was nothing to remove.
pub fn clear_record(path: &std::path::Path) -> std::io::Result<bool> {
    record::remove(path)
}
