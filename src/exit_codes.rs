//! Exit code constants for the pst CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Config failure (read, parse, import or write of settings)
//! - 3: Another instance is already running
//! - 4: I/O failure (data directory or settings file unusable)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid state (e.g. no folder selected).
pub const USER_ERROR: i32 = 1;

/// Config failure: settings could not be read, imported or written.
pub const CONFIG_FAILURE: i32 = 2;

/// The instance lock is held by a live owner.
pub const ALREADY_RUNNING: i32 = 3;

/// A filesystem operation failed (e.g. the data directory could not be created).
pub const IO_FAILURE: i32 = 4;
