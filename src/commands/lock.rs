//! Implementation of `pst lock status` and `pst lock clear`.

use crate::cli::{LockAction, LockClearArgs, LockCommand};
use crate::context::AppContext;
use crate::error::{Result, ToolkitError};
use crate::locks::{self, LockRecord};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use super::write_failed;

pub fn cmd_lock(ctx: &AppContext, timeout: Duration, cmd: LockCommand) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match cmd.action {
        LockAction::Status => lock_status(&ctx.lock_path(), timeout, &mut stdout),
        LockAction::Clear(args) => lock_clear(&ctx.lock_path(), timeout, args, &mut stdout),
    }
}

/// Read the record at `path`, treating a missing file as `None`.
fn read_record(path: &Path) -> Result<Option<LockRecord>> {
    match LockRecord::read(path) {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ToolkitError::IoError(format!(
            "failed to read lock record '{}': {}",
            path.display(),
            e
        ))),
    }
}

fn owner_string(record: &LockRecord) -> String {
    match record.owner_pid {
        Some(pid) if pid == std::process::id() => format!("{} (this process)", pid),
        Some(pid) => pid.to_string(),
        None => "unknown".to_string(),
    }
}

fn lock_status<W: Write>(path: &Path, timeout: Duration, out: &mut W) -> Result<()> {
    let Some(record) = read_record(path)? else {
        return writeln!(out, "No lock record at {}.", path.display()).map_err(write_failed);
    };

    writeln!(out, "Lock record: {}", path.display()).map_err(write_failed)?;
    writeln!(out, "  Owner PID:  {}", owner_string(&record)).map_err(write_failed)?;
    writeln!(out, "  Refreshed:  {} ago", record.age_string()).map_err(write_failed)?;

    if record.is_stale(timeout) {
        writeln!(
            out,
            "  Status:     STALE (exceeds {}s timeout)",
            timeout.as_secs()
        )
        .map_err(write_failed)?;
        writeln!(out).map_err(write_failed)?;
        writeln!(
            out,
            "The next pst session will replace it. Use `pst lock clear` to remove it now."
        )
        .map_err(write_failed)
    } else {
        writeln!(out, "  Status:     live").map_err(write_failed)
    }
}

fn lock_clear<W: Write>(
    path: &Path,
    timeout: Duration,
    args: LockClearArgs,
    out: &mut W,
) -> Result<()> {
    let Some(record) = read_record(path)? else {
        return writeln!(out, "No lock record to clear.").map_err(write_failed);
    };

    let stale = record.is_stale(timeout);
    if !stale && !args.force {
        return Err(ToolkitError::UserError(format!(
            "refusing to clear a live lock without --force flag.\n\n\
             The lock is held by pid {}, refreshed {} ago.\n\
             Only clear it if you are certain that session has crashed.\n\n\
             To clear the lock, run:\n  pst lock clear --force",
            owner_string(&record),
            record.age_string()
        )));
    }

    let removed = locks::clear_record(path).map_err(|e| {
        ToolkitError::IoError(format!(
            "failed to remove lock record '{}': {}",
            path.display(),
            e
        ))
    })?;

    if removed {
        writeln!(out, "Cleared lock record: {}", path.display()).map_err(write_failed)?;
        writeln!(out, "  Owner PID:  {}", owner_string(&record)).map_err(write_failed)?;
        writeln!(out, "  Refreshed:  {} ago", record.age_string()).map_err(write_failed)?;
        if stale {
            writeln!(out, "  Status:     was STALE").map_err(write_failed)?;
        }
        Ok(())
    } else {
        writeln!(out, "No lock record to clear.").map_err(write_failed)
    }
}
