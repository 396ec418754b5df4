//! Implementation of `pst process`.

use crate::app::AppShell;
use crate::context::AppContext;
use crate::error::Result;
use std::time::Duration;

/// Launch a session, run the processor once and close the session.
pub fn cmd_process(ctx: &AppContext, timeout: Duration) -> Result<()> {
    let mut shell = AppShell::launch(ctx, timeout)?;

    let count = shell.start_process()?;
    println!("Processing finished: {} subtitle file(s) found.", count);

    shell.shutdown()
}
