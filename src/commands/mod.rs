//! Command implementations for pst.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command except `donate` runs against the
//! application data directory resolved once here.

mod config;
mod donate;
mod lock;
mod process;
mod run;

use crate::cli::{Cli, Command};
use crate::context::AppContext;
use crate::error::{Result, ToolkitError};
use std::io;
use std::time::Duration;

/// Dispatch a parsed command line to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let timeout = cli.lock_timeout();
    match cli.command {
        Command::Donate => donate::cmd_donate(),
        command => {
            let ctx = AppContext::resolve()?;
            dispatch_in(&ctx, timeout, command)
        }
    }
}

/// Dispatch a command against an already resolved context.
fn dispatch_in(ctx: &AppContext, timeout: Duration, command: Command) -> Result<()> {
    match command {
        Command::Run => run::cmd_run(ctx, timeout),
        Command::Process => process::cmd_process(ctx, timeout),
        Command::Config(cmd) => config::cmd_config(ctx, timeout, cmd),
        Command::Lock(cmd) => lock::cmd_lock(ctx, timeout, cmd),
        Command::Donate => donate::cmd_donate(),
    }
}

pub(crate) fn write_failed(e: io::Error) -> ToolkitError {
    ToolkitError::IoError(format!("failed to write output: {}", e))
}
