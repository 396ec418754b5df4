//! CLI argument parsing for pst.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::app_info::DEFAULT_LOCK_TIMEOUT_SECS;
use crate::config::{ThemeMode, parse_switch};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Persian Subtitle Toolkit: manage the subtitle folder, settings and
/// processing from the terminal.
///
/// Only one pst session runs at a time. The instance lock lives next to the
/// settings file in the application data directory (override with PST_HOME).
#[derive(Parser, Debug)]
#[command(name = "pst")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase diagnostic output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Seconds without a refresh after which a lock record counts as stale.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_LOCK_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub lock_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Lock timeout as a duration.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout)
    }
}

/// Available commands for pst.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session.
    ///
    /// Takes the instance lock and reads commands from stdin until
    /// `quit` or end of input. Type `help` for the command list.
    Run,

    /// Run the subtitle processor once on the selected folder.
    Process,

    /// View or change settings.
    ///
    /// Changing settings takes the instance lock, so it is refused while
    /// an interactive session is running.
    Config(ConfigCommand),

    /// Inspect or clear the instance lock.
    Lock(LockCommand),

    /// Show how to support the project.
    Donate,
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current settings.
    Show,

    /// Restore the default settings.
    Reset,

    /// Select the source folder containing subtitles.
    Folder(FolderArgs),

    /// Set the appearance mode.
    Theme(ThemeArgs),

    /// Turn saving of activity logs on or off.
    Logs(LogsArgs),

    /// Import settings from a file written by pst.
    Import(ImportArgs),

    /// Export settings to a file.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
pub struct FolderArgs {
    /// Directory containing subtitles.
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ThemeArgs {
    /// `dark` or `light`.
    #[arg(value_parser = parse_theme_arg)]
    pub mode: ThemeMode,
}

#[derive(Parser, Debug)]
pub struct LogsArgs {
    /// `on` or `off`.
    #[arg(value_parser = parse_switch_arg, action = ArgAction::Set)]
    pub state: bool,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Settings file to import.
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Destination file (default: PST-YYYY-MM-DD-HH-MM.json in the current directory).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct LockCommand {
    #[command(subcommand)]
    pub action: LockAction,
}

/// Lock subcommands.
#[derive(Subcommand, Debug)]
pub enum LockAction {
    /// Show the lock record, its owner and whether it is stale.
    Status,

    /// Remove the lock record.
    Clear(LockClearArgs),
}

#[derive(Parser, Debug)]
pub struct LockClearArgs {
    /// Remove the record even if its owner still looks alive.
    #[arg(long)]
    pub force: bool,
}

pub(crate) fn parse_theme_arg(s: &str) -> Result<ThemeMode, String> {
    ThemeMode::from_str(s).ok_or_else(|| format!("unknown theme '{}' (expected dark or light)", s))
}

pub(crate) fn parse_switch_arg(s: &str) -> Result<bool, String> {
    parse_switch(s).ok_or_else(|| format!("unknown switch value '{}' (expected on or off)", s))
}
