//! Implementation of `pst run`, the interactive session.
//!
//! Commands are read one line at a time and split like a shell would, so
//! paths with spaces can be quoted. A failing command prints its error and
//! the session continues; `quit`, `exit` or end of input close it.

use crate::app::AppShell;
use crate::app_info::title;
use crate::config::{ThemeMode, parse_switch};
use crate::context::AppContext;
use crate::error::{Result, ToolkitError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use super::{config::write_settings, donate::write_donate_info, write_failed};

const HELP: &str = "\
Commands:
  browse <dir>        select the source folder containing subtitles
  theme dark|light    set the appearance mode
  logs on|off         save activity logs under <folder>/logs
  start               run the subtitle processor on the selected folder
  reset               restore the default settings
  import <file>       import settings from a file
  export [file]       export settings (default: PST-YYYY-MM-DD-HH-MM.json)
  status              show the current settings
  donate              show how to support the project
  help                show this help
  quit | exit         close the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    Browse(PathBuf),
    Theme(ThemeMode),
    Logs(bool),
    Start,
    Reset,
    Import(PathBuf),
    Export(Option<PathBuf>),
    Status,
    Donate,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub(crate) fn parse_line(line: &str) -> Result<Option<SessionCommand>> {
    let words = shell_words::split(line)
        .map_err(|e| ToolkitError::UserError(format!("could not parse command: {}", e)))?;

    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "browse" => SessionCommand::Browse(PathBuf::from(one_arg(args, "browse <dir>")?)),
        "theme" => {
            let value = one_arg(args, "theme dark|light")?;
            let mode = ThemeMode::from_str(value).ok_or_else(|| {
                ToolkitError::UserError(format!(
                    "unknown theme '{}' (expected dark or light)",
                    value
                ))
            })?;
            SessionCommand::Theme(mode)
        }
        "logs" => {
            let value = one_arg(args, "logs on|off")?;
            let enabled = parse_switch(value).ok_or_else(|| {
                ToolkitError::UserError(format!("unknown switch '{}' (expected on or off)", value))
            })?;
            SessionCommand::Logs(enabled)
        }
        "import" => SessionCommand::Import(PathBuf::from(one_arg(args, "import <file>")?)),
        "export" => match args {
            [] => SessionCommand::Export(None),
            [file] => SessionCommand::Export(Some(PathBuf::from(file))),
            _ => return Err(usage("export [file]")),
        },
        "start" => no_args(args, "start", SessionCommand::Start)?,
        "reset" => no_args(args, "reset", SessionCommand::Reset)?,
        "status" => no_args(args, "status", SessionCommand::Status)?,
        "donate" => no_args(args, "donate", SessionCommand::Donate)?,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => {
            return Err(ToolkitError::UserError(format!(
                "unknown command '{}' (type 'help' for a list)",
                other
            )));
        }
    };

    Ok(Some(command))
}

fn one_arg<'a>(args: &'a [String], usage_line: &str) -> Result<&'a str> {
    match args {
        [value] => Ok(value.as_str()),
        _ => Err(usage(usage_line)),
    }
}

fn no_args(args: &[String], usage_line: &str, command: SessionCommand) -> Result<SessionCommand> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(usage(usage_line))
    }
}

fn usage(usage_line: &str) -> ToolkitError {
    ToolkitError::UserError(format!("usage: {}", usage_line))
}

/// Run a settings-changing command against `shell`, reporting to `out`.
///
/// `Quit` is handled by the session loop and does nothing here.
pub(crate) fn execute<W: Write>(
    shell: &mut AppShell,
    command: SessionCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        SessionCommand::Browse(path) => {
            shell.browse_folder(&path)?;
            writeln!(out, "Folder set to: {}", path.display()).map_err(write_failed)
        }
        SessionCommand::Theme(mode) => {
            shell.set_theme(mode)?;
            writeln!(out, "Appearance mode: {}", mode).map_err(write_failed)
        }
        SessionCommand::Logs(true) => {
            shell.toggle_logs(true)?;
            writeln!(
                out,
                "Logs will be saved in the selected folder under /logs directory."
            )
            .map_err(write_failed)
        }
        SessionCommand::Logs(false) => {
            shell.toggle_logs(false)?;
            writeln!(out, "Logs will no longer be saved.").map_err(write_failed)
        }
        SessionCommand::Start => {
            let count = shell.start_process()?;
            writeln!(
                out,
                "Processing finished: {} subtitle file(s) found.",
                count
            )
            .map_err(write_failed)
        }
        SessionCommand::Reset => {
            shell.reset_settings()?;
            writeln!(out, "All settings have been reset to default values.").map_err(write_failed)
        }
        SessionCommand::Import(file) => {
            let updated = shell.import_settings(&file)?;
            let written = if updated > 0 {
                writeln!(
                    out,
                    "Settings have been imported and applied successfully ({} key(s)).",
                    updated
                )
            } else {
                writeln!(out, "No settings were imported from {}.", file.display())
            };
            written.map_err(write_failed)
        }
        SessionCommand::Export(dest) => {
            let written = shell.export_settings(dest.as_deref())?;
            writeln!(out, "Settings exported to: {}", written.display()).map_err(write_failed)
        }
        SessionCommand::Status => write_settings(out, shell.settings(), shell.config_path()),
        SessionCommand::Donate => write_donate_info(out),
        SessionCommand::Help => writeln!(out, "{}", HELP).map_err(write_failed),
        SessionCommand::Quit => Ok(()),
    }
}

/// Drive a session from `input` until quit or end of input, then shut down.
pub(crate) fn run_session<R: BufRead, W: Write>(
    shell: &mut AppShell,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", title()).map_err(write_failed)?;
    writeln!(out, "Type 'help' for a list of commands.").map_err(write_failed)?;

    let mut line = String::new();
    loop {
        write!(out, "pst> ").map_err(write_failed)?;
        out.flush().map_err(write_failed)?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| ToolkitError::IoError(format!("failed to read input: {}", e)))?;
        if read == 0 {
            writeln!(out).map_err(write_failed)?;
            break;
        }

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(e) = execute(shell, command, out) {
                    writeln!(out, "Error: {}", e).map_err(write_failed)?;
                }
            }
            Err(e) => writeln!(out, "Error: {}", e).map_err(write_failed)?,
        }
    }

    shell.shutdown()?;
    writeln!(out, "Goodbye.").map_err(write_failed)
}

/// Start the interactive session on stdin/stdout.
pub fn cmd_run(ctx: &AppContext, timeout: Duration) -> Result<()> {
    let mut shell = AppShell::launch(ctx, timeout)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run_session(&mut shell, stdin.lock(), &mut stdout)
}
