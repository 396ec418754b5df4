//! Implementation of `pst config`.
//!
//! `show` only reads the settings file. Every other action runs inside a
//! command session, so it holds the instance lock for its duration and is
//! refused while an interactive session is running.

use crate::activity::activity_file_path;
use crate::app::AppShell;
use crate::cli::{ConfigAction, ConfigCommand};
use crate::config::{ConfigStore, Settings};
use crate::context::AppContext;
use crate::error::Result;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use super::run::{SessionCommand, execute};
use super::write_failed;

/// Print `settings` in the same layout as the session `status` command.
pub(crate) fn write_settings<W: Write>(
    out: &mut W,
    settings: &Settings,
    path: &Path,
) -> Result<()> {
    let folder = settings
        .folder()
        .map(|f| f.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    writeln!(out, "Settings file: {}", path.display()).map_err(write_failed)?;
    writeln!(out, "  Folder:     {}", folder).map_err(write_failed)?;
    writeln!(out, "  Theme:      {}", settings.theme_mode).map_err(write_failed)?;
    writeln!(
        out,
        "  Save logs:  {}",
        if settings.save_logs { "on" } else { "off" }
    )
    .map_err(write_failed)?;

    if settings.save_logs
        && let Some(folder) = settings.folder()
    {
        writeln!(out, "  Log file:   {}", activity_file_path(folder).display())
            .map_err(write_failed)?;
    }
    Ok(())
}

pub fn cmd_config(ctx: &AppContext, timeout: Duration, cmd: ConfigCommand) -> Result<()> {
    let mut stdout = io::stdout().lock();

    let command = match cmd.action {
        ConfigAction::Show => {
            let store = ConfigStore::new(ctx.config_path());
            let settings = store.load()?;
            return write_settings(&mut stdout, &settings, store.path());
        }
        ConfigAction::Reset => SessionCommand::Reset,
        ConfigAction::Folder(args) => SessionCommand::Browse(args.path),
        ConfigAction::Theme(args) => SessionCommand::Theme(args.mode),
        ConfigAction::Logs(args) => SessionCommand::Logs(args.state),
        ConfigAction::Import(args) => SessionCommand::Import(args.file),
        ConfigAction::Export(args) => SessionCommand::Export(args.output),
    };

    let mut shell = AppShell::attach(ctx, timeout)?;
    execute(&mut shell, command, &mut stdout)?;
    shell.shutdown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_info::APP_NAME;
    use crate::cli::{ExportArgs, FolderArgs, ImportArgs, LogsArgs, ThemeArgs};
    use crate::config::ThemeMode;
    use crate::error::ToolkitError;
    use crate::exit_codes;
    use crate::test_support::TestHome;
    use serde_json::json;
    use std::fs;

    const TIMEOUT: Duration = Duration::from_secs(60);

    fn config(home: &TestHome, action: ConfigAction) -> Result<()> {
        cmd_config(&home.ctx, TIMEOUT, ConfigCommand { action })
    }

    fn stored(home: &TestHome) -> Settings {
        ConfigStore::new(home.ctx.config_path()).load().unwrap()
    }

    #[test]
    fn write_settings_layout() {
        let home = TestHome::new();
        let folder = home.folder("subs");
        let mut settings = Settings::default();
        settings.select_folder(&folder);
        settings.set_save_logs(true).unwrap();

        let mut out = Vec::new();
        write_settings(&mut out, &settings, Path::new("/data/config.json")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Settings file: /data/config.json\n"));
        assert!(text.contains("  Theme:      dark\n"));
        assert!(text.contains("  Save logs:  on\n"));
        assert!(text.contains("activity.ndjson"));
    }

    #[test]
    fn write_settings_without_folder() {
        let mut out = Vec::new();
        write_settings(&mut out, &Settings::default(), Path::new("config.json")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("  Folder:     (none)\n"));
        assert!(!text.contains("Log file"));
    }

    #[test]
    fn show_does_not_take_lock() {
        let home = TestHome::new();
        let _session = AppShell::launch(&home.ctx, TIMEOUT).unwrap();

        config(&home, ConfigAction::Show).unwrap();
    }

    #[test]
    fn mutating_commands_persist() {
        let home = TestHome::new();
        let folder = home.folder("subs");

        config(&home, ConfigAction::Folder(FolderArgs { path: folder.clone() })).unwrap();
        config(
            &home,
            ConfigAction::Theme(ThemeArgs {
                mode: ThemeMode::Light,
            }),
        )
        .unwrap();
        config(&home, ConfigAction::Logs(LogsArgs { state: true })).unwrap();

        let settings = stored(&home);
        assert_eq!(settings.folder(), Some(folder.as_path()));
        assert_eq!(settings.theme_mode, ThemeMode::Light);
        assert!(settings.save_logs);
        assert!(!home.ctx.lock_path().exists());
    }

    #[test]
    fn mutating_commands_refused_during_session() {
        let home = TestHome::new();
        let _session = AppShell::launch(&home.ctx, TIMEOUT).unwrap();

        let err = config(&home, ConfigAction::Reset).unwrap_err();

        assert!(matches!(err, ToolkitError::AlreadyRunning(_)));
        assert_eq!(err.exit_code(), exit_codes::ALREADY_RUNNING);
    }

    #[test]
    fn logs_without_folder_is_user_error_and_releases_lock() {
        let home = TestHome::new();

        let err = config(&home, ConfigAction::Logs(LogsArgs { state: true })).unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(!home.ctx.lock_path().exists());
    }

    #[test]
    fn reset_restores_defaults() {
        let home = TestHome::new();
        config(
            &home,
            ConfigAction::Theme(ThemeArgs {
                mode: ThemeMode::Light,
            }),
        )
        .unwrap();

        config(&home, ConfigAction::Reset).unwrap();

        assert_eq!(stored(&home), Settings::default());
    }

    #[test]
    fn import_then_export() {
        let home = TestHome::new();
        let import = home.dir.path().join("in.json");
        let export = home.dir.path().join("out.json");
        fs::write(
            &import,
            json!({"app_name": APP_NAME, "theme_mode": 0, "save_logs": 0}).to_string(),
        )
        .unwrap();

        config(&home, ConfigAction::Import(ImportArgs { file: import })).unwrap();
        config(
            &home,
            ConfigAction::Export(ExportArgs {
                output: Some(export.clone()),
            }),
        )
        .unwrap();

        let exported = Settings::from_json(&fs::read_to_string(&export).unwrap()).unwrap();
        assert_eq!(exported.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn import_from_other_app_is_config_error() {
        let home = TestHome::new();
        let import = home.dir.path().join("in.json");
        fs::write(&import, json!({"app_name": "Other"}).to_string()).unwrap();

        let err = config(&home, ConfigAction::Import(ImportArgs { file: import })).unwrap_err();

        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }
}
