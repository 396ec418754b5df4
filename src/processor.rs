//! The subtitle processing entry point.
//!
//! Processing itself is not implemented yet. A run lists the subtitle files
//! it would work on and records its start and finish in the activity log.

use crate::activity::{self, ActivityEntry};
use crate::config::Settings;
use crate::error::{Result, ToolkitError};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions treated as subtitles.
pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ass", "ssa", "vtt", "sub"];

/// Processor bound to one source folder.
#[derive(Debug, Clone)]
pub struct SubtitleProcessor {
    folder: PathBuf,
}

impl SubtitleProcessor {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Subtitle files directly inside the folder, sorted by name.
    pub fn subtitle_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.folder).map_err(|e| {
            ToolkitError::UserError(format!(
                "cannot read folder '{}': {}",
                self.folder.display(),
                e
            ))
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_subtitle(path))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Run the processor, returning the number of subtitle files found.
    pub fn run(&self, settings: &Settings) -> Result<usize> {
        let files = self.subtitle_files()?;
        debug!(folder = %self.folder.display(), count = files.len(), "processing started");

        activity::record(
            settings,
            ActivityEntry::new(format!("Processing started in: {}", self.folder.display()))
                .with_details(json!({ "subtitle_files": files.len() })),
        );
        activity::record(settings, ActivityEntry::new("Processing finished."));

        Ok(files.len())
    }
}

fn is_subtitle(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUBTITLE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
