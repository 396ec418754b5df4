//! Settings for pst.
//!
//! This module defines the [`Settings`] struct persisted as `config.json` in
//! the application data directory, the rules tying the log switch to the
//! selected folder, and the [`ConfigStore`] that loads, saves, imports and
//! exports it. Files are JSON with four-space indentation; unknown keys are
//! ignored and missing keys take defaults.

mod model;
mod operations;
mod store;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Settings;
pub use store::{ConfigStore, ImportReport, default_export_filename};
pub use types::{ThemeMode, parse_switch};
