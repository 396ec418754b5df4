//! Filesystem utilities for pst.
//!
//! Settings files are replaced atomically so a crash mid-save never leaves a
//! truncated `config.json` behind.

pub mod atomic;

pub use atomic::atomic_write_file;
