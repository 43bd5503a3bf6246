//! Provides utility functions for file system operations critical to the application.
//!
//! This includes validating crate directories and initializing the buffered
//! writer for the surface report. It uses macros from the parent `app` module
//! for verbose logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Error as IoError};
use std::path::{Path, PathBuf};
// Use super:: for macros defined in app/mod.rs
use super::error::AppError;
use super::verbose_eprintln; // These macros write to the log file if the logger is initialized.

/// Validates that the given path is a crate directory this tool can analyze.
///
/// Checks that the path exists, is a directory, and contains a `Cargo.toml`.
///
/// # Arguments
/// * `crate_dir` - The crate directory to validate.
/// * `quiet_mode` - A boolean indicating whether to suppress verbose logging.
///
/// # Errors
/// Returns `AppError::InvalidCrateDir` if any of the checks fail.
pub fn validate_crate_dir(crate_dir: &PathBuf, quiet_mode: bool) -> Result<(), AppError> {
    if !crate_dir.exists() {
        let error_msg = format!("Directory not found: {}", crate_dir.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidCrateDir(error_msg));
    }
    if !crate_dir.is_dir() {
        let error_msg = format!("Path is not a directory: {}", crate_dir.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidCrateDir(error_msg));
    }
    if !crate_dir.join("Cargo.toml").is_file() {
        let error_msg = format!("No Cargo.toml in {}", crate_dir.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidCrateDir(error_msg));
    }
    Ok(())
}

/// Initializes and returns a `BufWriter<File>` for the surface report.
///
/// The file is created if it doesn't exist and truncated if it does, so each
/// run produces a fresh report. The caller is responsible for flushing the
/// writer once rendering is complete.
///
/// # Errors
/// Returns an `IoError` if the file cannot be opened or created.
pub fn init_report_writer(file_path: &Path) -> Result<BufWriter<File>, IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Overwrite the report each run.
        .open(file_path)?;
    Ok(BufWriter::new(file)) // Default buffer capacity.
}
