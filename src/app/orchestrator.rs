//! Main application orchestrator.
//!
//! Coordinates the entire surface analysis:
//! 1. Initializes logging.
//! 2. Validates the producer crate directory.
//! 3. Loads the producer's manifest and source units (honoring a `[lib]`
//!    path entry-unit override).
//! 4. Resolves the externally visible surface.
//! 5. Writes the surface report, the documentation-style view a consumer
//!    should cross-check before importing.
//! 6. If a consumer crate was given, checks its imports of the producer
//!    against the resolved surface and fails on unresolved references.
//!
//! Adheres to command-line arguments like `quiet_mode` for controlling verbosity.

use super::cli::Cli;
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing;
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.

/// Runs the main application logic based on parsed command-line arguments.
///
/// # Arguments
/// * `cli` - The `Cli` struct containing parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` if any unrecoverable error occurs, such as a missing
/// or malformed manifest, an unreadable entry unit, or — when a consumer
/// crate is checked — unresolved references to the producer. Unresolved
/// references are the consumer's failure, not the producer's: the producer
/// may well build and test cleanly on its own.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    // Initialize global logger if not in quiet mode. This setup is done once.
    if !quiet_mode {
        if let Err(e) = logger::init_global_logger("surface.log") {
            // If logger init fails, print to stderr directly. The application
            // continues, but verbose file logging will be unavailable.
            eprintln!(
                "Warning: Failed to initialize verbose logger (surface.log): {}. Verbose file logging will be unavailable.",
                e
            );
        } else {
            verbose_println!(quiet_mode, "Verbose logging initialized to surface.log");
            if let Err(e) = logger::flush_global_logger() {
                verbose_eprintln!(
                    quiet_mode,
                    "[WARNING] Failed to flush surface.log after initialization: {}",
                    e
                );
            }
        }
    }

    file_handler::validate_crate_dir(&cli.crate_dir, quiet_mode)?;

    verbose_println!(
        quiet_mode,
        "\n============================================================"
    );
    verbose_println!(
        quiet_mode,
        "Analyzing crate: {}",
        cli.crate_dir.display()
    );
    verbose_println!(
        quiet_mode,
        "============================================================"
    );

    let (manifest, library) = processing::load_library(&cli.crate_dir, quiet_mode)?;
    let surface = processing::resolve_library(&library, quiet_mode);
    processing::write_report(&surface, &manifest, &cli.report, quiet_mode)?;

    // Flush the verbose log once the producer-side stages are done.
    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!(
                "[WARNING] Failed to flush surface.log after surface resolution: {}",
                e
            );
        }
    }

    if let Some(consumer_dir) = &cli.consumer {
        file_handler::validate_crate_dir(consumer_dir, quiet_mode)?;
        let findings = processing::check_consumer(
            consumer_dir,
            &cli.crate_dir,
            &manifest,
            &surface,
            quiet_mode,
        )?;
        if !findings.is_empty() {
            // These mirror what the consumer's compile step would report.
            for finding in &findings {
                eprintln!("error: {}", finding);
            }
            eprintln!(
                "note: see {} for the names `{}` actually exposes",
                cli.report.display(),
                library.name
            );
            if !quiet_mode {
                if let Err(e) = logger::flush_global_logger() {
                    eprintln!(
                        "[WARNING] Failed to perform final flush of surface.log on error: {}",
                        e
                    );
                }
            }
            return Err(AppError::UnresolvedReferences {
                crate_name: library.name,
                count: findings.len(),
            });
        }
    }

    // Final flush of surface.log before exiting successfully.
    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!(
                "[WARNING] Failed to perform final flush of surface.log: {}",
                e
            );
        }
    }

    if quiet_mode {
        println!("Done.");
    } else {
        println!(
            "\nSurface analysis finished. See '{}' for the visible surface and 'surface.log' for verbose output.",
            cli.report.display()
        );
    }

    Ok(())
}
