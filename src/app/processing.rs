//! Handles the core stages of a surface analysis run.
//!
//! This module loads a crate's manifest and source units, resolves the
//! externally visible surface, renders the surface report, and checks a
//! consumer crate's imports against the producer's surface.

use super::error::AppError;
use super::file_handler;
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.
use crate::consumer::{NameNotFound, ReferenceChecker};
use crate::manifest::{self, Manifest};
use crate::report::SurfaceRenderer;
use crate::resolve::{Library, Surface, SurfaceResolver};
use crate::unit;
use std::io::Write; // For BufWriter::flush
use std::path::Path;

/// Loads a library crate: manifest first, then the full unit tree rooted at
/// whichever source file the manifest designates as the entry unit.
///
/// # Arguments
/// * `crate_dir` - Directory of the crate (already validated).
/// * `quiet_mode` - Suppresses verbose logging if true.
///
/// # Errors
/// Returns `AppError` if the manifest is missing or malformed, or if the
/// entry unit cannot be read or parsed. Missing backing files for declared
/// modules are logged as warnings, not errors.
pub fn load_library(crate_dir: &Path, quiet_mode: bool) -> Result<(Manifest, Library), AppError> {
    verbose_println!(quiet_mode, "\n[STEP 1] Reading crate manifest...");
    let manifest = manifest::load_manifest(crate_dir)?;
    verbose_println!(
        quiet_mode,
        "   => Package `{}`, library target `{}`.",
        manifest.package_name,
        manifest.lib_name
    );
    if manifest.entry_overridden {
        verbose_println!(
            quiet_mode,
            "   => Entry unit retargeted by [lib] path: {}",
            manifest.entry_path.display()
        );
    }

    verbose_println!(
        quiet_mode,
        "\n[STEP 2] Loading source units from {}...",
        manifest.entry_path.display()
    );
    let (entry, load_diagnostics) = unit::load_unit_tree(&manifest.entry_path)?;
    for diagnostic in &load_diagnostics {
        verbose_eprintln!(quiet_mode, "   [WARNING] {}", diagnostic);
    }
    verbose_println!(
        quiet_mode,
        "   => Loaded entry unit with {} item(s), {} nested unit(s), {} use declaration(s).",
        entry.items.len(),
        entry.units.len(),
        entry.reexports.len()
    );

    let library = Library {
        name: manifest.lib_name.clone(),
        entry,
    };
    Ok((manifest, library))
}

/// Resolves the library's visibility surface and logs resolution warnings.
pub fn resolve_library(library: &Library, quiet_mode: bool) -> Surface {
    verbose_println!(quiet_mode, "\n[STEP 3] Resolving visibility surface...");
    let (surface, diagnostics) = SurfaceResolver::resolve(library);
    for diagnostic in &diagnostics {
        verbose_eprintln!(quiet_mode, "   [WARNING] {}", diagnostic);
    }
    verbose_println!(
        quiet_mode,
        "   => {} externally visible name(s).",
        surface.len()
    );
    surface
}

/// Renders the surface report to `report_path`.
///
/// The report is the documentation-style view of the surface: the definitive
/// listing of what a consumer will be able to reference.
pub fn write_report(
    surface: &Surface,
    manifest: &Manifest,
    report_path: &Path,
    quiet_mode: bool,
) -> Result<(), AppError> {
    verbose_println!(quiet_mode, "\n[STEP 4] Rendering surface report...");
    let mut writer = file_handler::init_report_writer(report_path).map_err(AppError::Io)?;
    SurfaceRenderer::render_to_writer(
        surface,
        &manifest.entry_path.display().to_string(),
        &mut writer,
    )?;
    writer.flush()?;
    verbose_println!(
        quiet_mode,
        "   => Report written to {}.",
        report_path.display()
    );
    Ok(())
}

/// Checks a consumer crate's imports against the producer's surface.
///
/// Loads the consumer's manifest and unit tree, confirms (as a warning-level
/// check) that the consumer actually declares a path dependency on the
/// producer, and returns one `NameNotFound` per import the producer's
/// surface cannot satisfy. The producer building cleanly on its own says
/// nothing about these findings.
pub fn check_consumer(
    consumer_dir: &Path,
    producer_dir: &Path,
    producer_manifest: &Manifest,
    surface: &Surface,
    quiet_mode: bool,
) -> Result<Vec<NameNotFound>, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 5] Checking consumer references...");
    let consumer_manifest = manifest::load_manifest(consumer_dir)?;

    match consumer_manifest
        .path_dependencies
        .iter()
        .find(|dependency| dependency.name == producer_manifest.package_name)
    {
        Some(dependency) => {
            verbose_println!(
                quiet_mode,
                "   => `{}` declares a path dependency on `{}` ({}).",
                consumer_manifest.package_name,
                producer_manifest.package_name,
                dependency.path.display()
            );
            // Best-effort check that the declared path is the crate we analyzed.
            if let (Ok(declared), Ok(analyzed)) = (
                dependency.path.canonicalize(),
                producer_dir.canonicalize(),
            ) {
                if declared != analyzed {
                    verbose_eprintln!(
                        quiet_mode,
                        "   [WARNING] Path dependency `{}` points at {}, not the analyzed crate.",
                        dependency.name,
                        declared.display()
                    );
                }
            }
        }
        None => {
            verbose_eprintln!(
                quiet_mode,
                "   [WARNING] `{}` declares no path dependency on `{}`; checking imports anyway.",
                consumer_manifest.package_name,
                producer_manifest.package_name
            );
        }
    }

    // A consumer may be a binary crate; fall back to src/main.rs when the
    // default library entry is absent.
    let mut entry_path = consumer_manifest.entry_path.clone();
    if !entry_path.is_file() && !consumer_manifest.entry_overridden {
        entry_path = consumer_dir.join("src/main.rs");
    }
    let (consumer_entry, load_diagnostics) = unit::load_unit_tree(&entry_path)?;
    for diagnostic in &load_diagnostics {
        verbose_eprintln!(quiet_mode, "   [WARNING] {}", diagnostic);
    }

    let findings = ReferenceChecker::check(&consumer_entry, surface);
    verbose_println!(
        quiet_mode,
        "   => {} unresolved reference(s) to `{}`.",
        findings.len(),
        surface.crate_name()
    );
    Ok(findings)
}

//─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const DIMS_SOURCE: &str =
        "/// Supported dimensions.\npub enum Type { D1, D2, D3 }\n\npub trait Dimensional { fn dimensions(&self) -> Type; }\n";

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, content).expect("write file");
    }

    fn make_crate(root: &Path, name: &str, manifest_extra: &str) -> PathBuf {
        let dir = root.join(name);
        write(
            &dir.join("Cargo.toml"),
            &format!("[package]\nname = \"{}\"\n{}", name, manifest_extra),
        );
        dir
    }

    fn make_consumer(root: &Path, producer: &str) -> PathBuf {
        let dir = make_crate(
            root,
            "triangles",
            &format!(
                "\n[dependencies]\n{} = {{ path = \"../{}\" }}\n",
                producer, producer
            ),
        );
        write(
            &dir.join("src/lib.rs"),
            "#[cfg(test)]\n\
             mod triangles {\n\
                 use geometry::dims::{Type, Dimensional};\n\
                 struct Triangle {}\n\
                 impl Dimensional for Triangle {\n\
                     fn dimensions(&self) -> Type { Type::D2 }\n\
                 }\n\
             }\n",
        );
        dir
    }

    #[test]
    fn reexporting_producer_satisfies_consumer() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let producer = make_crate(tmp.path(), "geometry", "");
        write(
            &producer.join("src/lib.rs"),
            "pub mod dims;\npub use dims::{Type, Dimensional};\n",
        );
        write(&producer.join("src/dims.rs"), DIMS_SOURCE);
        let consumer = make_consumer(tmp.path(), "geometry");

        let (manifest, library) = load_library(&producer, true).expect("load");
        let surface = resolve_library(&library, true);
        assert!(surface.contains(&["Type".to_string()]));
        assert!(surface.contains(&["dims".to_string(), "Type".to_string()]));

        let findings =
            check_consumer(&consumer, &producer, &manifest, &surface, true).expect("check");
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn empty_entry_unit_fails_consumer_even_though_sibling_file_exists() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let producer = make_crate(tmp.path(), "geometry", "");
        // dims.rs compiles fine on its own, but nothing declares it.
        write(&producer.join("src/lib.rs"), "");
        write(&producer.join("src/dims.rs"), DIMS_SOURCE);
        let consumer = make_consumer(tmp.path(), "geometry");

        let (manifest, library) = load_library(&producer, true).expect("load");
        let surface = resolve_library(&library, true);
        assert!(surface.is_empty());

        let findings =
            check_consumer(&consumer, &producer, &manifest, &surface, true).expect("check");
        let paths: Vec<&str> = findings.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["geometry::dims::Type", "geometry::dims::Dimensional"]
        );
    }

    #[test]
    fn retargeting_the_entry_unit_leaves_the_surface_unchanged() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let entry_source = "pub mod dims;\npub use dims::{Type, Dimensional};\n";

        let default_entry = make_crate(tmp.path(), "geometry", "");
        write(&default_entry.join("src/lib.rs"), entry_source);
        write(&default_entry.join("src/dims.rs"), DIMS_SOURCE);

        // Same declarations, entry unit retargeted via [lib] path.
        let retargeted = make_crate(
            tmp.path(),
            "geometry2",
            "\n[lib]\nname = \"geometry\"\npath = \"src/geom.rs\"\n",
        );
        write(&retargeted.join("src/geom.rs"), entry_source);
        write(&retargeted.join("src/dims.rs"), DIMS_SOURCE);

        let (_, default_library) = load_library(&default_entry, true).expect("load default");
        let (manifest, retargeted_library) = load_library(&retargeted, true).expect("load override");
        assert!(manifest.entry_overridden);

        let default_surface = resolve_library(&default_library, true);
        let retargeted_surface = resolve_library(&retargeted_library, true);
        assert_eq!(default_surface, retargeted_surface);
    }

    #[test]
    fn report_is_written_to_the_requested_path() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let producer = make_crate(tmp.path(), "geometry", "");
        write(&producer.join("src/lib.rs"), "pub struct Point;\n");

        let (manifest, library) = load_library(&producer, true).expect("load");
        let surface = resolve_library(&library, true);
        let report_path = tmp.path().join("surface_report.txt");
        write_report(&surface, &manifest, &report_path, true).expect("write report");

        let rendered = fs::read_to_string(&report_path).expect("read report");
        assert!(rendered.contains("=== VISIBLE SURFACE: geometry ==="));
        assert!(rendered.contains("pub struct geometry::Point"));
    }
}
