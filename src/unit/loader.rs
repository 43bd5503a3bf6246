use std::fmt;
use std::fs;
use std::path::Path;

use super::error::UnitError;
use super::scanner::{self, SourceUnit};

//─────────────────────────────────────────────────────────────────────────────

/// A `mod name;` declaration whose backing file could not be found.
///
/// This is deliberately not an error: the rest of the unit tree still loads,
/// and the resolver simply cannot see into the missing module.  Sibling files
/// that are never declared by any `mod` item are not loaded at all, which is
/// what makes items in them unreachable from the entry unit.
#[derive(Clone, Debug)]
pub struct LoadDiagnostic {
    /// Module path relative to the entry unit, e.g. `dims::inner`.
    pub module: String,
    /// The two file locations that were searched.
    pub candidates: [String; 2],
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "module `{}` has no backing file (looked for '{}' and '{}')",
            self.module, self.candidates[0], self.candidates[1]
        )
    }
}

/// Loads the full unit tree of a library, starting at its entry unit.
///
/// File-backed `mod name;` declarations are resolved to `<dir>/name.rs` or
/// `<dir>/name/mod.rs` and parsed recursively.  The entry unit's children are
/// searched next to the entry file itself, so retargeting the entry via the
/// manifest does not change how its declarations are evaluated.
pub fn load_unit_tree(entry_path: &Path) -> Result<(SourceUnit, Vec<LoadDiagnostic>), UnitError> {
    let mut root = parse_unit_file(entry_path)?;
    let dir = entry_path.parent().unwrap_or_else(|| Path::new("."));
    let mut diagnostics = Vec::new();
    attach_file_modules(&mut root, dir, "", &mut diagnostics)?;
    Ok((root, diagnostics))
}

fn parse_unit_file(path: &Path) -> Result<SourceUnit, UnitError> {
    let source = fs::read_to_string(path)
        .map_err(|e| UnitError::ReadFile(path.display().to_string(), e))?;
    scanner::parse_unit_source(&source)
        .map_err(|e| UnitError::ParseSource(path.display().to_string(), e))
}

/// Fills in the bodies of file-backed module declarations under `dir`.
///
/// Children of a module named `name` live under `<dir>/name/`, whether the
/// module body came from `name.rs`, `name/mod.rs` or an inline block.
fn attach_file_modules(
    unit: &mut SourceUnit,
    dir: &Path,
    prefix: &str,
    diagnostics: &mut Vec<LoadDiagnostic>,
) -> Result<(), UnitError> {
    for decl in &mut unit.units {
        let qualified = if prefix.is_empty() {
            decl.name.clone()
        } else {
            format!("{}::{}", prefix, decl.name)
        };
        let child_dir = dir.join(&decl.name);
        match &mut decl.body {
            Some(body) => attach_file_modules(body, &child_dir, &qualified, diagnostics)?,
            None => {
                let file_candidate = dir.join(format!("{}.rs", decl.name));
                let mod_candidate = child_dir.join("mod.rs");
                let chosen = if file_candidate.is_file() {
                    Some(file_candidate.clone())
                } else if mod_candidate.is_file() {
                    Some(mod_candidate.clone())
                } else {
                    None
                };
                match chosen {
                    Some(path) => {
                        let mut body = parse_unit_file(&path)?;
                        attach_file_modules(&mut body, &child_dir, &qualified, diagnostics)?;
                        decl.body = Some(body);
                    }
                    None => diagnostics.push(LoadDiagnostic {
                        module: qualified,
                        candidates: [
                            file_candidate.display().to_string(),
                            mod_candidate.display().to_string(),
                        ],
                    }),
                }
            }
        }
    }
    Ok(())
}

//─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, content).expect("write file");
    }

    #[test]
    fn loads_file_backed_modules_both_layouts() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        write(&src.join("lib.rs"), "pub mod dims;\npub mod shapes;\n");
        write(&src.join("dims.rs"), "pub enum Type { D2 }\n");
        write(&src.join("shapes/mod.rs"), "pub mod circle;\n");
        write(&src.join("shapes/circle.rs"), "pub struct Circle;\n");

        let (root, diagnostics) = load_unit_tree(&src.join("lib.rs")).expect("load");
        assert!(diagnostics.is_empty());
        let dims = root.units[0].body.as_ref().expect("dims body");
        assert_eq!(dims.items[0].name, "Type");
        let shapes = root.units[1].body.as_ref().expect("shapes body");
        let circle = shapes.units[0].body.as_ref().expect("circle body");
        assert_eq!(circle.items[0].name, "Circle");
    }

    #[test]
    fn missing_backing_file_is_a_diagnostic_not_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        write(&src.join("lib.rs"), "pub mod gone;\npub struct Kept;\n");

        let (root, diagnostics) = load_unit_tree(&src.join("lib.rs")).expect("load");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].module, "gone");
        assert!(root.units[0].body.is_none());
        assert_eq!(root.items[0].name, "Kept");
    }

    #[test]
    fn undeclared_sibling_files_are_never_loaded() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        write(&src.join("lib.rs"), "");
        write(&src.join("dims.rs"), "pub enum Type { D2 }\n");

        let (root, diagnostics) = load_unit_tree(&src.join("lib.rs")).expect("load");
        assert!(diagnostics.is_empty());
        assert!(root.items.is_empty());
        assert!(root.units.is_empty());
    }
}
