use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::ManifestError;

//─────────────────────────────────────────────────────────────────────────────

/// The slice of a crate manifest this tool cares about: what the library is
/// called, which source file is its entry unit, and which dependencies are
/// bound by local filesystem path.
#[derive(Clone, Debug)]
pub struct Manifest {
    pub package_name: String,
    /// Library target name: `[lib] name` if given, else the package name
    /// with `-` mapped to `_`.  This is the prefix consumers import under.
    pub lib_name: String,
    /// Entry unit, resolved against the crate directory.
    pub entry_path: PathBuf,
    /// True when `[lib] path` retargeted the entry unit away from the
    /// default `src/lib.rs`.
    pub entry_overridden: bool,
    pub path_dependencies: Vec<PathDependency>,
}

/// A dependency declared by local filesystem path rather than registry
/// version; only these can be analyzed on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathDependency {
    pub name: String,
    /// Resolved against the declaring crate's directory.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    package: Option<RawPackage>,
    lib: Option<RawLib>,
    #[serde(default)]
    dependencies: BTreeMap<String, RawDependency>,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawLib {
    name: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDependency {
    Version(String),
    Detailed(RawDetailedDependency),
}

#[derive(Debug, Deserialize)]
struct RawDetailedDependency {
    path: Option<String>,
}

//─────────────────────────────────────────────────────────────────────────────

/// Loads and interprets `<crate_dir>/Cargo.toml`.
pub fn load_manifest(crate_dir: &Path) -> Result<Manifest, ManifestError> {
    let manifest_path = crate_dir.join("Cargo.toml");
    if !manifest_path.is_file() {
        return Err(ManifestError::NotFound(manifest_path.display().to_string()));
    }
    let source = fs::read_to_string(&manifest_path)
        .map_err(|e| ManifestError::ReadFile(manifest_path.display().to_string(), e))?;
    parse_manifest(&source, crate_dir)
}

/// Interprets manifest text for a crate rooted at `crate_dir`.
pub fn parse_manifest(source: &str, crate_dir: &Path) -> Result<Manifest, ManifestError> {
    let manifest_label = crate_dir.join("Cargo.toml").display().to_string();
    let raw: RawManifest =
        toml::from_str(source).map_err(|e| ManifestError::Parse(manifest_label.clone(), e))?;
    let package = raw
        .package
        .ok_or(ManifestError::MissingPackage(manifest_label))?;

    let lib = raw.lib.unwrap_or_default();
    let lib_name = lib
        .name
        .unwrap_or_else(|| package.name.replace('-', "_"));
    let (entry_relative, entry_overridden) = match lib.path {
        Some(path) => (path, true),
        None => ("src/lib.rs".to_string(), false),
    };

    let path_dependencies = raw
        .dependencies
        .into_iter()
        .filter_map(|(name, dependency)| match dependency {
            RawDependency::Detailed(detail) => detail.path.map(|path| PathDependency {
                name,
                path: crate_dir.join(path),
            }),
            RawDependency::Version(_) => None,
        })
        .collect();

    Ok(Manifest {
        package_name: package.name,
        lib_name,
        entry_path: crate_dir.join(entry_relative),
        entry_overridden,
        path_dependencies,
    })
}

//─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Manifest {
        parse_manifest(source, Path::new("/work/geometry")).expect("manifest should parse")
    }

    #[test]
    fn defaults_to_src_lib_rs_and_underscored_name() {
        let manifest = parse("[package]\nname = \"geometry-core\"\n");
        assert_eq!(manifest.package_name, "geometry-core");
        assert_eq!(manifest.lib_name, "geometry_core");
        assert_eq!(manifest.entry_path, Path::new("/work/geometry/src/lib.rs"));
        assert!(!manifest.entry_overridden);
        assert!(manifest.path_dependencies.is_empty());
    }

    #[test]
    fn lib_section_overrides_entry_unit_and_target_name() {
        let manifest = parse(
            "[package]\nname = \"geometry\"\n\n[lib]\nname = \"geo\"\npath = \"src/dims.rs\"\n",
        );
        assert_eq!(manifest.lib_name, "geo");
        assert_eq!(manifest.entry_path, Path::new("/work/geometry/src/dims.rs"));
        assert!(manifest.entry_overridden);
    }

    #[test]
    fn collects_path_dependencies_only() {
        let manifest = parse(
            "[package]\nname = \"triangles\"\n\n[dependencies]\n\
             geometry = { path = \"../geometry\" }\n\
             serde = \"1\"\n\
             clap = { version = \"4\", features = [\"derive\"] }\n",
        );
        assert_eq!(
            manifest.path_dependencies,
            vec![PathDependency {
                name: "geometry".to_string(),
                path: PathBuf::from("/work/geometry/../geometry"),
            }]
        );
    }

    #[test]
    fn missing_package_section_is_an_error() {
        let result = parse_manifest("[lib]\nname = \"geo\"\n", Path::new("/work/geometry"));
        assert!(matches!(result, Err(ManifestError::MissingPackage(_))));
    }

    #[test]
    fn load_reads_from_disk() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            tmp.path().join("Cargo.toml"),
            "[package]\nname = \"geometry\"\n",
        )
        .expect("write manifest");
        let manifest = load_manifest(tmp.path()).expect("load");
        assert_eq!(manifest.package_name, "geometry");

        let missing = load_manifest(&tmp.path().join("nope"));
        assert!(matches!(missing, Err(ManifestError::NotFound(_))));
    }
}
