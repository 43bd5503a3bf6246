use std::fmt;

use crate::resolve::Surface;
use crate::unit::{ReExport, ReExportLeaf, SourceUnit};

//─────────────────────────────────────────────────────────────────────────────

/// A consumer reference that does not resolve against the producer's surface.
///
/// This is the one externally observable failure class: the consumer's
/// compile step would reject the import even though the producer builds and
/// tests cleanly on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameNotFound {
    /// The path as the consumer wrote it, e.g. `geometry::dims::Type`.
    pub path: String,
    /// The crate the name was expected in.
    pub crate_name: String,
}

impl fmt::Display for NameNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot find `{}` in crate `{}`",
            self.path, self.crate_name
        )
    }
}

/// `ReferenceChecker` validates a consumer's imports of one producer crate
/// against that producer's resolved surface.
pub struct ReferenceChecker;

impl ReferenceChecker {
    /// Checks every `use` declaration in the consumer's unit tree whose
    /// leading segment names the producer crate.  Inline modules are walked
    /// too: `#[cfg(test)]` test modules are where consumption often starts.
    pub fn check(consumer: &SourceUnit, surface: &Surface) -> Vec<NameNotFound> {
        let mut findings = Vec::new();
        Self::check_unit(consumer, surface, &mut findings);
        findings
    }

    fn check_unit(unit: &SourceUnit, surface: &Surface, findings: &mut Vec<NameNotFound>) {
        for reexport in &unit.reexports {
            Self::check_reexport(reexport, surface, findings);
        }
        for decl in &unit.units {
            if let Some(body) = &decl.body {
                Self::check_unit(body, surface, findings);
            }
        }
    }

    fn check_reexport(reexport: &ReExport, surface: &Surface, findings: &mut Vec<NameNotFound>) {
        let crate_name = surface.crate_name();
        if reexport.path.first().map(String::as_str) != Some(crate_name) {
            return;
        }
        let rest = &reexport.path[1..];
        match &reexport.leaf {
            ReExportLeaf::Name { name, .. } => {
                let mut segments: Vec<String> = rest.to_vec();
                segments.push(name.clone());
                if !surface.contains(&segments) {
                    findings.push(NameNotFound {
                        path: surface.qualified(&segments),
                        crate_name: crate_name.to_string(),
                    });
                }
            }
            ReExportLeaf::Glob => {
                if !surface.is_module_path(rest) {
                    findings.push(NameNotFound {
                        path: format!("{}::*", surface.qualified(rest)),
                        crate_name: crate_name.to_string(),
                    });
                }
            }
        }
    }
}

//─────────────────────────────────────────────────────────────────────────────
