// resolver.rs
// ──────────────────────────────────────────────────────────────────────────────
// Compute a library's visibility surface from its loaded entry unit tree.
//
// The governing rules:
//   1. A public item declared in the entry unit is visible at `crate::item`.
//   2. A public nested unit exposes its public items only under its own
//      qualified path; a private nested unit exposes nothing this way.
//   3. A public re-export promotes names to the re-exporting unit's own
//      path, flattened, regardless of the target unit's visibility.
//   4. An empty entry unit yields an empty surface; undeclared sibling files
//      were never loaded, so their items cannot appear.
//   5. Which physical file serves as the entry unit is the loader's concern;
//      the resolver only ever sees "the entry unit".
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::BTreeMap;

use super::error::ResolveDiagnostic;
use super::surface::Surface;
use crate::unit::{ItemKind, ReExport, ReExportLeaf, SourceUnit};

/// A library prepared for resolution: its target name plus the fully loaded
/// entry unit tree.
#[derive(Debug)]
pub struct Library {
    pub name: String,
    pub entry: SourceUnit,
}

// Caps both module-walk depth and re-export chains.  Real trees stay far
// below this; hitting it means a re-export cycle.
const RECURSION_LIMIT: usize = 64;

/// `SurfaceResolver` computes the flat visible-name set of a `Library`.
pub struct SurfaceResolver;

impl SurfaceResolver {
    /// Resolves the library's surface.  Diagnostics are non-fatal findings
    /// (unresolvable re-export paths, names the target does not export).
    pub fn resolve(library: &Library) -> (Surface, Vec<ResolveDiagnostic>) {
        let mut walker = Walker {
            root: &library.entry,
            surface: Surface::new(&library.name),
            diagnostics: Vec::new(),
        };
        walker.walk(&library.entry, &[], 0);
        (walker.surface, walker.diagnostics)
    }
}

/// What a name inside a unit resolves to.
#[derive(Clone, Copy)]
enum Resolved<'a> {
    Item(ItemKind),
    /// A module with a loaded body: its contents surface under the new path.
    Module(&'a SourceUnit),
    /// A module whose body could not be loaded; only the name is known.
    OpaqueModule,
}

struct Walker<'a> {
    root: &'a SourceUnit,
    surface: Surface,
    diagnostics: Vec<ResolveDiagnostic>,
}

impl<'a> Walker<'a> {
    /// Surfaces everything externally visible in `unit`, mounted at `path`.
    /// Units that are not externally visible are never walked: nothing under
    /// them can surface except through a re-export, and re-exports resolve
    /// their targets independently of unit visibility.
    fn walk(&mut self, unit: &'a SourceUnit, path: &[String], depth: usize) {
        if depth > RECURSION_LIMIT {
            self.diagnostics.push(ResolveDiagnostic::RecursionLimit {
                at: self.label(path),
            });
            return;
        }
        for item in &unit.items {
            if item.is_public {
                self.surface.insert(child_path(path, &item.name), item.kind);
            }
        }
        for decl in &unit.units {
            if !decl.is_public {
                continue;
            }
            let child = child_path(path, &decl.name);
            self.surface.insert(child.clone(), ItemKind::Module);
            if let Some(body) = &decl.body {
                self.walk(body, &child, depth + 1);
            }
        }
        for reexport in &unit.reexports {
            if reexport.is_public {
                self.apply_reexport(unit, reexport, path, depth);
            }
        }
    }

    fn apply_reexport(
        &mut self,
        unit: &'a SourceUnit,
        reexport: &'a ReExport,
        path: &[String],
        depth: usize,
    ) {
        let target = match resolve_unit_path(self.root, unit, &reexport.path) {
            Some(target) => target,
            None => {
                self.diagnostics.push(ResolveDiagnostic::UnresolvedPath {
                    at: self.label(path),
                    path: reexport.path.join("::"),
                });
                return;
            }
        };
        match &reexport.leaf {
            ReExportLeaf::Name { name, rename } => {
                // `pub use self::dims;` may legitimately promote a private
                // sibling declaration, so a prefix-less re-export looks at
                // everything in scope, not just the unit's own exports.
                let resolved = if reexport.path.is_empty() {
                    lookup_local(unit, name)
                } else {
                    exported_names(self.root, target, 0).remove(name)
                };
                let exported = rename.as_deref().unwrap_or(name.as_str());
                match resolved {
                    Some(resolved) => self.mount(resolved, child_path(path, exported), depth),
                    None => self.diagnostics.push(ResolveDiagnostic::NameNotExported {
                        at: self.label(path),
                        target: if reexport.path.is_empty() {
                            "self".to_string()
                        } else {
                            reexport.path.join("::")
                        },
                        name: name.clone(),
                    }),
                }
            }
            ReExportLeaf::Glob => {
                for (name, resolved) in exported_names(self.root, target, 0) {
                    self.mount(resolved, child_path(path, &name), depth);
                }
            }
        }
    }

    /// Inserts a resolved name at `mount_path`; re-exported modules surface
    /// their whole contents under the new path as well.
    fn mount(&mut self, resolved: Resolved<'a>, mount_path: Vec<String>, depth: usize) {
        match resolved {
            Resolved::Item(kind) => self.surface.insert(mount_path, kind),
            Resolved::Module(body) => {
                self.surface.insert(mount_path.clone(), ItemKind::Module);
                self.walk(body, &mount_path, depth + 1);
            }
            Resolved::OpaqueModule => self.surface.insert(mount_path, ItemKind::Module),
        }
    }

    fn label(&self, path: &[String]) -> String {
        self.surface.qualified(path)
    }
}

fn child_path(path: &[String], name: &str) -> Vec<String> {
    let mut child = path.to_vec();
    child.push(name.to_string());
    child
}

/// Follows `segments` to a nested unit.  An empty path stays at `from`; a
/// leading `crate` restarts at the entry unit.  Unit visibility is ignored
/// here: a re-export may reach through private modules.
fn resolve_unit_path<'a>(
    root: &'a SourceUnit,
    from: &'a SourceUnit,
    segments: &[String],
) -> Option<&'a SourceUnit> {
    let (mut current, rest) = match segments.first().map(String::as_str) {
        None => return Some(from),
        Some("crate") => (root, &segments[1..]),
        Some(_) => (from, segments),
    };
    for segment in rest {
        let decl = current.units.iter().find(|u| &u.name == segment)?;
        current = decl.body.as_ref()?;
    }
    Some(current)
}

/// A name in scope inside `unit`, visibility ignored (for prefix-less
/// re-exports of the unit's own declarations).
fn lookup_local<'a>(unit: &'a SourceUnit, name: &str) -> Option<Resolved<'a>> {
    if let Some(item) = unit.items.iter().find(|i| i.name == name) {
        return Some(Resolved::Item(item.kind));
    }
    unit.units.iter().find(|u| u.name == name).map(|decl| {
        decl.body
            .as_ref()
            .map(Resolved::Module)
            .unwrap_or(Resolved::OpaqueModule)
    })
}

/// Everything `unit` exports at its own level: public items, public child
/// units, and names promoted by its own public re-exports (chains followed
/// up to the recursion limit, which also breaks re-export cycles).
fn exported_names<'a>(
    root: &'a SourceUnit,
    unit: &'a SourceUnit,
    depth: usize,
) -> BTreeMap<String, Resolved<'a>> {
    let mut exports = BTreeMap::new();
    if depth > RECURSION_LIMIT {
        return exports;
    }
    for item in &unit.items {
        if item.is_public {
            exports.insert(item.name.clone(), Resolved::Item(item.kind));
        }
    }
    for decl in &unit.units {
        if decl.is_public {
            let resolved = decl
                .body
                .as_ref()
                .map(Resolved::Module)
                .unwrap_or(Resolved::OpaqueModule);
            exports.insert(decl.name.clone(), resolved);
        }
    }
    for reexport in &unit.reexports {
        if !reexport.is_public {
            continue;
        }
        let target = match resolve_unit_path(root, unit, &reexport.path) {
            Some(target) => target,
            None => continue,
        };
        match &reexport.leaf {
            ReExportLeaf::Name { name, rename } => {
                let resolved = if reexport.path.is_empty() {
                    lookup_local(unit, name)
                } else {
                    exported_names(root, target, depth + 1).remove(name)
                };
                if let Some(resolved) = resolved {
                    exports.insert(rename.as_deref().unwrap_or(name.as_str()).to_string(), resolved);
                }
            }
            ReExportLeaf::Glob => {
                for (name, resolved) in exported_names(root, target, depth + 1) {
                    // Glob-imported names never shadow explicit declarations.
                    exports.entry(name).or_insert(resolved);
                }
            }
        }
    }
    exports
}

//─────────────────────────────────────────────────────────────────────────────
