// scanner.rs
// ──────────────────────────────────────────────────────────────────────────────
// Scan a parsed Rust source file (syn 2.x) into the flat declaration model
// the visibility resolver works on.  Every item declaration becomes an
// `ItemDecl`, every `mod` becomes a `UnitDecl` (inline bodies are scanned
// recursively, file-backed bodies are left for the loader), and every `use`
// tree is flattened into one `ReExport` per imported leaf.
// ──────────────────────────────────────────────────────────────────────────────
use syn::{Item, UseTree, Visibility};

/// Kind of a declaration that can appear on a library's visible surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemKind {
    Struct,
    Enum,
    Trait,
    Function,
    TypeAlias,
    Const,
    Static,
    Union,
    Module,
}

impl ItemKind {
    /// Short keyword-style label used by the surface report.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Struct => "struct",
            ItemKind::Enum => "enum",
            ItemKind::Trait => "trait",
            ItemKind::Function => "fn",
            ItemKind::TypeAlias => "type",
            ItemKind::Const => "const",
            ItemKind::Static => "static",
            ItemKind::Union => "union",
            ItemKind::Module => "mod",
        }
    }
}

/// A container of declarations: one parsed source file or one inline module.
#[derive(Clone, Debug, Default)]
pub struct SourceUnit {
    pub items: Vec<ItemDecl>,
    pub units: Vec<UnitDecl>,
    pub reexports: Vec<ReExport>,
}

/// A single item declaration (type, enumeration, behavior contract, ...).
#[derive(Clone, Debug)]
pub struct ItemDecl {
    pub name: String,
    pub kind: ItemKind,
    pub is_public: bool,
}

/// A nested-unit declaration.  `body` is `Some` for inline modules and is
/// filled in by the loader for file-backed ones; it stays `None` when the
/// backing file cannot be found.
#[derive(Clone, Debug)]
pub struct UnitDecl {
    pub name: String,
    pub is_public: bool,
    pub body: Option<SourceUnit>,
}

/// One flattened `use` leaf.  `path` holds the segments before the leaf with
/// a leading `self::` already stripped; a leading `crate` segment is kept and
/// interpreted by the resolver.
#[derive(Clone, Debug)]
pub struct ReExport {
    pub is_public: bool,
    pub path: Vec<String>,
    pub leaf: ReExportLeaf,
}

#[derive(Clone, Debug)]
pub enum ReExportLeaf {
    /// `use p::Name` or `use p::Name as Other`.
    Name { name: String, rename: Option<String> },
    /// `use p::*`.
    Glob,
}

//─────────────────────────────────────────────────────────────────────────────

/// Parses Rust source text into a `SourceUnit`.
///
/// Inline modules are scanned recursively; `mod name;` declarations are
/// recorded with an empty body for the loader to fill in.
pub fn parse_unit_source(source: &str) -> Result<SourceUnit, syn::Error> {
    let file = syn::parse_file(source)?;
    Ok(scan_items(&file.items))
}

fn scan_items(items: &[Item]) -> SourceUnit {
    let mut unit = SourceUnit::default();
    for item in items {
        match item {
            Item::Struct(i) => unit.push_item(&i.ident, ItemKind::Struct, &i.vis),
            Item::Enum(i) => unit.push_item(&i.ident, ItemKind::Enum, &i.vis),
            Item::Trait(i) => unit.push_item(&i.ident, ItemKind::Trait, &i.vis),
            Item::Fn(i) => unit.push_item(&i.sig.ident, ItemKind::Function, &i.vis),
            Item::Type(i) => unit.push_item(&i.ident, ItemKind::TypeAlias, &i.vis),
            Item::Const(i) => unit.push_item(&i.ident, ItemKind::Const, &i.vis),
            Item::Static(i) => unit.push_item(&i.ident, ItemKind::Static, &i.vis),
            Item::Union(i) => unit.push_item(&i.ident, ItemKind::Union, &i.vis),
            Item::Mod(m) => {
                unit.units.push(UnitDecl {
                    name: m.ident.to_string(),
                    is_public: is_public(&m.vis),
                    body: m.content.as_ref().map(|(_, items)| scan_items(items)),
                });
            }
            Item::Use(u) => {
                flatten_use_tree(&u.tree, Vec::new(), is_public(&u.vis), &mut unit.reexports);
            }
            // Impls, macro invocations and foreign blocks declare no names an
            // external consumer can import directly.
            _ => {}
        }
    }
    unit
}

impl SourceUnit {
    fn push_item(&mut self, ident: &syn::Ident, kind: ItemKind, vis: &Visibility) {
        self.items.push(ItemDecl {
            name: ident.to_string(),
            kind,
            is_public: is_public(vis),
        });
    }
}

/// Restricted visibilities (`pub(crate)`, `pub(super)`, ...) are not reachable
/// by an external consumer, so only plain `pub` counts as public here.
fn is_public(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

/// Flattens a `use` tree into one `ReExport` per leaf.
///
/// A `self` leaf inside a group (`use a::b::{self, C}`) is normalized into an
/// import of the module `b` itself, so downstream code never sees `self`.
fn flatten_use_tree(
    tree: &UseTree,
    mut prefix: Vec<String>,
    is_public: bool,
    out: &mut Vec<ReExport>,
) {
    match tree {
        UseTree::Path(path) => {
            let segment = path.ident.to_string();
            // `use self::dims::Type` means the same as `use dims::Type`.
            if !(segment == "self" && prefix.is_empty()) {
                prefix.push(segment);
            }
            flatten_use_tree(&path.tree, prefix, is_public, out);
        }
        UseTree::Name(name) => {
            push_leaf(prefix, name.ident.to_string(), None, is_public, out);
        }
        UseTree::Rename(rename) => {
            push_leaf(
                prefix,
                rename.ident.to_string(),
                Some(rename.rename.to_string()),
                is_public,
                out,
            );
        }
        UseTree::Glob(_) => {
            out.push(ReExport {
                is_public,
                path: prefix,
                leaf: ReExportLeaf::Glob,
            });
        }
        UseTree::Group(group) => {
            for nested in &group.items {
                flatten_use_tree(nested, prefix.clone(), is_public, out);
            }
        }
    }
}

fn push_leaf(
    mut path: Vec<String>,
    name: String,
    rename: Option<String>,
    is_public: bool,
    out: &mut Vec<ReExport>,
) {
    if name == "self" {
        // `use a::b::{self}` imports the module `b` under its own name.
        if let Some(last) = path.pop() {
            out.push(ReExport {
                is_public,
                path,
                leaf: ReExportLeaf::Name { name: last, rename },
            });
        }
        return;
    }
    out.push(ReExport {
        is_public,
        path,
        leaf: ReExportLeaf::Name { name, rename },
    });
}

//─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> SourceUnit {
        parse_unit_source(source).expect("source should parse")
    }

    #[test]
    fn records_item_kinds_and_visibility() {
        let unit = scan(
            "pub struct Point;\n\
             pub enum Type { D1, D2, D3 }\n\
             pub trait Dimensional { fn dimensions(&self) -> Type; }\n\
             pub fn area() {}\n\
             pub type Scalar = f64;\n\
             pub const ORIGIN: u8 = 0;\n\
             struct Hidden;\n\
             pub(crate) struct CrateLocal;",
        );
        let names: Vec<(&str, ItemKind, bool)> = unit
            .items
            .iter()
            .map(|i| (i.name.as_str(), i.kind, i.is_public))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Point", ItemKind::Struct, true),
                ("Type", ItemKind::Enum, true),
                ("Dimensional", ItemKind::Trait, true),
                ("area", ItemKind::Function, true),
                ("Scalar", ItemKind::TypeAlias, true),
                ("ORIGIN", ItemKind::Const, true),
                ("Hidden", ItemKind::Struct, false),
                ("CrateLocal", ItemKind::Struct, false),
            ]
        );
    }

    #[test]
    fn scans_inline_and_file_backed_modules() {
        let unit = scan("pub mod dims { pub enum Type { D2 } }\nmod private;\n");
        assert_eq!(unit.units.len(), 2);
        let dims = &unit.units[0];
        assert_eq!(dims.name, "dims");
        assert!(dims.is_public);
        assert_eq!(dims.body.as_ref().expect("inline body").items.len(), 1);
        let private = &unit.units[1];
        assert_eq!(private.name, "private");
        assert!(!private.is_public);
        assert!(private.body.is_none());
    }

    #[test]
    fn keeps_cfg_test_modules() {
        let unit = scan("#[cfg(test)]\nmod tests { use geometry::dims::Type; }\n");
        let body = unit.units[0].body.as_ref().expect("inline body");
        assert_eq!(body.reexports.len(), 1);
        assert_eq!(body.reexports[0].path, vec!["geometry", "dims"]);
    }

    #[test]
    fn flattens_grouped_use_tree() {
        let unit = scan("use geometry::dims::{Type, Dimensional};\n");
        assert_eq!(unit.reexports.len(), 2);
        for reexport in &unit.reexports {
            assert!(!reexport.is_public);
            assert_eq!(reexport.path, vec!["geometry", "dims"]);
        }
        match &unit.reexports[0].leaf {
            ReExportLeaf::Name { name, rename } => {
                assert_eq!(name, "Type");
                assert!(rename.is_none());
            }
            other => panic!("unexpected leaf: {:?}", other),
        }
    }

    #[test]
    fn records_renames_and_globs() {
        let unit = scan("pub use dims::Type as Dim;\npub use shapes::*;\n");
        match &unit.reexports[0].leaf {
            ReExportLeaf::Name { name, rename } => {
                assert_eq!(name, "Type");
                assert_eq!(rename.as_deref(), Some("Dim"));
            }
            other => panic!("unexpected leaf: {:?}", other),
        }
        assert!(matches!(unit.reexports[1].leaf, ReExportLeaf::Glob));
        assert_eq!(unit.reexports[1].path, vec!["shapes"]);
        assert!(unit.reexports[0].is_public);
    }

    #[test]
    fn normalizes_self_leaves_and_prefixes() {
        let unit = scan("use self::dims::Type;\nuse geometry::dims::{self};\n");
        assert_eq!(unit.reexports[0].path, vec!["dims"]);
        match &unit.reexports[1].leaf {
            ReExportLeaf::Name { name, .. } => assert_eq!(name, "dims"),
            other => panic!("unexpected leaf: {:?}", other),
        }
        assert_eq!(unit.reexports[1].path, vec!["geometry"]);
    }
}
