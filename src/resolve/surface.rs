use std::collections::BTreeMap;

use crate::unit::ItemKind;

/// The flat set of qualified names an external consumer may reference using
/// the library's name as a prefix.
///
/// Keys are path segments relative to the crate root, so the entry for
/// `geometry::dims::Type` is `["dims", "Type"]`.  A `BTreeMap` keeps
/// iteration deterministic for rendering and comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    crate_name: String,
    entries: BTreeMap<Vec<String>, ItemKind>,
}

impl Surface {
    pub fn new(crate_name: &str) -> Self {
        Self {
            crate_name: crate_name.to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// Name of the library this surface belongs to (its target name).
    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    pub fn insert(&mut self, path: Vec<String>, kind: ItemKind) {
        self.entries.insert(path, kind);
    }

    /// Exact lookup of a qualified path (segments after the crate name).
    pub fn contains(&self, segments: &[String]) -> bool {
        self.entries.contains_key(segments)
    }

    pub fn kind_of(&self, segments: &[String]) -> Option<ItemKind> {
        self.entries.get(segments).copied()
    }

    /// Whether `segments` names a module a consumer may glob-import from.
    /// The empty path is the crate root and always qualifies.
    pub fn is_module_path(&self, segments: &[String]) -> bool {
        segments.is_empty() || self.kind_of(segments) == Some(ItemKind::Module)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vec<String>, &ItemKind)> {
        self.entries.iter()
    }

    /// Renders a path as the consumer would write it, e.g. `geometry::Type`.
    pub fn qualified(&self, segments: &[String]) -> String {
        if segments.is_empty() {
            self.crate_name.clone()
        } else {
            format!("{}::{}", self.crate_name, segments.join("::"))
        }
    }
}
