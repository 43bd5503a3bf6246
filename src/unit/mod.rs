// error module
mod error;
// loader module
mod loader;

// scanner module
pub mod scanner;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the unit modules.
//─────────────────────────────────────────────────────────────────────────────
pub use error::UnitError;
pub use loader::{load_unit_tree, LoadDiagnostic};
pub use scanner::{parse_unit_source, ItemDecl, ItemKind, ReExport, ReExportLeaf, SourceUnit, UnitDecl};
