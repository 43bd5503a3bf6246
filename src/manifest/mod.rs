// error module
mod error;
// loader module
mod loader;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the manifest modules.
//─────────────────────────────────────────────────────────────────────────────
pub use error::ManifestError;
pub use loader::{load_manifest, parse_manifest, Manifest, PathDependency};
