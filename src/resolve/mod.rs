// error module
mod error;
// resolver module
mod resolver;
// surface module
mod surface;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the resolve modules.
//─────────────────────────────────────────────────────────────────────────────
pub use error::ResolveDiagnostic;
pub use resolver::{Library, SurfaceResolver};
pub use surface::Surface;
