// render module
mod render;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the report modules.
//─────────────────────────────────────────────────────────────────────────────
pub use render::SurfaceRenderer;
