use std::io::Write;

use crate::resolve::Surface;

/// `SurfaceRenderer` writes the documentation-style view of a resolved
/// surface: exactly the names an external consumer may reference, one per
/// line, in deterministic path order.  Cross-checking this listing is the
/// recommended way to diagnose a consumer-side "name not found" failure
/// before touching the producer's layout.
pub struct SurfaceRenderer;

impl SurfaceRenderer {
    /// Renders the surface to the given writer.
    pub fn render_to_writer(
        surface: &Surface,
        entry_display: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "=== VISIBLE SURFACE: {} ===", surface.crate_name())?;
        writeln!(writer, "Entry unit: {}", entry_display)?;
        writeln!(writer, "Visible names: {}", surface.len())?;
        writeln!(writer)?;

        if surface.is_empty() {
            writeln!(
                writer,
                "(no externally visible names: the entry unit declares and re-exports nothing)"
            )?;
            return Ok(());
        }
        for (path, kind) in surface.iter() {
            writeln!(writer, "pub {:<6} {}", kind.label(), surface.qualified(path))?;
        }
        Ok(())
    }
}
