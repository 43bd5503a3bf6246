use thiserror::Error;

// Non-fatal findings produced while resolving a library's surface.  They
// mirror what the library's own compile step would reject, so the resolver
// reports them and keeps going rather than aborting the analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveDiagnostic {
    /// A re-export path that does not lead to a local module.  Re-exports
    /// from external crates land here too; they are outside the surface this
    /// tool computes.
    #[error("re-export path `{path}` in `{at}` does not resolve to a local module")]
    UnresolvedPath { at: String, path: String },

    /// A re-exported name the target module does not export.
    #[error("`{name}` is not exported by `{target}` (re-exported in `{at}`)")]
    NameNotExported {
        at: String,
        target: String,
        name: String,
    },

    /// Module nesting or re-export chains deeper than the resolver follows.
    #[error("recursion limit reached while resolving `{at}`")]
    RecursionLimit { at: String },
}
