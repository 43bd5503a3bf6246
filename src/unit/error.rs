use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for source-unit loading operations.
#[derive(Error, Debug)]
pub enum UnitError {
    /// Error when reading a source file.
    #[error("Failed to read source unit '{0}': {1}")]
    ReadFile(String, std::io::Error),

    /// Error when parsing a source file into an AST.
    #[error("Failed to parse source unit '{0}': {1}")]
    ParseSource(String, syn::Error),
}
