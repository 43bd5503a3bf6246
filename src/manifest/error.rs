use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for crate-manifest loading operations.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No Cargo.toml at the expected location.
    #[error("Manifest not found: {0}")]
    NotFound(String),

    /// Error when reading the manifest file.
    #[error("Failed to read manifest '{0}': {1}")]
    ReadFile(String, std::io::Error),

    /// Error when deserializing the manifest.
    #[error("Failed to parse manifest '{0}': {1}")]
    Parse(String, toml::de::Error),

    /// A manifest without a `[package]` section cannot name a library.
    #[error("Manifest '{0}' has no [package] section")]
    MissingPackage(String),
}
