use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] crate::manifest::ManifestError),
    #[error("Source loading error: {0}")]
    Unit(#[from] crate::unit::UnitError),
    #[error("Invalid crate directory: {0}")]
    InvalidCrateDir(String),
    #[error("{count} unresolved reference(s) to crate `{crate_name}`")]
    UnresolvedReferences { crate_name: String, count: usize },
}
