use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Malformed version string: {input:?} (expected M.m.p or M.m.p-ptb)")]
    Malformed { input: String },

    #[error("Invalid version range: min {min} must be lower than max {max}")]
    InvalidRange { min: String, max: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("Unknown version id: {0}")]
    UnknownId(i64),

    #[error("Unknown version name: {0}")]
    UnknownName(String),

    #[error("Duplicate catalog entry: {0}")]
    Duplicate(String),
}
