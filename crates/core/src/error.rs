use std::path::PathBuf;

/// Errors raised by a [`PatientStore`](crate::store::PatientStore) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid document identifier: {0}")]
    InvalidIdentifier(String),
    #[error("failed to create collection directory: {0}")]
    CollectionDirCreation(std::io::Error),
    #[error("failed to read document: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write document: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error(
        "failed to deserialize document (path: {path}): {source}",
        path = path.display()
    )]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Outcome of a failed patient resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The identifier matched neither the user store nor the registered-patient store.
    #[error("patient not found: {0}")]
    NotFound(String),
    /// A datastore query failed part-way through; no partial view is produced.
    #[error("patient resolution failed: {0}")]
    ResolutionFailed(#[from] StoreError),
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidInput(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
