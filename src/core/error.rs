//! Error types for the voxgen crate

use thiserror::Error;

/// Main error type for the crate.
///
/// Only configuration handling and argument validation are fallible. Voxel
/// addressing bugs panic instead of surfacing here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Voxel error: {0}")]
    Voxel(String),
}
