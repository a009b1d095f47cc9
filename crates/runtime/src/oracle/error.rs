//! Oracle access errors.

use std::path::PathBuf;

use gacha_core::RateTableError;
use thiserror::Error;

/// Errors that occur when reading data-service records.
///
/// A missing asset only degrades a single card; every other variant means the
/// batch cannot be evaluated.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {document}: {source}")]
    Malformed {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("invalid rate config: {0}")]
    InvalidRates(#[from] RateTableError),
}
