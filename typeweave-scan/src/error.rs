//! Scanner errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from configuring or running a scan.
///
/// Only [`ScanError::InvalidConfig`] reaches callers. Directory failures
/// are logged during the scan and the directory contributes no files.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ScanError {
    /// The configuration cannot be used.
    #[error("invalid scanner config: {0}")]
    InvalidConfig(String),

    /// A directory could not be enumerated.
    #[error("unable to enumerate directory '{}': {source}", path.display())]
    Directory {
        /// The directory.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
