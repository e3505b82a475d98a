//! Resolver errors.

use thiserror::Error;

/// A resolver failed.
///
/// Failing is not the same as declining: a resolver that does not recognise
/// its input returns `Ok(None)`. Errors signal a broken resolver and are
/// never caught by the chain.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver hit an internal inconsistency.
    #[error("resolver {resolver} failed: {message}")]
    Failed {
        /// Name of the failing resolver.
        resolver: String,
        /// Error message.
        message: String,
    },

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
