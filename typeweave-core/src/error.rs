//! Error types for the descriptor model.

use thiserror::Error;

/// Errors raised when instantiating a type descriptor.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TypeError {
    /// The type has no constructor (abstract or interface-like).
    #[error("type {0} cannot be instantiated")]
    NotInstantiable(String),

    /// The constructor rejected its arguments.
    #[error("invalid constructor arguments for {type_name}: {message}")]
    Arguments {
        /// Name of the type being constructed.
        type_name: String,
        /// What was wrong with the arguments.
        message: String,
    },

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised by member get/set operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MemberError {
    /// The member has no getter.
    #[error("member {0} is not readable")]
    NotReadable(String),

    /// The member has no setter.
    #[error("member {0} is read-only")]
    ReadOnly(String),

    /// The owner instance is not of the type the member is bound to.
    #[error("member {member} expects an owner of type {expected}")]
    OwnerType {
        /// Name of the member.
        member: String,
        /// Native type the member expected its owner to be.
        expected: String,
    },

    /// The value could not be converted to or from the member's type.
    #[error("invalid value for member {member}: {message}")]
    Value {
        /// Name of the member.
        member: String,
        /// Conversion failure detail.
        message: String,
    },

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl MemberError {
    /// Build a [`MemberError::Value`] from a serde conversion failure.
    pub fn value(member: &str, err: serde_json::Error) -> Self {
        MemberError::Value {
            member: member.to_string(),
            message: err.to_string(),
        }
    }
}
