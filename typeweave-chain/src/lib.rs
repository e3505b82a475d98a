#![deny(missing_docs)]
//! Resolver protocol and chain for typeweave.
//!
//! Resolvers map an identifier or a live instance to a [`TypeRef`]. They come
//! in two shapes:
//!
//! - [`TypeDataProvider`]: answers on its own and cannot see other resolvers.
//! - [`StackedTypeDataProvider`]: also receives a [`ResolverChain`] holding
//!   every resolver that has not been consulted yet, so it can ask what the
//!   rest of the chain would produce and override or wrap that answer.
//!
//! The [`ResolverRegistry`] holds the resolver population. It sorts resolvers
//! by descending priority (registration order breaks ties) and publishes an
//! immutable snapshot that chains walk from the front. The first non-empty
//! answer wins; resolver errors propagate to the caller untouched.
//!
//! [`TypeRef`]: typeweave_core::TypeRef

pub mod chain;
pub mod error;
pub mod provider;
pub mod registry;

pub use chain::ResolverChain;
pub use error::ResolveError;
pub use provider::{Resolver, StackedTypeDataProvider, TypeDataProvider};
pub use registry::{RegistrationId, ResolverRegistry};
