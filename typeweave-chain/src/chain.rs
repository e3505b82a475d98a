//! Immutable, forkable view over an ordered resolver sequence.

use crate::error::ResolveError;
use crate::provider::{Resolver, StackedTypeDataProvider, TypeDataProvider};
use std::sync::Arc;
use typeweave_core::{Instance, Reflect, TypeRef};

/// An ordered resolver sequence plus a cursor into it.
///
/// Resolving walks from the cursor to the end and returns the first answer.
/// A stacked resolver at index `i` is handed a fork whose cursor is `i + 1`.
/// Forking copies a pointer and an index; the sequence itself is shared.
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Arc<[Resolver]>,
    offset: usize,
}

impl ResolverChain {
    /// A chain over `resolvers`, starting at the first one.
    ///
    /// `resolvers` is walked in the given order; [`ResolverRegistry`](crate::ResolverRegistry)
    /// is responsible for sorting by priority.
    pub fn new(resolvers: Arc<[Resolver]>) -> Self {
        Self {
            resolvers,
            offset: 0,
        }
    }

    /// A chain with no resolvers. Resolves everything to `None`.
    pub fn empty() -> Self {
        Self::new(Arc::from(Vec::new()))
    }

    /// Resolvers this chain has not consulted yet.
    pub fn remaining(&self) -> &[Resolver] {
        self.resolvers.get(self.offset..).unwrap_or(&[])
    }

    /// Position of the cursor in the full sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether there is nothing left to consult.
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Resolve an identifier through the remaining resolvers.
    pub fn resolve(&self, identifier: &str) -> Result<Option<TypeRef>, ResolveError> {
        self.walk(
            |provider| provider.type_data(identifier),
            |provider, rest| provider.type_data(identifier, rest),
        )
    }

    /// Resolve the type of an instance through the remaining resolvers.
    pub fn resolve_instance(&self, instance: &Instance) -> Result<Option<TypeRef>, ResolveError> {
        self.walk(
            |provider| provider.type_data_of(instance),
            |provider, rest| provider.type_data_of(instance, rest),
        )
    }

    fn fork(&self, offset: usize) -> Self {
        Self {
            resolvers: Arc::clone(&self.resolvers),
            offset,
        }
    }

    fn walk(
        &self,
        direct: impl Fn(&dyn TypeDataProvider) -> Result<Option<TypeRef>, ResolveError>,
        stacked: impl Fn(
            &dyn StackedTypeDataProvider,
            &ResolverChain,
        ) -> Result<Option<TypeRef>, ResolveError>,
    ) -> Result<Option<TypeRef>, ResolveError> {
        for (index, resolver) in self.remaining().iter().enumerate() {
            let found = match resolver {
                Resolver::Direct(provider) => direct(provider.as_ref())?,
                Resolver::Stacked(provider) => {
                    let rest = self.fork(self.offset + index + 1);
                    stacked(provider.as_ref(), &rest)?
                }
            };
            if let Some(ty) = found {
                tracing::trace!(
                    resolver = resolver.name(),
                    type_name = ty.name(),
                    "typeweave.chain.resolved"
                );
                return Ok(Some(ty));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("offset", &self.offset)
            .field("remaining", &self.remaining())
            .finish()
    }
}
