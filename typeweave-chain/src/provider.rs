//! The two resolver shapes and the variant that holds either.

use crate::chain::ResolverChain;
use crate::error::ResolveError;
use std::fmt;
use std::sync::Arc;
use typeweave_core::{Instance, TypeRef};

/// A resolver that answers on its own.
///
/// Return `Ok(None)` for inputs this resolver does not handle; the chain then
/// moves on to the next resolver.
pub trait TypeDataProvider: Send + Sync {
    /// Resolve a type from an identifier.
    fn type_data(&self, identifier: &str) -> Result<Option<TypeRef>, ResolveError>;

    /// Resolve the type of a live instance.
    fn type_data_of(&self, instance: &Instance) -> Result<Option<TypeRef>, ResolveError>;

    /// Ordering key. Higher priorities are consulted first.
    fn priority(&self) -> f64;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A resolver that can see the resolvers after it.
///
/// `stack` starts immediately after this resolver. Implementations may
/// ignore it, consult it once, or consult it several times; resolving through
/// it never changes it.
pub trait StackedTypeDataProvider: Send + Sync {
    /// Resolve a type from an identifier.
    fn type_data(
        &self,
        identifier: &str,
        stack: &ResolverChain,
    ) -> Result<Option<TypeRef>, ResolveError>;

    /// Resolve the type of a live instance.
    fn type_data_of(
        &self,
        instance: &Instance,
        stack: &ResolverChain,
    ) -> Result<Option<TypeRef>, ResolveError>;

    /// Ordering key. Higher priorities are consulted first.
    fn priority(&self) -> f64;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Either resolver shape.
#[derive(Clone)]
pub enum Resolver {
    /// A [`TypeDataProvider`].
    Direct(Arc<dyn TypeDataProvider>),
    /// A [`StackedTypeDataProvider`].
    Stacked(Arc<dyn StackedTypeDataProvider>),
}

impl Resolver {
    /// Wrap a direct resolver.
    pub fn direct(provider: impl TypeDataProvider + 'static) -> Self {
        Resolver::Direct(Arc::new(provider))
    }

    /// Wrap a chain-aware resolver.
    pub fn stacked(provider: impl StackedTypeDataProvider + 'static) -> Self {
        Resolver::Stacked(Arc::new(provider))
    }

    /// The wrapped resolver's priority.
    pub fn priority(&self) -> f64 {
        match self {
            Resolver::Direct(p) => p.priority(),
            Resolver::Stacked(p) => p.priority(),
        }
    }

    /// The wrapped resolver's name.
    pub fn name(&self) -> &str {
        match self {
            Resolver::Direct(p) => p.name(),
            Resolver::Stacked(p) => p.name(),
        }
    }
}

impl From<Arc<dyn TypeDataProvider>> for Resolver {
    fn from(provider: Arc<dyn TypeDataProvider>) -> Self {
        Resolver::Direct(provider)
    }
}

impl From<Arc<dyn StackedTypeDataProvider>> for Resolver {
    fn from(provider: Arc<dyn StackedTypeDataProvider>) -> Self {
        Resolver::Stacked(provider)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Resolver::Direct(_) => "Direct",
            Resolver::Stacked(_) => "Stacked",
        };
        f.debug_struct("Resolver")
            .field("kind", &kind)
            .field("name", &self.name())
            .field("priority", &self.priority())
            .finish()
    }
}
