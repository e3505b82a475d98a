//! Chain-aware resolver that adds extension members to qualifying types.

use crate::composite::CompositeTypeData;
use std::fmt;
use std::sync::Arc;
use typeweave_chain::{ResolveError, ResolverChain, StackedTypeDataProvider};
use typeweave_core::{Instance, MemberRef, Reflect, TypeData, TypeRef};

type Predicate = Box<dyn Fn(&dyn TypeData) -> bool + Send + Sync>;

/// Resolves through the rest of the chain and wraps every result that
/// passes `applies_to` in a [`CompositeTypeData`] carrying `members`.
///
/// Results that do not qualify, including `None`, are returned unchanged.
pub struct ExtensionDecorator {
    name: String,
    priority: f64,
    members: Arc<[MemberRef]>,
    applies_to: Predicate,
}

impl ExtensionDecorator {
    /// Default priority, above manifest resolvers.
    pub const DEFAULT_PRIORITY: f64 = 10.0;

    /// Create a decorator adding `members` to types accepted by `applies_to`.
    pub fn new<F>(name: impl Into<String>, members: Vec<MemberRef>, applies_to: F) -> Self
    where
        F: Fn(&dyn TypeData) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            priority: Self::DEFAULT_PRIORITY,
            members: members.into(),
            applies_to: Box::new(applies_to),
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// The members added to qualifying types.
    pub fn members(&self) -> &[MemberRef] {
        &self.members
    }

    fn decorate(&self, resolved: Option<TypeRef>) -> Option<TypeRef> {
        match resolved {
            Some(ty) if (self.applies_to)(ty.as_ref()) => {
                tracing::trace!(
                    decorator = %self.name,
                    type_name = ty.name(),
                    "typeweave.extension.wrapped"
                );
                Some(Arc::new(CompositeTypeData::new(ty, Arc::clone(&self.members))))
            }
            other => other,
        }
    }
}

impl StackedTypeDataProvider for ExtensionDecorator {
    fn type_data(
        &self,
        identifier: &str,
        stack: &ResolverChain,
    ) -> Result<Option<TypeRef>, ResolveError> {
        Ok(self.decorate(stack.resolve(identifier)?))
    }

    fn type_data_of(
        &self,
        instance: &Instance,
        stack: &ResolverChain,
    ) -> Result<Option<TypeRef>, ResolveError> {
        Ok(self.decorate(stack.resolve_instance(instance)?))
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ExtensionDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionDecorator")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("members", &self.members.len())
            .finish()
    }
}
