//! The resolver population and its published, priority-sorted snapshot.

use crate::chain::ResolverChain;
use crate::error::ResolveError;
use crate::provider::Resolver;
use parking_lot::RwLock;
use std::sync::Arc;
use typeweave_core::{Instance, TypeRef};

/// Handle returned by [`ResolverRegistry::register`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct RegistrationId(u64);

struct Population {
    entries: Vec<(RegistrationId, Resolver)>,
    generation: u64,
    next_id: u64,
}

struct Snapshot {
    generation: u64,
    resolvers: Arc<[Resolver]>,
}

/// A mutable set of resolvers with a lazily rebuilt, sorted snapshot.
///
/// Every change to the population bumps a generation counter. The sorted
/// snapshot is rebuilt on the first [`chain`](ResolverRegistry::chain) call
/// that sees a newer generation, and swapped in whole: a chain always walks
/// either the previous complete snapshot or the new one.
///
/// Sorting is by descending priority. `sort_by` is stable, so resolvers with
/// equal priority stay in registration order.
pub struct ResolverRegistry {
    population: RwLock<Population>,
    published: RwLock<Snapshot>,
}

impl ResolverRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            population: RwLock::new(Population {
                entries: Vec::new(),
                generation: 0,
                next_id: 0,
            }),
            published: RwLock::new(Snapshot {
                generation: 0,
                resolvers: Arc::from(Vec::new()),
            }),
        }
    }

    /// Builder-style [`register`](ResolverRegistry::register).
    pub fn with(self, resolver: Resolver) -> Self {
        self.register(resolver);
        self
    }

    /// Add a resolver to the population.
    pub fn register(&self, resolver: Resolver) -> RegistrationId {
        let mut population = self.population.write();
        let id = RegistrationId(population.next_id);
        population.next_id += 1;
        tracing::debug!(
            resolver = resolver.name(),
            priority = resolver.priority(),
            "typeweave.registry.register"
        );
        population.entries.push((id, resolver));
        population.generation += 1;
        id
    }

    /// Remove a resolver. Returns `false` if `id` is not registered.
    pub fn unregister(&self, id: RegistrationId) -> bool {
        let mut population = self.population.write();
        let before = population.entries.len();
        population.entries.retain(|(entry, _)| *entry != id);
        let removed = population.entries.len() != before;
        if removed {
            population.generation += 1;
        }
        removed
    }

    /// Swap the resolver behind `id` in place, keeping its registration
    /// position. Returns `false` if `id` is not registered.
    ///
    /// The population size does not change, but the generation does, so the
    /// next chain sees the new resolver.
    pub fn replace(&self, id: RegistrationId, resolver: Resolver) -> bool {
        let mut population = self.population.write();
        let Some(slot) = population
            .entries
            .iter_mut()
            .find(|(entry, _)| *entry == id)
        else {
            return false;
        };
        slot.1 = resolver;
        population.generation += 1;
        true
    }

    /// Number of registered resolvers.
    pub fn len(&self) -> usize {
        self.population.read().entries.len()
    }

    /// Whether no resolvers are registered.
    pub fn is_empty(&self) -> bool {
        self.population.read().entries.is_empty()
    }

    /// Counter bumped by every population change.
    pub fn generation(&self) -> u64 {
        self.population.read().generation
    }

    /// A fresh chain, cursor at the front, over the current snapshot.
    pub fn chain(&self) -> ResolverChain {
        ResolverChain::new(self.snapshot())
    }

    /// Resolve an identifier through a fresh chain.
    pub fn resolve(&self, identifier: &str) -> Result<Option<TypeRef>, ResolveError> {
        self.chain().resolve(identifier)
    }

    /// Resolve the type of an instance through a fresh chain.
    pub fn resolve_instance(&self, instance: &Instance) -> Result<Option<TypeRef>, ResolveError> {
        self.chain().resolve_instance(instance)
    }

    fn snapshot(&self) -> Arc<[Resolver]> {
        let generation = self.population.read().generation;
        {
            let published = self.published.read();
            if published.generation == generation {
                return Arc::clone(&published.resolvers);
            }
        }
        self.rebuild()
    }

    fn rebuild(&self) -> Arc<[Resolver]> {
        // Holding the population read lock keeps the generation fixed while
        // the new snapshot is built.
        let population = self.population.read();
        let mut published = self.published.write();
        if published.generation == population.generation {
            return Arc::clone(&published.resolvers);
        }

        let mut sorted: Vec<Resolver> = population
            .entries
            .iter()
            .map(|(_, resolver)| resolver.clone())
            .collect();
        sorted.sort_by(|a, b| b.priority().total_cmp(&a.priority()));

        tracing::debug!(
            generation = population.generation,
            count = sorted.len(),
            "typeweave.registry.rebuilt"
        );
        *published = Snapshot {
            generation: population.generation,
            resolvers: Arc::from(sorted),
        };
        Arc::clone(&published.resolvers)
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let population = self.population.read();
        f.debug_struct("ResolverRegistry")
            .field("generation", &population.generation)
            .field("resolvers", &population.entries.len())
            .finish()
    }
}
