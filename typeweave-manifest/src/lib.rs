#![deny(missing_docs)]
//! Manifest-backed implementation of typeweave's `TypeDataProvider` trait.
//!
//! Class manifests ([`ClassType`]) are registered explicitly. Identifiers
//! resolve by class name; instances resolve by their concrete Rust type,
//! for classes bound with [`ClassTypeBuilder::native`].
//!
//! [`ClassTypeBuilder::native`]: typeweave_core::ClassTypeBuilder::native

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use typeweave_chain::{ResolveError, TypeDataProvider};
use typeweave_core::{ClassType, Instance, Reflect, TypeRef, primitive};

/// Default priority: low, so more specific resolvers run first.
pub const DEFAULT_PRIORITY: f64 = 1.0;

#[derive(Default)]
struct Tables {
    by_name: HashMap<String, Arc<ClassType>>,
    by_native: HashMap<TypeId, Arc<ClassType>>,
}

/// Direct resolver over registered class manifests.
///
/// Uses `HashMap`s behind a `RwLock`, so classes can be registered while
/// other threads resolve.
pub struct ManifestResolver {
    tables: RwLock<Tables>,
    priority: f64,
}

impl ManifestResolver {
    /// Create an empty resolver at [`DEFAULT_PRIORITY`].
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Register the built-in primitive descriptors.
    pub fn with_primitives(self) -> Self {
        for class in primitive::all() {
            self.register(class);
        }
        self
    }

    /// Builder-style [`register`](ManifestResolver::register).
    pub fn with(self, class: Arc<ClassType>) -> Self {
        self.register(class);
        self
    }

    /// Register a class. A class with the same name (or the same native
    /// type) replaces the earlier one.
    pub fn register(&self, class: Arc<ClassType>) {
        let mut tables = self.tables.write();
        if let Some(native) = class.native_type() {
            tables.by_native.insert(native, Arc::clone(&class));
        }
        if let Some(previous) = tables.by_name.insert(class.name().to_string(), class) {
            tracing::debug!(class = previous.name(), "typeweave.manifest.replaced");
        }
    }

    /// Look up a registered class by name.
    pub fn get(&self, name: &str) -> Option<Arc<ClassType>> {
        self.tables.read().by_name.get(name).cloned()
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.tables.read().by_name.len()
    }

    /// Whether no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.tables.read().by_name.is_empty()
    }
}

impl Default for ManifestResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeDataProvider for ManifestResolver {
    fn type_data(&self, identifier: &str) -> Result<Option<TypeRef>, ResolveError> {
        Ok(self.get(identifier).map(|class| class as TypeRef))
    }

    fn type_data_of(&self, instance: &Instance) -> Result<Option<TypeRef>, ResolveError> {
        let any: &dyn Any = &**instance;
        let native = any.type_id();
        Ok(self
            .tables
            .read()
            .by_native
            .get(&native)
            .map(|class| Arc::clone(class) as TypeRef))
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn name(&self) -> &str {
        "manifest"
    }
}
