//! Virtual members backed by per-owner side storage.
//!
//! An [`ExtensionMember`] keeps values for owners it does not own. Entries
//! are keyed by the address of the owner's allocation and hold a
//! [`Weak`] back to it: the weak reference keeps the address from being
//! reused while the entry exists, and never keeps the owner's value alive.
//! Entries whose owner is gone are dropped lazily: any write that finds the
//! store at twice its last live size (and at least 64 entries) prunes it.

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use typeweave_core::{Instance, MemberData, MemberError, Reflect, Tag, TypeData, TypeRef};

/// Stores below this size are never pruned.
const MIN_PRUNE_AT: usize = 64;

/// Values an extension member can hold.
pub trait ExtensionValue:
    Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> ExtensionValue for T where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

struct Entry<T> {
    owner: Weak<dyn Any + Send + Sync>,
    value: T,
}

struct Store<T> {
    entries: HashMap<usize, Entry<T>>,
    prune_at: usize,
}

impl<T> Store<T> {
    /// Remove the entry at `key`, dropping dead entries once the store has
    /// grown past its threshold.
    fn remove(&mut self, key: usize) {
        self.entries.remove(&key);
        if self.entries.len() >= self.prune_at {
            self.prune();
        }
    }

    fn prune(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.owner.strong_count() > 0);
        self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_AT);
        tracing::trace!(
            dropped = before - self.entries.len(),
            live = self.entries.len(),
            "typeweave.extension.pruned"
        );
    }
}

fn owner_key(owner: &Instance) -> usize {
    Arc::as_ptr(owner) as *const () as usize
}

/// A member that exists only through a decorator.
///
/// Reads return the stored override for an owner, or the declared default.
/// Writing the default removes the override, so owners that never opt in
/// cost nothing.
pub struct ExtensionMember<T> {
    name: String,
    tags: Vec<Tag>,
    declaring: Option<Weak<dyn TypeData>>,
    value_type: TypeRef,
    default: T,
    store: RwLock<Store<T>>,
}

impl<T: ExtensionValue> ExtensionMember<T> {
    /// Declare a member called `name` with values of `value_type`, reading
    /// `default` for owners without an override.
    pub fn new(name: impl Into<String>, value_type: TypeRef, default: T) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            declaring: None,
            value_type,
            default,
            store: RwLock::new(Store {
                entries: HashMap::new(),
                prune_at: MIN_PRUNE_AT,
            }),
        }
    }

    /// Record the type this member is declared on. Held without ownership.
    pub fn declared_on(mut self, declaring: &TypeRef) -> Self {
        self.declaring = Some(Arc::downgrade(declaring));
        self
    }

    /// Attach a metadata tag.
    pub fn tag<U: Any + Send + Sync>(mut self, tag: U) -> Self {
        self.tags.push(Tag::new(tag));
        self
    }

    /// The value read for owners without an override.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// The override for `owner`, or the default.
    pub fn get(&self, owner: &Instance) -> T {
        // A live entry at this address belongs to `owner`: its weak reference
        // pins the allocation, so no other owner can share the address.
        self.store
            .read()
            .entries
            .get(&owner_key(owner))
            .map_or_else(|| self.default.clone(), |entry| entry.value.clone())
    }

    /// Replace the override for `owner`. Setting the default clears it.
    pub fn set(&self, owner: &Instance, value: T) {
        let key = owner_key(owner);
        let mut store = self.store.write();
        store.remove(key);
        if value == self.default {
            return;
        }
        store.entries.insert(
            key,
            Entry {
                owner: Arc::downgrade(owner),
                value,
            },
        );
    }

    /// Clear the override for `owner`.
    pub fn reset(&self, owner: &Instance) {
        self.store.write().remove(owner_key(owner));
    }

    /// Whether `owner` has an override.
    pub fn is_overridden(&self, owner: &Instance) -> bool {
        self.store.read().entries.contains_key(&owner_key(owner))
    }

    /// Number of overrides whose owner is still alive.
    pub fn override_count(&self) -> usize {
        self.store
            .read()
            .entries
            .values()
            .filter(|entry| entry.owner.strong_count() > 0)
            .count()
    }
}

impl<T: ExtensionValue> Reflect for ExtensionMember<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl<T: ExtensionValue> MemberData for ExtensionMember<T> {
    fn declaring_type(&self) -> Option<TypeRef> {
        self.declaring.as_ref().and_then(Weak::upgrade)
    }

    fn value_type(&self) -> TypeRef {
        Arc::clone(&self.value_type)
    }

    fn readable(&self) -> bool {
        true
    }

    fn writable(&self) -> bool {
        true
    }

    fn get_value(&self, owner: &Instance) -> Result<serde_json::Value, MemberError> {
        serde_json::to_value(self.get(owner)).map_err(|e| MemberError::value(&self.name, e))
    }

    fn set_value(&self, owner: &Instance, value: serde_json::Value) -> Result<(), MemberError> {
        let value = serde_json::from_value(value).map_err(|e| MemberError::value(&self.name, e))?;
        self.set(owner, value);
        Ok(())
    }
}

impl<T> fmt::Debug for ExtensionMember<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionMember")
            .field("name", &self.name)
            .field("value_type", &self.value_type.name())
            .field("overrides", &self.store.read().entries.len())
            .finish()
    }
}
