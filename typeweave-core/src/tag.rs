//! Metadata tags attached to descriptors.
//!
//! A [`Tag`] is a type-erased record registered alongside a type or member.
//! Lookup is by kind: `descriptor.tag::<DisplayTag>()` finds the first tag
//! whose concrete type is [`DisplayTag`]. Any `'static + Send + Sync` type
//! can be used as a tag kind; the ones below are understood by this crate.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased metadata record.
#[derive(Clone)]
pub struct Tag {
    inner: Arc<dyn Any + Send + Sync>,
    kind: &'static str,
}

impl Tag {
    /// Wrap a value as a tag.
    pub fn new<T: Any + Send + Sync>(tag: T) -> Self {
        Self {
            inner: Arc::new(tag),
            kind: std::any::type_name::<T>(),
        }
    }

    /// Borrow the tag as `T` if it is of that kind.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Whether the tag is of kind `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// The Rust type name of the tag kind. For diagnostics only.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tag").field(&self.kind).finish()
    }
}

/// Human-facing name, description, and placement of a type or member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTag {
    /// Display name.
    pub name: String,
    /// Longer description. Empty when undocumented.
    pub description: String,
    /// Group path, outermost first.
    pub groups: Vec<String>,
    /// Sort key within a group. Lower sorts first.
    pub order: f64,
    /// Whether the group is collapsed by default.
    pub collapsed: bool,
}

impl DisplayTag {
    /// Order given to synthesized display tags so undecorated items sort first.
    pub const FALLBACK_ORDER: f64 = -10000.0;

    /// Create a display tag with a name and no other information.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            groups: Vec::new(),
            order: 0.0,
            collapsed: false,
        }
    }

    /// The display tag used when a descriptor carries none.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            order: Self::FALLBACK_ORDER,
            ..Self::new(name)
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a group level.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Set the sort order.
    pub fn with_order(mut self, order: f64) -> Self {
        self.order = order;
        self
    }

    /// Mark the group as collapsed by default.
    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }
}

/// Documentation link for a type or member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLinkTag(pub String);

impl HelpLinkTag {
    /// Create a help link.
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    /// Borrow the link.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Marks a member that must not take part in parameter sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnsweepableTag;

/// Enables (or shows) a member depending on the value of a sibling member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnabledIfTag {
    /// Name of the member whose value controls this one.
    pub property: String,
    /// Values of `property` that enable this member.
    pub values: Vec<serde_json::Value>,
    /// Treat `values` as bit flags: any overlapping bit enables.
    pub flags: bool,
    /// Hide the member entirely while it is disabled.
    pub hide_if_disabled: bool,
    /// Enable when the condition does NOT hold.
    pub invert: bool,
}

impl EnabledIfTag {
    /// Enable when `property` equals any of `values`.
    pub fn new(property: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self {
            property: property.into(),
            values,
            flags: false,
            hide_if_disabled: false,
            invert: false,
        }
    }

    /// Compare as bit flags instead of by equality.
    pub fn flags(mut self) -> Self {
        self.flags = true;
        self
    }

    /// Hide while disabled.
    pub fn hide_if_disabled(mut self) -> Self {
        self.hide_if_disabled = true;
        self
    }

    /// Invert the condition.
    pub fn invert(mut self) -> Self {
        self.invert = true;
        self
    }

    /// Evaluate the condition against the current value of `property`.
    pub fn is_enabled(&self, current: &serde_json::Value) -> bool {
        let matched = if self.flags {
            let bits = current.as_u64().unwrap_or(0);
            self.values
                .iter()
                .filter_map(serde_json::Value::as_u64)
                .any(|flag| bits & flag != 0)
        } else {
            self.values.iter().any(|v| v == current)
        };
        matched != self.invert
    }
}
