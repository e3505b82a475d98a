//! Type and member descriptor traits.

use crate::error::{MemberError, TypeError};
use crate::tag::Tag;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A live, type-erased object.
///
/// Identity is the identity of the shared allocation: two clones of the same
/// `Arc` are the same instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Shared handle to a type descriptor.
pub type TypeRef = Arc<dyn TypeData>;

/// Shared handle to a member descriptor.
pub type MemberRef = Arc<dyn MemberData>;

/// Base protocol for anything that can be described: a name plus metadata tags.
pub trait Reflect: Send + Sync {
    /// The name of it.
    fn name(&self) -> &str;

    /// The metadata tags attached to it, in declaration order.
    fn tags(&self) -> &[Tag];
}

/// A logical type, independent of any native Rust type.
///
/// Implementations must be object safe and shareable; resolvers hand them
/// out as [`TypeRef`].
pub trait TypeData: Reflect + fmt::Debug {
    /// The parent type, or `None` at the root of the hierarchy.
    fn base_type(&self) -> Option<TypeRef>;

    /// All members of this type.
    fn members(&self) -> Vec<MemberRef>;

    /// Look up a member by name. Unknown names return `None`.
    fn member(&self, name: &str) -> Option<MemberRef>;

    /// Create an instance of this type from constructor arguments.
    fn create_instance(&self, args: &[serde_json::Value]) -> Result<Instance, TypeError>;

    /// Whether [`create_instance`](TypeData::create_instance) can succeed for this type.
    fn can_create_instance(&self) -> bool;

    /// Upcast for equality checks between concrete descriptor kinds.
    fn as_any(&self) -> &dyn Any;

    /// Descriptor equality. Defaults to object identity.
    fn type_eq(&self, other: &dyn TypeData) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn TypeData)
    }
}

impl PartialEq for dyn TypeData {
    fn eq(&self, other: &Self) -> bool {
        self.type_eq(other)
    }
}

/// A named, typed slot on a type.
pub trait MemberData: Reflect + fmt::Debug {
    /// The type on which this member is declared, if it is still alive.
    fn declaring_type(&self) -> Option<TypeRef>;

    /// The type of the values this member holds.
    fn value_type(&self) -> TypeRef;

    /// Whether [`get_value`](MemberData::get_value) is supported.
    fn readable(&self) -> bool;

    /// Whether [`set_value`](MemberData::set_value) is supported.
    fn writable(&self) -> bool;

    /// Read the value of this member on `owner`.
    fn get_value(&self, owner: &Instance) -> Result<serde_json::Value, MemberError>;

    /// Write the value of this member on `owner`.
    fn set_value(&self, owner: &Instance, value: serde_json::Value) -> Result<(), MemberError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassType;

    fn _assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn type_data_is_object_safe_send_sync() {
        _assert_send_sync::<Box<dyn TypeData>>();
        _assert_send_sync::<TypeRef>();
    }

    #[test]
    fn member_data_is_object_safe_send_sync() {
        _assert_send_sync::<Box<dyn MemberData>>();
        _assert_send_sync::<MemberRef>();
    }

    #[test]
    fn default_equality_is_identity() {
        let a: TypeRef = ClassType::builder("Same").build();
        let b: TypeRef = ClassType::builder("Same").build();
        let a2 = Arc::clone(&a);

        assert!(*a == *a2);
        assert!(*a != *b);
    }
}
