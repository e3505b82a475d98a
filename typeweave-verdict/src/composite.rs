//! A descriptor that layers extra members over a resolved one.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use typeweave_core::{Instance, MemberRef, Reflect, Tag, TypeData, TypeError, TypeRef};

/// Wraps a resolved descriptor and adds a fixed set of members to it.
///
/// Name, tags, and instantiation come from the wrapped descriptor, which is
/// also reported as the base type, so ancestry tests see through the
/// wrapper. Two composites compare equal when they wrap equal descriptors.
pub struct CompositeTypeData {
    inner: TypeRef,
    extras: Arc<[MemberRef]>,
}

impl CompositeTypeData {
    /// Wrap `inner`, adding `extras`.
    pub fn new(inner: TypeRef, extras: Arc<[MemberRef]>) -> Self {
        Self { inner, extras }
    }

    /// The wrapped descriptor.
    pub fn inner(&self) -> &TypeRef {
        &self.inner
    }

    /// The added members.
    pub fn extra_members(&self) -> &[MemberRef] {
        &self.extras
    }
}

impl Reflect for CompositeTypeData {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn tags(&self) -> &[Tag] {
        self.inner.tags()
    }
}

impl TypeData for CompositeTypeData {
    fn base_type(&self) -> Option<TypeRef> {
        Some(Arc::clone(&self.inner))
    }

    fn members(&self) -> Vec<MemberRef> {
        let mut members = self.inner.members();
        members.extend(self.extras.iter().cloned());
        members
    }

    fn member(&self, name: &str) -> Option<MemberRef> {
        self.extras
            .iter()
            .find(|member| member.name() == name)
            .cloned()
            .or_else(|| self.inner.member(name))
    }

    fn create_instance(&self, args: &[serde_json::Value]) -> Result<Instance, TypeError> {
        self.inner.create_instance(args)
    }

    fn can_create_instance(&self) -> bool {
        self.inner.can_create_instance()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_eq(&self, other: &dyn TypeData) -> bool {
        other
            .as_any()
            .downcast_ref::<CompositeTypeData>()
            .is_some_and(|other| self.inner.type_eq(other.inner.as_ref()))
    }
}

impl fmt::Debug for CompositeTypeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTypeData")
            .field("inner", &self.inner.name())
            .field(
                "extras",
                &self.extras.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::ExtensionMember;
    use typeweave_core::test_utils::counter_type;
    use typeweave_core::{ClassType, Field, TypeDataExt, primitive};

    fn extra(name: &str) -> MemberRef {
        Arc::new(ExtensionMember::new(name, primitive::uint32(), 0u32))
    }

    fn wrap(inner: TypeRef, extras: Vec<MemberRef>) -> CompositeTypeData {
        CompositeTypeData::new(inner, extras.into())
    }

    fn names(members: &[MemberRef]) -> Vec<String> {
        members.iter().map(|m| m.name().to_string()).collect()
    }

    #[test]
    fn enumerates_inner_then_extras() {
        let composite = wrap(counter_type(), vec![extra("A"), extra("B")]);
        assert_eq!(names(&composite.members()), vec!["Value", "IsZero", "A", "B"]);
    }

    #[test]
    fn extra_shadows_inner_on_lookup() {
        let composite = wrap(counter_type(), vec![extra("Value")]);
        let found = composite.member("Value").unwrap();
        assert!(Arc::ptr_eq(&found, &composite.extra_members()[0]));
        assert!(composite.member("IsZero").is_some());
        assert!(composite.member("Missing").is_none());
    }

    #[test]
    fn forwards_identity_and_instantiation() {
        let composite = wrap(counter_type(), vec![extra("A")]);
        assert_eq!(composite.name(), "Counter");
        assert_eq!(composite.tags().len(), counter_type().tags().len());
        assert!(composite.can_create_instance());
        assert!(composite.create_instance(&[]).is_ok());
    }

    #[test]
    fn equal_when_wrapping_same_type() {
        let a = wrap(counter_type(), vec![extra("A")]);
        let b = wrap(counter_type(), vec![extra("B")]);
        let other = wrap(ClassType::builder("Counter").build(), vec![]);

        assert!(a.type_eq(&b));
        assert!(!a.type_eq(&other));
        // The bare type is a different descriptor than its wrapper.
        assert!(!a.type_eq(counter_type().as_ref()));
    }

    #[test]
    fn descends_through_wrapper() {
        let base = ClassType::builder("Base").build();
        let derived = ClassType::builder("Derived")
            .base(base.clone())
            .member(Field::new("Own", primitive::int64()))
            .build();
        let composite = wrap(derived.clone(), vec![extra("A")]);

        assert!(composite.descends_to(derived.as_ref()));
        assert!(composite.descends_to(base.as_ref()));
        assert_eq!(composite.base_type().unwrap().name(), "Derived");
    }
}
