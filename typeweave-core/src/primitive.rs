//! Shared descriptors for primitive value types.
//!
//! Each primitive is a process-wide [`ClassType`] bound to its Rust type, so
//! descriptor identity is stable across calls.

use crate::class::ClassType;
use crate::descriptor::TypeRef;
use std::sync::{Arc, LazyLock};

macro_rules! primitive {
    ($fn_name:ident, $static_name:ident, $name:expr, $ty:ty) => {
        static $static_name: LazyLock<Arc<ClassType>> =
            LazyLock::new(|| ClassType::builder($name).default_constructor::<$ty>().build());

        #[doc = concat!("Descriptor for `", $name, "` values.")]
        pub fn $fn_name() -> TypeRef {
            Arc::clone(&*$static_name) as TypeRef
        }
    };
}

primitive!(boolean, BOOLEAN, "bool", bool);
primitive!(int64, INT64, "i64", i64);
primitive!(uint32, UINT32, "u32", u32);
primitive!(float64, FLOAT64, "f64", f64);
primitive!(string, STRING, "string", String);

/// All primitive descriptors as class types, for registering with a resolver.
pub fn all() -> Vec<Arc<ClassType>> {
    vec![
        Arc::clone(&*BOOLEAN),
        Arc::clone(&*INT64),
        Arc::clone(&*UINT32),
        Arc::clone(&*FLOAT64),
        Arc::clone(&*STRING),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Reflect;
    use std::any::TypeId;

    #[test]
    fn primitives_are_singletons() {
        assert!(*uint32() == *uint32());
        assert!(*uint32() != *int64());
    }

    #[test]
    fn primitives_bind_native_types() {
        let natives: Vec<_> = all().iter().map(|ty| ty.native_type()).collect();
        assert!(natives.contains(&Some(TypeId::of::<u32>())));
        assert!(natives.contains(&Some(TypeId::of::<String>())));
        assert_eq!(string().name(), "string");
    }
}
