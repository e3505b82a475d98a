//! Type descriptors built from explicit manifests.
//!
//! A [`ClassType`] describes a type from registration data instead of host
//! reflection: its name, base type, metadata tags, members, and an optional
//! constructor are all supplied up front through [`ClassType::builder`].
//!
//! ```
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use typeweave_core::{primitive, ClassType, Field, TypeData};
//!
//! #[derive(Default)]
//! struct Delay {
//!     millis: AtomicU32,
//! }
//!
//! let delay = ClassType::builder("Delay")
//!     .default_constructor::<Delay>()
//!     .member(
//!         Field::new("Millis", primitive::uint32())
//!             .getter(|d: &Delay| d.millis.load(Ordering::Relaxed))
//!             .setter(|d: &Delay, v: u32| d.millis.store(v, Ordering::Relaxed)),
//!     )
//!     .build();
//!
//! let instance = delay.create_instance(&[]).unwrap();
//! let millis = delay.member("Millis").unwrap();
//! millis.set_value(&instance, 250.into()).unwrap();
//! assert_eq!(millis.get_value(&instance).unwrap(), 250);
//! ```

use crate::descriptor::{Instance, MemberData, MemberRef, Reflect, TypeData, TypeRef};
use crate::error::{MemberError, TypeError};
use crate::tag::Tag;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, Weak};

type Constructor = Box<dyn Fn(&[serde_json::Value]) -> Result<Instance, TypeError> + Send + Sync>;
type Getter = Box<dyn Fn(&Instance) -> Result<serde_json::Value, MemberError> + Send + Sync>;
type Setter = Box<dyn Fn(&Instance, serde_json::Value) -> Result<(), MemberError> + Send + Sync>;

/// A type descriptor described by a manifest.
pub struct ClassType {
    name: String,
    base: Option<TypeRef>,
    tags: Vec<Tag>,
    members: Vec<Arc<FieldMember>>,
    constructor: Option<Constructor>,
    native: Option<TypeId>,
}

impl ClassType {
    /// Start describing a type called `name`.
    pub fn builder(name: impl Into<String>) -> ClassTypeBuilder {
        ClassTypeBuilder {
            name: name.into(),
            base: None,
            tags: Vec::new(),
            fields: Vec::new(),
            constructor: None,
            native: None,
        }
    }

    /// The native Rust type this class describes, if bound.
    pub fn native_type(&self) -> Option<TypeId> {
        self.native
    }

    /// Members declared directly on this type, excluding inherited ones.
    pub fn declared_members(&self) -> impl Iterator<Item = MemberRef> + '_ {
        self.members.iter().map(|m| Arc::clone(m) as MemberRef)
    }
}

impl Reflect for ClassType {
    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl TypeData for ClassType {
    fn base_type(&self) -> Option<TypeRef> {
        self.base.clone()
    }

    /// Inherited members first, then declared ones. A declared member hides
    /// an inherited member of the same name.
    fn members(&self) -> Vec<MemberRef> {
        let mut members: Vec<MemberRef> = match &self.base {
            Some(base) => base
                .members()
                .into_iter()
                .filter(|m| !self.members.iter().any(|own| own.name == m.name()))
                .collect(),
            None => Vec::new(),
        };
        members.extend(self.declared_members());
        members
    }

    fn member(&self, name: &str) -> Option<MemberRef> {
        if let Some(own) = self.members.iter().find(|m| m.name == name) {
            return Some(Arc::clone(own) as MemberRef);
        }
        self.base.as_ref().and_then(|base| base.member(name))
    }

    fn create_instance(&self, args: &[serde_json::Value]) -> Result<Instance, TypeError> {
        match &self.constructor {
            Some(construct) => construct(args),
            None => Err(TypeError::NotInstantiable(self.name.clone())),
        }
    }

    fn can_create_instance(&self) -> bool {
        self.constructor.is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassType")
            .field("name", &self.name)
            .field("base", &self.base.as_ref().map(|b| b.name().to_string()))
            .field(
                "members",
                &self.members.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            )
            .field("instantiable", &self.constructor.is_some())
            .finish()
    }
}

/// Builder for [`ClassType`].
pub struct ClassTypeBuilder {
    name: String,
    base: Option<TypeRef>,
    tags: Vec<Tag>,
    fields: Vec<Field>,
    constructor: Option<Constructor>,
    native: Option<TypeId>,
}

impl ClassTypeBuilder {
    /// Set the base type.
    pub fn base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    /// Attach a metadata tag.
    pub fn tag<T: Any + Send + Sync>(mut self, tag: T) -> Self {
        self.tags.push(Tag::new(tag));
        self
    }

    /// Declare a member.
    pub fn member(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Bind this class to the native Rust type `T`, so instances of `T`
    /// can be resolved to it.
    pub fn native<T: Any>(mut self) -> Self {
        self.native = Some(TypeId::of::<T>());
        self
    }

    /// Make the type instantiable through `construct`.
    pub fn constructor<F>(mut self, construct: F) -> Self
    where
        F: Fn(&[serde_json::Value]) -> Result<Instance, TypeError> + Send + Sync + 'static,
    {
        self.constructor = Some(Box::new(construct));
        self
    }

    /// Bind to `T` and construct instances with `T::default()`, ignoring arguments.
    pub fn default_constructor<T>(self) -> Self
    where
        T: Default + Any + Send + Sync,
    {
        self.native::<T>()
            .constructor(|_args| Ok(Arc::new(T::default()) as Instance))
    }

    /// Finish the type. Members receive a non-owning back-reference to it.
    pub fn build(self) -> Arc<ClassType> {
        let ClassTypeBuilder {
            name,
            base,
            tags,
            fields,
            constructor,
            native,
        } = self;
        Arc::new_cyclic(|declaring: &Weak<ClassType>| ClassType {
            name,
            base,
            tags,
            members: fields
                .into_iter()
                .map(|field| Arc::new(field.finish(declaring.clone())))
                .collect(),
            constructor,
            native,
        })
    }
}

/// Manifest entry for one member of a [`ClassType`].
pub struct Field {
    name: String,
    value_type: TypeRef,
    tags: Vec<Tag>,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl Field {
    /// Declare a member called `name` holding values of `value_type`.
    /// Without a getter or setter it is neither readable nor writable.
    pub fn new(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            value_type,
            tags: Vec::new(),
            getter: None,
            setter: None,
        }
    }

    /// Attach a metadata tag.
    pub fn tag<T: Any + Send + Sync>(mut self, tag: T) -> Self {
        self.tags.push(Tag::new(tag));
        self
    }

    /// Read the member from owners of native type `O`.
    pub fn getter<O, V, F>(mut self, get: F) -> Self
    where
        O: Any + Send + Sync,
        V: Serialize,
        F: Fn(&O) -> V + Send + Sync + 'static,
    {
        let member = self.name.clone();
        self.getter = Some(Box::new(move |owner: &Instance| {
            let owner = downcast_owner::<O>(owner, &member)?;
            serde_json::to_value(get(owner)).map_err(|e| MemberError::value(&member, e))
        }));
        self
    }

    /// Write the member on owners of native type `O`.
    ///
    /// Owners are shared, so `set` goes through interior mutability.
    pub fn setter<O, V, F>(mut self, set: F) -> Self
    where
        O: Any + Send + Sync,
        V: DeserializeOwned,
        F: Fn(&O, V) + Send + Sync + 'static,
    {
        let member = self.name.clone();
        self.setter = Some(Box::new(move |owner: &Instance, value: serde_json::Value| {
            let owner = downcast_owner::<O>(owner, &member)?;
            let value = serde_json::from_value(value).map_err(|e| MemberError::value(&member, e))?;
            set(owner, value);
            Ok(())
        }));
        self
    }

    fn finish(self, declaring: Weak<ClassType>) -> FieldMember {
        FieldMember {
            name: self.name,
            value_type: self.value_type,
            tags: self.tags,
            declaring,
            getter: self.getter,
            setter: self.setter,
        }
    }
}

fn downcast_owner<'a, O: Any>(owner: &'a Instance, member: &str) -> Result<&'a O, MemberError> {
    owner
        .downcast_ref::<O>()
        .ok_or_else(|| MemberError::OwnerType {
            member: member.to_string(),
            expected: std::any::type_name::<O>().to_string(),
        })
}

/// A member declared by a [`ClassType`] manifest.
pub struct FieldMember {
    name: String,
    value_type: TypeRef,
    tags: Vec<Tag>,
    declaring: Weak<ClassType>,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl Reflect for FieldMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl MemberData for FieldMember {
    fn declaring_type(&self) -> Option<TypeRef> {
        self.declaring.upgrade().map(|ty| ty as TypeRef)
    }

    fn value_type(&self) -> TypeRef {
        Arc::clone(&self.value_type)
    }

    fn readable(&self) -> bool {
        self.getter.is_some()
    }

    fn writable(&self) -> bool {
        self.setter.is_some()
    }

    fn get_value(&self, owner: &Instance) -> Result<serde_json::Value, MemberError> {
        match &self.getter {
            Some(get) => get(owner),
            None => Err(MemberError::NotReadable(self.name.clone())),
        }
    }

    fn set_value(&self, owner: &Instance, value: serde_json::Value) -> Result<(), MemberError> {
        match &self.setter {
            Some(set) => set(owner, value),
            None => Err(MemberError::ReadOnly(self.name.clone())),
        }
    }
}

impl fmt::Debug for FieldMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMember")
            .field("name", &self.name)
            .field("value_type", &self.value_type.name())
            .field("readable", &self.getter.is_some())
            .field("writable", &self.setter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Sensor {
        label: Mutex<String>,
    }

    struct Other;

    fn sensor_type() -> Arc<ClassType> {
        ClassType::builder("Sensor")
            .default_constructor::<Sensor>()
            .member(
                Field::new("Label", primitive::string())
                    .getter(|p: &Sensor| p.label.lock().unwrap().clone())
                    .setter(|p: &Sensor, v: String| *p.label.lock().unwrap() = v),
            )
            .member(Field::new("Kind", primitive::string()).getter(|_: &Sensor| "sensor"))
            .build()
    }

    #[test]
    fn get_and_set_through_descriptor() {
        let ty = sensor_type();
        let sensor = ty.create_instance(&[]).unwrap();
        let label = ty.member("Label").unwrap();

        label.set_value(&sensor, json!("north")).unwrap();
        assert_eq!(label.get_value(&sensor).unwrap(), json!("north"));
        assert_eq!(
            sensor.downcast_ref::<Sensor>().unwrap().label.lock().unwrap().as_str(),
            "north"
        );
    }

    #[test]
    fn readable_writable_follow_accessors() {
        let ty = sensor_type();
        let kind = ty.member("Kind").unwrap();
        assert!(kind.readable());
        assert!(!kind.writable());

        let sensor = ty.create_instance(&[]).unwrap();
        assert!(matches!(
            kind.set_value(&sensor, json!("x")),
            Err(MemberError::ReadOnly(_))
        ));
    }

    #[test]
    fn wrong_owner_is_an_error() {
        let ty = sensor_type();
        let other: Instance = Arc::new(Other);
        let err = ty.member("Label").unwrap().get_value(&other).unwrap_err();
        assert!(matches!(err, MemberError::OwnerType { .. }));
    }

    #[test]
    fn bad_value_is_an_error() {
        let ty = sensor_type();
        let sensor = ty.create_instance(&[]).unwrap();
        let err = ty
            .member("Label")
            .unwrap()
            .set_value(&sensor, json!(42))
            .unwrap_err();
        assert!(matches!(err, MemberError::Value { .. }));
    }

    #[test]
    fn unknown_member_is_none() {
        assert!(sensor_type().member("Nope").is_none());
    }

    #[test]
    fn abstract_type_cannot_be_instantiated() {
        let ty = ClassType::builder("Shape").build();
        assert!(!ty.can_create_instance());
        assert!(matches!(
            ty.create_instance(&[]),
            Err(TypeError::NotInstantiable(name)) if name == "Shape"
        ));
    }

    #[test]
    fn declaring_type_is_back_reference() {
        let ty = sensor_type();
        let label = ty.member("Label").unwrap();
        let declaring = label.declaring_type().unwrap();
        assert!(declaring.type_eq(ty.as_ref()));

        drop(declaring);
        drop(ty);
        assert!(label.declaring_type().is_none());
    }

    #[test]
    fn members_include_inherited_with_shadowing() {
        let base = ClassType::builder("Base")
            .member(Field::new("Id", primitive::int64()))
            .member(Field::new("Name", primitive::string()))
            .build();
        let derived = ClassType::builder("Derived")
            .base(base.clone())
            .member(Field::new("Name", primitive::string()).getter(|_: &Sensor| "derived"))
            .member(Field::new("Extra", primitive::boolean()))
            .build();

        let names: Vec<String> = derived
            .members()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["Id", "Name", "Extra"]);

        let name = derived.member("Name").unwrap();
        assert!(name.readable());
        assert!(derived.member("Id").is_some());
        assert_eq!(derived.declared_members().count(), 2);
    }

    #[test]
    fn constructor_receives_arguments() {
        let ty = ClassType::builder("Sized")
            .constructor(|args| match args {
                [size] => Ok(Arc::new(size.as_u64().unwrap_or(0)) as Instance),
                _ => Err(TypeError::Arguments {
                    type_name: "Sized".into(),
                    message: format!("expected 1 argument, got {}", args.len()),
                }),
            })
            .build();

        let instance = ty.create_instance(&[json!(7)]).unwrap();
        assert_eq!(instance.downcast_ref::<u64>(), Some(&7));
        assert!(matches!(
            ty.create_instance(&[]),
            Err(TypeError::Arguments { .. })
        ));
    }

    #[test]
    fn native_binding() {
        assert_eq!(sensor_type().native_type(), Some(TypeId::of::<Sensor>()));
        assert_eq!(ClassType::builder("Unbound").build().native_type(), None);
    }
}
