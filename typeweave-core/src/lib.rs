//! # typeweave-core — descriptor model for run-time type resolution
//!
//! This crate defines the vocabulary every other typeweave crate speaks:
//! logical type descriptors, member descriptors, and the metadata tags
//! attached to both.
//!
//! ## The Model
//!
//! | Concept | Types | What it does |
//! |---------|-------|-------------|
//! | Type descriptor | [`TypeData`], [`TypeRef`] | Name, base type, members, instantiation |
//! | Member descriptor | [`MemberData`], [`MemberRef`] | Named, typed slot with bound get/set |
//! | Metadata tags | [`Tag`], [`DisplayTag`], [`HelpLinkTag`] | Statically attached descriptive records |
//! | Extensions | [`ReflectExt`], [`TypeDataExt`], [`MemberDataExt`] | Ancestry, tag lookup, display/help fallbacks |
//! | Manifests | [`ClassType`], [`Field`] | Descriptors built from explicit registration data |
//!
//! ## Instances and values
//!
//! Live objects are type-erased as [`Instance`] (`Arc<dyn Any + Send + Sync>`);
//! identity of an instance is the identity of its allocation. Member values
//! cross the dynamic boundary as `serde_json::Value`, so any serde type can
//! back a member without the descriptor knowing its concrete Rust type.
//!
//! Nothing here depends on host-language reflection. A type is whatever a
//! resolver says it is, and a [`ClassType`] is just one way to describe one.

#![deny(missing_docs)]

pub mod class;
pub mod descriptor;
pub mod error;
pub mod ext;
pub mod primitive;
pub mod tag;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use class::{ClassType, ClassTypeBuilder, Field, FieldMember};
pub use descriptor::{Instance, MemberData, MemberRef, Reflect, TypeData, TypeRef};
pub use error::{MemberError, TypeError};
pub use ext::{MemberDataExt, ReflectExt, TypeDataExt};
pub use tag::{DisplayTag, EnabledIfTag, HelpLinkTag, Tag, UnsweepableTag};
