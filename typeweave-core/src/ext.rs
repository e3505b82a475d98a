//! Helper operations over descriptors.
//!
//! These are blanket-implemented extension traits, so they are available on
//! concrete descriptors and on `dyn TypeData` / `dyn MemberData` alike.

use crate::descriptor::{Instance, MemberData, Reflect, TypeData};
use crate::error::MemberError;
use crate::tag::{DisplayTag, EnabledIfTag, HelpLinkTag};
use std::any::Any;

/// Tag lookup and display synthesis for any [`Reflect`] item.
pub trait ReflectExt: Reflect {
    /// The first tag of kind `T`, if any.
    fn tag<T: Any>(&self) -> Option<&T> {
        self.tags().iter().find_map(|tag| tag.downcast_ref::<T>())
    }

    /// All tags of kind `T`, in declaration order.
    fn tags_of<T: Any>(&self) -> Vec<&T> {
        self.tags()
            .iter()
            .filter_map(|tag| tag.downcast_ref::<T>())
            .collect()
    }

    /// Whether any tag of kind `T` is attached.
    fn has_tag<T: Any>(&self) -> bool {
        self.tags().iter().any(|tag| tag.is::<T>())
    }

    /// The attached [`DisplayTag`], or a synthesized one named after the item.
    fn display(&self) -> DisplayTag {
        self.tag::<DisplayTag>()
            .cloned()
            .unwrap_or_else(|| DisplayTag::fallback(self.name()))
    }
}

impl<R: Reflect + ?Sized> ReflectExt for R {}

/// Ancestry tests over the `base_type` chain.
pub trait TypeDataExt: TypeData {
    /// True if `base` is this type or one of its ancestors.
    fn descends_to(&self, base: &dyn TypeData) -> bool {
        if self.type_eq(base) {
            return true;
        }
        let mut current = self.base_type();
        while let Some(ty) = current {
            if ty.type_eq(base) {
                return true;
            }
            current = ty.base_type();
        }
        false
    }

    /// True if this type or one of its ancestors is named `name`.
    fn descends_to_name(&self, name: &str) -> bool {
        if self.name() == name {
            return true;
        }
        let mut current = self.base_type();
        while let Some(ty) = current {
            if ty.name() == name {
                return true;
            }
            current = ty.base_type();
        }
        false
    }
}

impl<T: TypeData + ?Sized> TypeDataExt for T {}

/// Documentation and enablement lookup for members.
pub trait MemberDataExt: MemberData {
    /// The member's own help link, or else its declaring type's.
    fn help_link(&self) -> Option<HelpLinkTag> {
        if let Some(link) = self.tag::<HelpLinkTag>() {
            return Some(link.clone());
        }
        self.declaring_type()
            .and_then(|ty| ty.tag::<HelpLinkTag>().cloned())
    }

    /// Evaluate every [`EnabledIfTag`] on this member against the current
    /// values of its sibling members on `owner`. Conditions naming a member
    /// that `owner_type` does not have are ignored.
    fn is_enabled(&self, owner_type: &dyn TypeData, owner: &Instance) -> Result<bool, MemberError> {
        for condition in self.tags_of::<EnabledIfTag>() {
            let Some(sibling) = owner_type.member(&condition.property) else {
                continue;
            };
            if !condition.is_enabled(&sibling.get_value(owner)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<M: MemberData + ?Sized> MemberDataExt for M {}
