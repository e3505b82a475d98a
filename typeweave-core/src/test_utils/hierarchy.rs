//! Linear type hierarchies.

use crate::class::ClassType;
use crate::descriptor::TypeRef;
use std::sync::Arc;

/// Build one abstract class per name, each deriving from the previous one.
///
/// `linear_hierarchy(&["Root", "Mid", "Leaf"])` yields `[Root, Mid, Leaf]`
/// where `Leaf`'s base is `Mid` and `Mid`'s base is `Root`.
pub fn linear_hierarchy(names: &[&str]) -> Vec<Arc<ClassType>> {
    let mut types: Vec<Arc<ClassType>> = Vec::with_capacity(names.len());
    for name in names {
        let mut builder = ClassType::builder(*name);
        if let Some(parent) = types.last() {
            builder = builder.base(Arc::clone(parent) as TypeRef);
        }
        types.push(builder.build());
    }
    types
}
