//! A small instantiable native type with a class manifest.

use crate::class::{ClassType, Field};
use crate::primitive;
use crate::tag::{DisplayTag, HelpLinkTag};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, LazyLock};

/// A native type with one writable and one read-only member.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicI64,
}

impl Counter {
    /// Current value.
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Overwrite the value.
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::SeqCst);
    }
}

static COUNTER: LazyLock<Arc<ClassType>> = LazyLock::new(|| {
    ClassType::builder("Counter")
        .default_constructor::<Counter>()
        .tag(DisplayTag::new("Counter").with_description("Counts things"))
        .tag(HelpLinkTag::new("docs/counter.html"))
        .member(
            Field::new("Value", primitive::int64())
                .getter(Counter::value)
                .setter(Counter::set),
        )
        .member(Field::new("IsZero", primitive::boolean()).getter(|c: &Counter| c.value() == 0))
        .build()
});

/// The shared descriptor for [`Counter`].
pub fn counter_type() -> Arc<ClassType> {
    Arc::clone(&*COUNTER)
}
