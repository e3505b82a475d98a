#![deny(missing_docs)]
//! Extension decorator for typeweave: virtual members on types the
//! decorator does not own.
//!
//! [`ExtensionDecorator`] is a chain-aware resolver. It resolves through the
//! rest of the chain and wraps qualifying descriptors in a
//! [`CompositeTypeData`] that adds a fixed set of [`ExtensionMember`]s.
//! Extension members keep per-instance values in side storage that never
//! keeps an instance alive.
//!
//! [`verdict_decorator`] is the stock decorator: every type descending to
//! [`step_type`] gains a [`VerdictBehavior`] member and a retry count.
//!
//! ```
//! use std::sync::Arc;
//! use typeweave_chain::{ResolveError, Resolver, ResolverRegistry};
//! use typeweave_core::{ClassType, Instance, MemberData, TypeData, TypeRef};
//! use typeweave_verdict::{step_type, verdict_decorator, VerdictBehavior};
//!
//! # struct StepTable(Arc<ClassType>);
//! # impl typeweave_chain::TypeDataProvider for StepTable {
//! #     fn type_data(&self, id: &str) -> Result<Option<TypeRef>, ResolveError> {
//! #         Ok((id == "Delay").then(|| self.0.clone() as TypeRef))
//! #     }
//! #     fn type_data_of(&self, _: &Instance) -> Result<Option<TypeRef>, ResolveError> {
//! #         Ok(None)
//! #     }
//! #     fn priority(&self) -> f64 { 1.0 }
//! # }
//! let delay = ClassType::builder("Delay").base(step_type()).build();
//! let registry = ResolverRegistry::new()
//!     .with(Resolver::direct(StepTable(delay)))
//!     .with(Resolver::stacked(verdict_decorator()));
//!
//! let ty = registry.resolve("Delay").unwrap().unwrap();
//! let step: Instance = Arc::new(());
//! let behavior = ty.member("VerdictBehavior").unwrap();
//! behavior
//!     .set_value(&step, serde_json::to_value(VerdictBehavior::BREAK_ON_FAIL).unwrap())
//!     .unwrap();
//! assert_eq!(typeweave_verdict::verdict_behavior(&step), VerdictBehavior::BREAK_ON_FAIL);
//! ```

pub mod behavior;
pub mod composite;
pub mod decorator;
pub mod member;
pub mod step;

pub use behavior::VerdictBehavior;
pub use composite::CompositeTypeData;
pub use decorator::ExtensionDecorator;
pub use member::{ExtensionMember, ExtensionValue};
pub use step::{
    RETRY_COUNT, TEST_STEP, VERDICT_BEHAVIOR, is_step_type, retry_count, retry_count_member,
    set_retry_count, set_verdict_behavior, step_type, verdict_behavior, verdict_behavior_member,
    verdict_decorator,
};
