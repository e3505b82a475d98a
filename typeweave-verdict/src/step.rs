//! The test-step category and its verdict members.

use crate::behavior::VerdictBehavior;
use crate::decorator::ExtensionDecorator;
use crate::member::ExtensionMember;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use typeweave_core::{
    ClassType, DisplayTag, EnabledIfTag, HelpLinkTag, Instance, MemberRef, TypeData, TypeDataExt,
    TypeRef, UnsweepableTag, primitive,
};

/// Name of the test-step category type.
pub const TEST_STEP: &str = "TestStep";

/// Name of the verdict behavior member.
pub const VERDICT_BEHAVIOR: &str = "VerdictBehavior";

/// Name of the retry count member.
pub const RETRY_COUNT: &str = "RetryCount";

const COMMON_GROUP: &str = "Common";

static STEP_TYPE: LazyLock<TypeRef> = LazyLock::new(|| {
    ClassType::builder(TEST_STEP)
        .tag(DisplayTag::new("Test Step").with_description("A unit of work in a test plan."))
        .tag(HelpLinkTag::new("docs/test-steps.html"))
        .build() as TypeRef
});

static BEHAVIOR_TYPE: LazyLock<TypeRef> = LazyLock::new(|| {
    ClassType::builder(VERDICT_BEHAVIOR)
        .default_constructor::<VerdictBehavior>()
        .tag(DisplayTag::new("Verdict Behavior"))
        .build() as TypeRef
});

static BEHAVIOR_MEMBER: LazyLock<Arc<ExtensionMember<VerdictBehavior>>> = LazyLock::new(|| {
    Arc::new(
        ExtensionMember::new(
            VERDICT_BEHAVIOR,
            Arc::clone(&*BEHAVIOR_TYPE),
            VerdictBehavior::default(),
        )
        .declared_on(&STEP_TYPE)
        .tag(
            DisplayTag::new("Verdict Behavior")
                .with_description("How the run reacts to the verdict of this step.")
                .with_group(COMMON_GROUP)
                .with_order(20001.1),
        )
        .tag(UnsweepableTag),
    )
});

static RETRY_MEMBER: LazyLock<Arc<ExtensionMember<u32>>> = LazyLock::new(|| {
    let retry_flags = VerdictBehavior::RETRY.bits();
    Arc::new(
        ExtensionMember::new(RETRY_COUNT, primitive::uint32(), 0)
            .declared_on(&STEP_TYPE)
            .tag(
                DisplayTag::new("Retries")
                    .with_description("How many times the step is run again after a retry verdict.")
                    .with_group(COMMON_GROUP)
                    .with_order(20001.2),
            )
            .tag(
                EnabledIfTag::new(VERDICT_BEHAVIOR, vec![json!(retry_flags)])
                    .flags()
                    .hide_if_disabled(),
            )
            .tag(
                EnabledIfTag::new(VERDICT_BEHAVIOR, vec![json!(VerdictBehavior::INHERIT.bits())])
                    .flags()
                    .hide_if_disabled()
                    .invert(),
            )
            .tag(UnsweepableTag),
    )
});

/// The abstract test-step type. Types descending to it get verdict members.
pub fn step_type() -> TypeRef {
    Arc::clone(&*STEP_TYPE)
}

/// The verdict behavior extension member.
pub fn verdict_behavior_member() -> Arc<ExtensionMember<VerdictBehavior>> {
    Arc::clone(&*BEHAVIOR_MEMBER)
}

/// The retry count extension member.
pub fn retry_count_member() -> Arc<ExtensionMember<u32>> {
    Arc::clone(&*RETRY_MEMBER)
}

/// Whether `ty` is a test step.
pub fn is_step_type(ty: &dyn TypeData) -> bool {
    ty.descends_to(STEP_TYPE.as_ref())
}

/// A decorator adding [`VERDICT_BEHAVIOR`] and [`RETRY_COUNT`] to every
/// type descending to [`step_type`].
pub fn verdict_decorator() -> ExtensionDecorator {
    let members = vec![
        verdict_behavior_member() as MemberRef,
        retry_count_member() as MemberRef,
    ];
    ExtensionDecorator::new("verdict", members, is_step_type)
}

/// Verdict behavior of `step`.
pub fn verdict_behavior(step: &Instance) -> VerdictBehavior {
    BEHAVIOR_MEMBER.get(step)
}

/// Set the verdict behavior of `step`.
pub fn set_verdict_behavior(step: &Instance, behavior: VerdictBehavior) {
    BEHAVIOR_MEMBER.set(step, behavior);
}

/// Retry count of `step`.
pub fn retry_count(step: &Instance) -> u32 {
    RETRY_MEMBER.get(step)
}

/// Set the retry count of `step`.
pub fn set_retry_count(step: &Instance, retries: u32) {
    RETRY_MEMBER.set(step, retries);
}
