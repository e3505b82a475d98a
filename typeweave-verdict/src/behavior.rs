//! How a step reacts to the verdicts of its run.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Break and retry policy of a test step, as a set of flags.
///
/// Serializes as its raw bits, so `BREAK_ON_FAIL | RETRY_ON_ERROR` is `20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerdictBehavior(u32);

bitflags! {
    impl VerdictBehavior: u32 {
        /// Use the behavior of the enclosing step or plan.
        const INHERIT = 1;
        /// Stop the run when the step's verdict is Error.
        const BREAK_ON_ERROR = 2;
        /// Stop the run when the step's verdict is Fail.
        const BREAK_ON_FAIL = 4;
        /// Stop the run when the step's verdict is Inconclusive.
        const BREAK_ON_INCONCLUSIVE = 8;
        /// Run the step again when its verdict is Error.
        const RETRY_ON_ERROR = 16;
        /// Run the step again when its verdict is Fail.
        const RETRY_ON_FAIL = 32;
        /// Run the step again when its verdict is Inconclusive.
        const RETRY_ON_INCONCLUSIVE = 64;
    }
}

impl VerdictBehavior {
    /// All break flags.
    pub const BREAK: Self = Self::BREAK_ON_ERROR
        .union(Self::BREAK_ON_FAIL)
        .union(Self::BREAK_ON_INCONCLUSIVE);

    /// All retry flags.
    pub const RETRY: Self = Self::RETRY_ON_ERROR
        .union(Self::RETRY_ON_FAIL)
        .union(Self::RETRY_ON_INCONCLUSIVE);

    /// Whether any retry flag is set, which is when a retry count applies.
    pub fn retries(self) -> bool {
        self.intersects(Self::RETRY)
    }

    /// Whether any break flag is set.
    pub fn breaks(self) -> bool {
        self.intersects(Self::BREAK)
    }

    /// Display names of the set flags, in bit order.
    pub fn labels(self) -> Vec<&'static str> {
        LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }
}

impl Default for VerdictBehavior {
    fn default() -> Self {
        Self::INHERIT
    }
}

const LABELS: [(VerdictBehavior, &str); 7] = [
    (VerdictBehavior::INHERIT, "Inherit behavior"),
    (VerdictBehavior::BREAK_ON_ERROR, "Break on Error"),
    (VerdictBehavior::BREAK_ON_FAIL, "Break on Fail"),
    (VerdictBehavior::BREAK_ON_INCONCLUSIVE, "Break on Inconclusive"),
    (VerdictBehavior::RETRY_ON_ERROR, "Retry on Error"),
    (VerdictBehavior::RETRY_ON_FAIL, "Retry on Fail"),
    (VerdictBehavior::RETRY_ON_INCONCLUSIVE, "Retry on Inconclusive"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_inherit() {
        assert_eq!(VerdictBehavior::default(), VerdictBehavior::INHERIT);
        assert_eq!(VerdictBehavior::default().bits(), 1);
    }

    #[test]
    fn serializes_as_bits() {
        let behavior = VerdictBehavior::BREAK_ON_FAIL | VerdictBehavior::RETRY_ON_ERROR;
        assert_eq!(serde_json::to_value(behavior).unwrap(), serde_json::json!(20));

        let back: VerdictBehavior = serde_json::from_value(serde_json::json!(20)).unwrap();
        assert_eq!(back, behavior);
    }

    #[test]
    fn retry_and_break_groups() {
        assert!(VerdictBehavior::RETRY_ON_FAIL.retries());
        assert!(!VerdictBehavior::BREAK_ON_FAIL.retries());
        assert!(VerdictBehavior::BREAK_ON_INCONCLUSIVE.breaks());
        assert_eq!(VerdictBehavior::RETRY.bits(), 16 | 32 | 64);
        assert_eq!(VerdictBehavior::BREAK.bits(), 2 | 4 | 8);
    }

    #[test]
    fn labels_in_bit_order() {
        let behavior = VerdictBehavior::RETRY_ON_ERROR | VerdictBehavior::BREAK_ON_FAIL;
        assert_eq!(behavior.labels(), vec!["Break on Fail", "Retry on Error"]);
    }
}
