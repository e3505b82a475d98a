//! Fixtures for testing descriptor consumers.
//!
//! Available behind the `test-utils` feature flag.

mod counter;
mod hierarchy;

pub use counter::{Counter, counter_type};
pub use hierarchy::linear_hierarchy;
