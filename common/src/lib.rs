//! Shared Stockroom utilities: deterministic style-class composition for the
//! dashboard layer and environment guards for test harnesses.

pub mod classes;
pub mod test_support;

pub use classes::{
    ClassGroups, ClassInput, ClassMerger, GroupRule, GroupTable, Matcher, ValueKind, merge,
};
pub use test_support::EnvOverride;
