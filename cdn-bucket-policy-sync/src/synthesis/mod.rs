//! Policy synthesis (deterministic JSON generation)

pub mod policy_builder;

pub use policy_builder::{bucket_object_arn, build_bucket_policy};
