//! This crate provides the core logic for keeping S3 bucket policies in sync
//! with a CDN provider's published edge IP ranges:
//! - IP range retrieval from the provider's public endpoint
//! - Bucket target resolution from configuration
//! - Policy synthesis (deterministic JSON generation)
//! - Policy application through the S3 API
//!

pub mod aws;
mod cdn;
pub mod commands;
mod config;
mod error;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use aws::{apply_bucket_policy, BucketPolicyStore, S3PolicyStore};
pub use cdn::{IpRangeFetcher, CLOUDFLARE_IPS_URL};
pub use commands::{plan, PolicySyncService};
pub use config::{resolve_buckets, SyncConfig, BUCKET_DELIMITER, DEFAULT_PARTITION};
pub use error::{ErrorKind, SyncError, SyncResult};
pub use synthesis::{bucket_object_arn, build_bucket_policy};
pub use types::{
    ApplyOptions, BucketOutcome, BucketPlan, BucketStatus, Condition, ErrorDetail,
    InvocationResponse, IpAddressCondition, IpRangeSet, PolicyDocument, Statement, SyncPlan,
    SyncReport,
};
