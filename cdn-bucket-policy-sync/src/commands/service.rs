//! Policy Sync Service Layer
//!
//! The service holds the policy store and exposes the high-level operations
//! (apply, sync, handle) used by the CLI and any other invocation surface.

use crate::aws::{BucketPolicyStore, S3PolicyStore};
use std::sync::Arc;

/// Main service struct that holds the bucket policy store
pub struct PolicySyncService {
    pub(crate) store: Arc<dyn BucketPolicyStore>,
}

impl PolicySyncService {
    /// Create a service writing to S3 through the default credential provider chain.
    ///
    /// `region` overrides the region resolved from the environment.
    pub async fn new(region: Option<String>) -> Self {
        Self::with_store(Arc::new(S3PolicyStore::from_env(region).await))
    }

    /// Create a service on top of an existing store.
    pub fn with_store(store: Arc<dyn BucketPolicyStore>) -> Self {
        Self { store }
    }

    // apply() is in apply.rs
    // sync() and handle() are in sync.rs
}
