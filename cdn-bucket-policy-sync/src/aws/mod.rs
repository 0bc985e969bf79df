//! AWS integration: the bucket policy write path.

pub(crate) mod s3_client;

use crate::error::{SyncError, SyncResult};
use crate::types::PolicyDocument;
use async_trait::async_trait;

pub use s3_client::S3PolicyStore;

/// Destination for bucket policies.
///
/// A write replaces the bucket's whole policy; nothing is merged with what was
/// there before.
#[async_trait]
pub trait BucketPolicyStore: Send + Sync {
    async fn put_bucket_policy(&self, bucket: &str, policy_json: &str) -> SyncResult<()>;
}

/// Serialize `policy` and overwrite the policy of `bucket` with it.
pub async fn apply_bucket_policy(
    store: &dyn BucketPolicyStore,
    bucket: &str,
    policy: &PolicyDocument,
) -> SyncResult<()> {
    let policy_json = serde_json::to_string(policy)
        .map_err(|e| SyncError::apply(bucket, format!("Failed to serialize policy: {e}")))?;
    store.put_bucket_policy(bucket, &policy_json).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::build_bucket_policy;
    use crate::types::IpRangeSet;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        policies: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl BucketPolicyStore for MemoryStore {
        async fn put_bucket_policy(&self, bucket: &str, policy_json: &str) -> SyncResult<()> {
            self.policies
                .lock()
                .unwrap()
                .insert(bucket.to_string(), policy_json.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_apply_overwrites_previous_policy() {
        let store = MemoryStore::default();
        store
            .policies
            .lock()
            .unwrap()
            .insert("b".into(), r#"{"Statement":[{"Sid":"Custom"}]}"#.into());

        let ranges = IpRangeSet::new(vec!["1.2.3.0/24".into()], vec![]);
        let policy = build_bucket_policy("b", &ranges, "aws");
        apply_bucket_policy(&store, "b", &policy).await.unwrap();

        let stored = store.policies.lock().unwrap().get("b").cloned().unwrap();
        assert!(!stored.contains("Custom"));
        assert_eq!(stored, serde_json::to_string(&policy).unwrap());
    }

    #[tokio::test]
    async fn test_apply_twice_is_idempotent() {
        let store = MemoryStore::default();
        let ranges = IpRangeSet::new(vec!["1.2.3.0/24".into()], vec!["::1/128".into()]);
        let policy = build_bucket_policy("b", &ranges, "aws");

        apply_bucket_policy(&store, "b", &policy).await.unwrap();
        let first = store.policies.lock().unwrap().get("b").cloned();
        apply_bucket_policy(&store, "b", &policy).await.unwrap();
        let second = store.policies.lock().unwrap().get("b").cloned();

        assert_eq!(first, second);
        assert_eq!(store.policies.lock().unwrap().len(), 1);
    }
}
