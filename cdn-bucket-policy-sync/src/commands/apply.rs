//! Apply logic: writes each planned policy, isolating per-bucket failures.

use crate::aws::apply_bucket_policy;
use crate::types::{ApplyOptions, BucketOutcome, BucketStatus, SyncPlan, SyncReport};

impl super::service::PolicySyncService {
    /// Write every planned policy in order and report the outcome per bucket.
    ///
    /// A failed write is recorded and the remaining buckets are still
    /// attempted, unless `abort_on_error` is set, in which case the rest are
    /// marked as not attempted.
    pub async fn apply(&self, plan: &SyncPlan, options: ApplyOptions) -> SyncReport {
        let mut outcomes = Vec::with_capacity(plan.buckets.len());
        let mut aborted = false;

        for target in &plan.buckets {
            let status = if aborted {
                BucketStatus::NotAttempted
            } else if options.dry_run {
                log::info!("Dry run: skipping policy update for '{}'", target.bucket);
                BucketStatus::Planned
            } else {
                match apply_bucket_policy(self.store.as_ref(), &target.bucket, &target.policy)
                    .await
                {
                    Ok(()) => {
                        log::info!("Updated bucket policy for '{}'", target.bucket);
                        BucketStatus::Applied
                    }
                    Err(e) => {
                        log::warn!("{e}");
                        aborted = options.abort_on_error;
                        BucketStatus::Failed {
                            message: e.to_string(),
                        }
                    }
                }
            };

            outcomes.push(BucketOutcome {
                bucket: target.bucket.clone(),
                status,
            });
        }

        SyncReport {
            ip_range_count: plan.ip_ranges.len(),
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::aws::BucketPolicyStore;
    use crate::commands::plan::build_plan;
    use crate::commands::PolicySyncService;
    use crate::error::{SyncError, SyncResult};
    use crate::types::{ApplyOptions, BucketStatus, IpRangeSet};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records writes and rejects buckets listed in `reject`.
    #[derive(Default)]
    struct RecordingStore {
        reject: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BucketPolicyStore for RecordingStore {
        async fn put_bucket_policy(&self, bucket: &str, _policy_json: &str) -> SyncResult<()> {
            self.calls.lock().unwrap().push(bucket.to_string());
            if self.reject.iter().any(|b| b == bucket) {
                return Err(SyncError::apply(bucket, "NoSuchBucket"));
            }
            Ok(())
        }
    }

    fn sample_plan(buckets: &[&str]) -> crate::types::SyncPlan {
        build_plan(
            IpRangeSet::new(vec!["1.2.3.0/24".into()], vec![]),
            buckets.iter().map(|b| (*b).to_string()).collect(),
            "aws",
        )
    }

    #[tokio::test]
    async fn test_apply_continues_after_failure() {
        let store = Arc::new(RecordingStore {
            reject: vec!["b".into()],
            ..Default::default()
        });
        let service = PolicySyncService::with_store(store.clone());

        let report = service
            .apply(&sample_plan(&["a", "b", "c"]), ApplyOptions::default())
            .await;

        assert_eq!(*store.calls.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(report.outcomes[0].status, BucketStatus::Applied);
        assert!(matches!(report.outcomes[1].status, BucketStatus::Failed { .. }));
        assert_eq!(report.outcomes[2].status, BucketStatus::Applied);
        assert_eq!(report.failed_buckets(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_apply_abort_on_error_stops_processing() {
        let store = Arc::new(RecordingStore {
            reject: vec!["b".into()],
            ..Default::default()
        });
        let service = PolicySyncService::with_store(store.clone());
        let options = ApplyOptions {
            abort_on_error: true,
            ..Default::default()
        };

        let report = service.apply(&sample_plan(&["a", "b", "c"]), options).await;

        assert_eq!(*store.calls.lock().unwrap(), vec!["a", "b"]);
        assert_eq!(report.outcomes[2].status, BucketStatus::NotAttempted);
        assert_eq!(report.failed_buckets(), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_apply_dry_run_writes_nothing() {
        let store = Arc::new(RecordingStore::default());
        let service = PolicySyncService::with_store(store.clone());
        let options = ApplyOptions {
            dry_run: true,
            ..Default::default()
        };

        let report = service.apply(&sample_plan(&["a", "b"]), options).await;

        assert!(store.calls.lock().unwrap().is_empty());
        assert!(report.is_complete_success());
        assert!(report
            .outcomes
            .iter()
            .all(|o| o.status == BucketStatus::Planned));
    }
}
