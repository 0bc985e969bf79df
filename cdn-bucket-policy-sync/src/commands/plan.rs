//! Plan creation: fetch ranges, resolve targets, build one policy per bucket.

use crate::cdn::IpRangeFetcher;
use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::synthesis::build_bucket_policy;
use crate::types::{BucketPlan, IpRangeSet, SyncPlan};

/// Create the policies for every configured bucket without writing anything.
///
/// The ranges are fetched before the bucket list is resolved, so a missing
/// bucket configuration is still reported after one request to the CDN.
pub async fn plan(config: &SyncConfig) -> SyncResult<SyncPlan> {
    let fetcher = IpRangeFetcher::new()?.with_endpoint(config.ip_ranges_url.as_str());
    let ip_ranges = fetcher.fetch().await?;
    let buckets = config.buckets()?;
    Ok(build_plan(ip_ranges, buckets, &config.partition))
}

pub(crate) fn build_plan(ip_ranges: IpRangeSet, buckets: Vec<String>, partition: &str) -> SyncPlan {
    let buckets = buckets
        .into_iter()
        .map(|bucket| {
            let policy = build_bucket_policy(&bucket, &ip_ranges, partition);
            BucketPlan { bucket, policy }
        })
        .collect();
    SyncPlan { ip_ranges, buckets }
}
