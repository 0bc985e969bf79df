//! Invocation configuration and bucket target resolution

use crate::cdn::CLOUDFLARE_IPS_URL;
use crate::error::{SyncError, SyncResult};

/// Separator between bucket names in the configured target list.
pub const BUCKET_DELIMITER: char = ',';

/// ARN partition used when none is configured.
pub const DEFAULT_PARTITION: &str = "aws";

/// Configuration for a single synchronization run.
///
/// Built by the caller for each invocation; nothing here is read from
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Comma-separated bucket names, as provided by the operator.
    pub bucket_names: Option<String>,
    /// ARN partition the buckets live in (`aws`, `aws-cn`, `aws-us-gov`).
    pub partition: String,
    /// Endpoint publishing the CDN provider's IP ranges.
    pub ip_ranges_url: String,
}

impl SyncConfig {
    pub fn new(bucket_names: Option<String>) -> Self {
        Self {
            bucket_names,
            partition: DEFAULT_PARTITION.to_string(),
            ip_ranges_url: CLOUDFLARE_IPS_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }

    #[must_use]
    pub fn with_ip_ranges_url(mut self, url: impl Into<String>) -> Self {
        self.ip_ranges_url = url.into();
        self
    }

    pub fn buckets(&self) -> SyncResult<Vec<String>> {
        resolve_buckets(self.bucket_names.as_deref())
    }
}

/// Split the configured bucket list into ordered targets.
///
/// Names are not trimmed: `"a, b"` yields `"a"` and `" b"`. A missing value or
/// one whose first entry is empty means nothing is configured.
pub fn resolve_buckets(raw: Option<&str>) -> SyncResult<Vec<String>> {
    let buckets: Vec<String> = raw
        .unwrap_or_default()
        .split(BUCKET_DELIMITER)
        .map(str::to_string)
        .collect();

    if buckets.first().map_or(true, String::is_empty) {
        return Err(SyncError::configuration("BUCKET_NAME not set"));
    }
    Ok(buckets)
}
