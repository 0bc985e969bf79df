//! Shared data types: IP ranges, policy documents, plans, reports and
//! invocation responses.

use crate::error::{ErrorKind, SyncError};
use serde::{Deserialize, Serialize};

/// Ordered CIDR list published by the CDN provider: IPv4 entries first, then IPv6.
///
/// Entries are kept as the provider sent them, without validation or dedup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRangeSet {
    pub cidrs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl IpRangeSet {
    pub fn new(ipv4_cidrs: Vec<String>, ipv6_cidrs: Vec<String>) -> Self {
        let mut cidrs = ipv4_cidrs;
        cidrs.extend(ipv6_cidrs);
        Self { cidrs, etag: None }
    }

    #[must_use]
    pub fn with_etag(mut self, etag: Option<String>) -> Self {
        self.etag = etag;
        self
    }

    pub fn len(&self) -> usize {
        self.cidrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cidrs.is_empty()
    }
}

/// Bucket access policy document in the S3 policy language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub sid: String,
    pub effect: String,
    pub principal: String,
    pub action: String,
    pub resource: String,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "IpAddress")]
    pub ip_address: IpAddressCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddressCondition {
    #[serde(rename = "aws:SourceIp")]
    pub source_ip: Vec<String>,
}

/// Policy prepared for a single bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketPlan {
    pub bucket: String,
    pub policy: PolicyDocument,
}

/// Everything needed to update the targets, computed before any write happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    pub ip_ranges: IpRangeSet,
    pub buckets: Vec<BucketPlan>,
}

/// Options controlling how a plan is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Build the documents but skip every write.
    pub dry_run: bool,
    /// Stop at the first failed bucket instead of continuing with the rest.
    pub abort_on_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum BucketStatus {
    Applied,
    Planned,
    Failed { message: String },
    NotAttempted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketOutcome {
    pub bucket: String,
    #[serde(flatten)]
    pub status: BucketStatus,
}

impl BucketOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, BucketStatus::Applied | BucketStatus::Planned)
    }
}

/// Per-bucket results of one synchronization run, in target order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub ip_range_count: usize,
    pub outcomes: Vec<BucketOutcome>,
}

impl SyncReport {
    /// Buckets whose policy was not updated, either because the write failed
    /// or because processing stopped before reaching them.
    pub fn failed_buckets(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_success())
            .map(|outcome| outcome.bucket.clone())
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.outcomes.iter().all(BucketOutcome::is_success)
    }

    fn first_failure_message(&self) -> Option<&str> {
        self.outcomes.iter().find_map(|outcome| match &outcome.status {
            BucketStatus::Failed { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub message: String,
}

/// Structured status returned from every exit path of an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_buckets: Vec<String>,
}

impl InvocationResponse {
    pub fn from_error(error: &SyncError) -> Self {
        Self {
            status_code: error.status_code(),
            body: error.to_string(),
            error: Some(ErrorDetail {
                kind: error.kind(),
                message: error.to_string(),
            }),
            failed_buckets: Vec::new(),
        }
    }

    pub fn from_report(report: &SyncReport) -> Self {
        let total = report.outcomes.len();
        let succeeded = report.success_count();

        if report.is_complete_success() {
            let dry_run = report
                .outcomes
                .iter()
                .any(|o| matches!(o.status, BucketStatus::Planned));
            let verb = if dry_run { "Planned" } else { "Updated" };
            return Self {
                status_code: 200,
                body: format!(
                    "{verb} bucket policy for {total} bucket(s) with {} IP ranges",
                    report.ip_range_count
                ),
                error: None,
                failed_buckets: Vec::new(),
            };
        }

        let failed_buckets = report.failed_buckets();
        let message = report
            .first_failure_message()
            .unwrap_or("processing stopped before all buckets were attempted")
            .to_string();
        let status_code = if succeeded > 0 { 207 } else { 500 };

        Self {
            status_code,
            body: format!(
                "Updated bucket policy for {succeeded} of {total} bucket(s); failed: {}",
                failed_buckets.join(",")
            ),
            error: Some(ErrorDetail {
                kind: ErrorKind::ApplyError,
                message,
            }),
            failed_buckets,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
