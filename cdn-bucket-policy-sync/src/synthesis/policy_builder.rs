//! Builds the public-read bucket policy restricted to the CDN's source IPs.

use crate::types::{Condition, IpAddressCondition, IpRangeSet, PolicyDocument, Statement};

pub(crate) const POLICY_VERSION: &str = "2012-10-17";
pub(crate) const STATEMENT_SID: &str = "PublicReadForGetBucketObjects";
pub(crate) const OBJECT_READ_ACTION: &str = "s3:GetObject";

/// ARN covering every object in `bucket`.
pub fn bucket_object_arn(partition: &str, bucket: &str) -> String {
    format!("arn:{partition}:s3:::{bucket}/*")
}

/// Build the full replacement policy for `bucket`.
///
/// Grants `s3:GetObject` to any principal, limited to requests whose source
/// address falls inside one of `ip_ranges`. The result depends only on the
/// arguments, never on the bucket's current policy.
pub fn build_bucket_policy(
    bucket: &str,
    ip_ranges: &IpRangeSet,
    partition: &str,
) -> PolicyDocument {
    PolicyDocument {
        version: POLICY_VERSION.to_string(),
        statement: vec![Statement {
            sid: STATEMENT_SID.to_string(),
            effect: "Allow".to_string(),
            principal: "*".to_string(),
            action: OBJECT_READ_ACTION.to_string(),
            resource: bucket_object_arn(partition, bucket),
            condition: Condition {
                ip_address: IpAddressCondition {
                    source_ip: ip_ranges.cidrs.clone(),
                },
            },
        }],
    }
}
