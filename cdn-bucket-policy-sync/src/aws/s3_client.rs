//! S3 client wrapper for bucket policy operations

use crate::aws::BucketPolicyStore;
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;

pub struct S3PolicyStore {
    client: S3Client,
}

impl S3PolicyStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Build a store from the default credential provider chain.
    ///
    /// `region` overrides whatever region the environment resolves.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_sdk_s3::config::Region::new(region));
        }
        let config = loader.load().await;
        Self::from_config_builder(aws_sdk_s3::config::Builder::from(&config))
    }

    /// Build a store whose client makes exactly one attempt per write.
    pub(crate) fn from_config_builder(builder: aws_sdk_s3::config::Builder) -> Self {
        let config = builder.retry_config(RetryConfig::disabled()).build();
        Self::new(S3Client::from_conf(config))
    }
}

#[async_trait]
impl BucketPolicyStore for S3PolicyStore {
    async fn put_bucket_policy(&self, bucket: &str, policy_json: &str) -> SyncResult<()> {
        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy_json)
            .send()
            .await
            .map_err(|e| SyncError::apply(bucket, format!("{}", DisplayErrorContext(&e))))?;
        log::debug!("PutBucketPolicy succeeded for '{bucket}'");
        Ok(())
    }
}
