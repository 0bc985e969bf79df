//! End-to-end run: plan, apply and convert the result into an invocation response.

use super::plan::plan;
use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::types::{ApplyOptions, InvocationResponse, SyncReport};

impl super::service::PolicySyncService {
    /// Fetch ranges, build policies and apply them.
    ///
    /// Fetch, parse and configuration errors end the run before any bucket is
    /// written. Per-bucket write failures are reported in the [`SyncReport`].
    pub async fn sync(&self, config: &SyncConfig, options: ApplyOptions) -> SyncResult<SyncReport> {
        let plan = plan(config).await?;
        log::info!(
            "Applying {} IP ranges to {} bucket(s)",
            plan.ip_ranges.len(),
            plan.buckets.len()
        );
        Ok(self.apply(&plan, options).await)
    }

    /// Run [`sync`](Self::sync) and map every outcome to an [`InvocationResponse`].
    pub async fn handle(&self, config: &SyncConfig, options: ApplyOptions) -> InvocationResponse {
        match self.sync(config, options).await {
            Ok(report) => {
                let response = InvocationResponse::from_report(&report);
                if !response.is_success() {
                    log::warn!("{}", response.body);
                }
                response
            }
            Err(e) => {
                log::error!("{e}");
                InvocationResponse::from_error(&e)
            }
        }
    }
}
