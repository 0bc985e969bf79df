//! Client for the CDN provider's published IP ranges endpoint
//!
//! A single GET per call, no caching and no retry. Scheduling and retry belong
//! to whatever invokes the sync.

use crate::error::{SyncError, SyncResult};
use crate::types::IpRangeSet;
use serde::Deserialize;

/// Cloudflare's public list of edge IP ranges.
pub const CLOUDFLARE_IPS_URL: &str = "https://api.cloudflare.com/client/v4/ips";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct IpRangesEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<IpRangesResult>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct IpRangesResult {
    ipv4_cidrs: Vec<String>,
    ipv6_cidrs: Vec<String>,
    #[serde(default)]
    etag: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IpRangeFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl IpRangeFetcher {
    /// Create a fetcher pointed at [`CLOUDFLARE_IPS_URL`].
    pub fn new() -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SyncError::fetch(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: CLOUDFLARE_IPS_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the current ranges, IPv4 entries first.
    pub async fn fetch(&self) -> SyncResult<IpRangeSet> {
        log::debug!("Fetching CDN IP ranges from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SyncError::fetch(format!("GET {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::fetch(format!(
                "GET {} returned HTTP {status}",
                self.endpoint
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::fetch(format!("Failed to read response body: {e}")))?;

        let ranges = parse_ip_ranges(&body)?;
        log::info!(
            "Fetched {} CDN IP ranges (etag: {})",
            ranges.len(),
            ranges.etag.as_deref().unwrap_or("none")
        );
        Ok(ranges)
    }
}

/// Decode the provider's response envelope into an [`IpRangeSet`].
pub(crate) fn parse_ip_ranges(body: &[u8]) -> SyncResult<IpRangeSet> {
    let envelope: IpRangesEnvelope = serde_json::from_slice(body)
        .map_err(|e| SyncError::parse(format!("Invalid IP ranges document: {e}")))?;

    if envelope.success == Some(false) {
        let messages: Vec<String> = envelope
            .errors
            .iter()
            .map(|m| format!("{} ({})", m.message, m.code))
            .collect();
        return Err(SyncError::fetch(format!(
            "provider reported failure: {}",
            messages.join("; ")
        )));
    }

    let result = envelope
        .result
        .ok_or_else(|| SyncError::parse("missing 'result' object"))?;

    Ok(IpRangeSet::new(result.ipv4_cidrs, result.ipv6_cidrs).with_etag(result.etag))
}
