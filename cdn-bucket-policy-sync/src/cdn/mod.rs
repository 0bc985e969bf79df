//! CDN provider integration: retrieval of the published edge IP ranges.

pub(crate) mod ip_ranges;

pub use ip_ranges::{IpRangeFetcher, CLOUDFLARE_IPS_URL};
