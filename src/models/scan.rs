//! Scan request model and scan-target resolution

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// RFC 3986 unreserved characters pass through, everything else is encoded.
/// Keeps scanner lookups well-formed even for raw URLs used as path segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Lookup request: exactly one field identifies the artifact to scan.
#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(rename = "fileHash", default)]
    pub file_hash: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// The resolved scanner resource for a lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    FileHash(String),
    Url(String),
    Ip(String),
    Domain(String),
}

impl ScanRequest {
    /// Resolve the request to a single scan target.
    ///
    /// First non-empty field wins, in the order fileHash, url, ip, domain.
    /// Empty strings count as absent. Returns `None` when no field is
    /// populated; the caller rejects the request before any external call.
    pub fn resolve(&self) -> Option<ScanTarget> {
        fn non_empty(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|v| !v.is_empty())
        }

        if let Some(hash) = non_empty(&self.file_hash) {
            return Some(ScanTarget::FileHash(hash.to_string()));
        }
        if let Some(url) = non_empty(&self.url) {
            return Some(ScanTarget::Url(url.to_string()));
        }
        if let Some(ip) = non_empty(&self.ip) {
            return Some(ScanTarget::Ip(ip.to_string()));
        }
        if let Some(domain) = non_empty(&self.domain) {
            return Some(ScanTarget::Domain(domain.to_string()));
        }
        None
    }
}

impl ScanTarget {
    /// Scanner resource path relative to the API base URL.
    ///
    /// The value is percent-encoded as a path segment before interpolation.
    pub fn resource_path(&self) -> String {
        let (resource, value) = match self {
            ScanTarget::FileHash(v) => ("files", v),
            ScanTarget::Url(v) => ("urls", v),
            ScanTarget::Ip(v) => ("ips", v),
            ScanTarget::Domain(v) => ("domains", v),
        };
        format!("{}/{}", resource, utf8_percent_encode(value, PATH_SEGMENT))
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub result: String,
}
