//! Server response shapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope the server wraps push results and errors in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    /// Status code echoed in the body.
    #[serde(default)]
    pub code: Option<i64>,
    /// Result or error description.
    #[serde(default)]
    pub message: Option<String>,
    /// Server time when it responded (Unix seconds).
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl ServerResponse {
    /// Parse a response body, returning `None` if it is not a JSON envelope.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// Body of `GET /info` as the server sends it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawInfoResponse {
    /// Server architecture.
    #[serde(default)]
    pub arch: Option<String>,
    /// Build time as a string.
    #[serde(default)]
    pub build: Option<String>,
    /// Commit hash.
    #[serde(default)]
    pub commit: Option<String>,
    /// Registered device count.
    #[serde(default)]
    pub devices: Option<u64>,
    /// Server version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Server information with the build time parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InfoResponse {
    /// Server architecture, e.g. `linux/arm64`.
    pub arch: Option<String>,
    /// When the server binary was built.
    pub build: Option<DateTime<Utc>>,
    /// Commit the server was built from.
    pub commit: Option<String>,
    /// Number of devices registered on the server.
    pub devices: Option<u64>,
    /// Server version, e.g. `v2.1.5`.
    pub version: Option<String>,
}

impl From<RawInfoResponse> for InfoResponse {
    fn from(raw: RawInfoResponse) -> Self {
        Self {
            arch: raw.arch,
            build: raw.build.as_deref().and_then(parse_build_time),
            commit: raw.commit,
            devices: raw.devices,
            version: raw.version,
        }
    }
}

/// Parse a build timestamp.
///
/// Accepts RFC 3339 and `YYYY-MM-DD HH:MM:SS` (taken as UTC).
pub fn parse_build_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
