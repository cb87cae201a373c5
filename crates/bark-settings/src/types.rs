//! Settings types.

use serde::{Deserialize, Serialize};

/// Production Bark server.
pub const DEFAULT_SERVER_ADDRESS: &str = "https://api.day.app";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for a `BarkClient`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// Base address every request path is resolved against.
    pub server_address: String,
    /// Per-request timeout in milliseconds. A timeout surfaces as "no response".
    pub timeout_ms: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: concat!("bark-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientSettings {
    /// Settings pointing at `server_address`, everything else default.
    pub fn with_server_address(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            ..Self::default()
        }
    }
}
