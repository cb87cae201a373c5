//! Bark server client.
//!
//! Uses `reqwest` for transport. Each call is a single exchange; failures are
//! handed to the [`classifier`](crate::classifier) and surface as one
//! [`ResponseError`].

use std::time::Duration;

use bark_core::errors::{BarkError, ResponseError, ResponseErrorKind, ValidationError};
use bark_core::response::RawInfoResponse;
use bark_core::{EncryptionAlgorithm, InfoResponse, Message, ServerResponse};
use bark_settings::{ClientSettings, DEFAULT_SERVER_ADDRESS};
use reqwest::RequestBuilder;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::classifier::{FailedExchange, classify_miscellaneous_failure, classify_push_failure};
use crate::encryption::{cipher, policy};

/// Health-check path.
pub const HEALTHZ_PATH: &str = "healthz";
/// Server info path.
pub const INFO_PATH: &str = "info";
/// Liveness path.
pub const PING_PATH: &str = "ping";
/// Plaintext push path.
pub const PUSH_PATH: &str = "push";

/// Form field carrying the encrypted payload.
const CIPHERTEXT_FIELD: &str = "ciphertext";

/// Client for one Bark server.
///
/// Cheap to clone; clones share the underlying connection pool. The base
/// address is fixed at construction.
#[derive(Clone, Debug)]
pub struct BarkClient {
    base: Url,
    http: reqwest::Client,
}

impl Default for BarkClient {
    /// Client for the production server.
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_SERVER_ADDRESS).expect("valid default server address"),
            http: reqwest::Client::new(),
        }
    }
}

impl BarkClient {
    /// Create a client for `server_address`.
    ///
    /// Fails with `IS_NOT_URL` unless the address is an absolute URL with a
    /// host.
    pub fn new(server_address: &str) -> Result<Self, ValidationError> {
        Self::with_http_client(server_address, reqwest::Client::new())
    }

    /// Create a client with a caller-supplied HTTP client.
    pub fn with_http_client(
        server_address: &str,
        http: reqwest::Client,
    ) -> Result<Self, ValidationError> {
        let base = parse_server_address(server_address)?;
        Ok(Self { base, http })
    }

    /// Create a client from loaded settings.
    ///
    /// Applies the configured timeout and user agent to the HTTP client.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, BarkError> {
        let base = parse_server_address(&settings.server_address)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| {
                ResponseError::with_cause(
                    ResponseErrorKind::UnknownError,
                    "Failed to build HTTP client",
                    e,
                )
            })?;
        Ok(Self { base, http })
    }

    /// Base address requests are resolved against.
    pub fn server_address(&self) -> &Url {
        &self.base
    }

    /// Check that the server is healthy.
    ///
    /// The response body is ignored.
    #[instrument(skip_all, fields(server = %self.base))]
    pub async fn health(&self) -> Result<(), ResponseError> {
        let request = self.http.get(self.endpoint(HEALTHZ_PATH));
        let _ = self
            .exchange(request)
            .await
            .map_err(classify_miscellaneous)?;
        Ok(())
    }

    /// Fetch server information.
    #[instrument(skip_all, fields(server = %self.base))]
    pub async fn info(&self) -> Result<InfoResponse, ResponseError> {
        let request = self.http.get(self.endpoint(INFO_PATH));
        let body = self
            .exchange(request)
            .await
            .map_err(classify_miscellaneous)?;

        let raw: RawInfoResponse = serde_json::from_str(&body)
            .map_err(|e| classify_miscellaneous(FailedExchange::Other(e.into())))?;
        Ok(InfoResponse::from(raw))
    }

    /// Check that the server is running.
    #[instrument(skip_all, fields(server = %self.base))]
    pub async fn ping(&self) -> Result<(), ResponseError> {
        let request = self.http.get(self.endpoint(PING_PATH));
        let _ = self
            .exchange(request)
            .await
            .map_err(classify_miscellaneous)?;
        Ok(())
    }

    /// Push a plaintext message.
    ///
    /// The message travels as JSON and must carry its own device key.
    #[instrument(skip_all, fields(server = %self.base))]
    pub async fn push(&self, message: &Message) -> Result<(), ResponseError> {
        let request = self.http.post(self.endpoint(PUSH_PATH)).json(message);
        let body = self.exchange(request).await.map_err(classify_push)?;
        log_push_result(&body);
        Ok(())
    }

    /// Push an encrypted message to `device_key`.
    ///
    /// Key and IV are validated before anything is sent; a validation failure
    /// means no request was attempted. Any device key inside `message` is
    /// dropped: the device key is the request path here, not a body field.
    #[instrument(skip_all, fields(server = %self.base, %algorithm))]
    pub async fn push_encrypted(
        &self,
        device_key: &str,
        message: &Message,
        algorithm: EncryptionAlgorithm,
        key: &str,
        iv: &str,
    ) -> Result<(), BarkError> {
        policy::validate_key(algorithm, key)?;
        policy::validate_iv(iv)?;

        if message.device_key.is_some() {
            debug!("dropping device_key from encrypted message body");
        }
        let plaintext = serde_json::to_vec(&message.without_device_key())
            .map_err(|e| classify_push(FailedExchange::Other(e.into())))?;
        let ciphertext = cipher::encrypt(algorithm, key, iv, &plaintext)?;

        let request = self
            .http
            .post(self.endpoint(device_key))
            .form(&[(CIPHERTEXT_FIELD, ciphertext.as_str())]);
        let body = self.exchange(request).await.map_err(classify_push)?;
        log_push_result(&body);
        Ok(())
    }

    /// Resolve a single path segment against the base address.
    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            let _ = segments.pop_if_empty().push(segment);
        }
        url
    }

    /// Send a request and return the body of a successful response.
    async fn exchange(&self, request: RequestBuilder) -> Result<String, FailedExchange> {
        let response = request.send().await.map_err(|e| {
            debug!(error = %e, "request failed before a response arrived");
            FailedExchange::NoResponse(e.into())
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FailedExchange::NoResponse(e.into())
            } else {
                FailedExchange::Other(e.into())
            }
        })?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(FailedExchange::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn parse_server_address(server_address: &str) -> Result<Url, ValidationError> {
    Url::parse(server_address)
        .ok()
        .filter(Url::has_host)
        .ok_or_else(|| ValidationError::is_not_url("server address"))
}

fn classify_miscellaneous(failure: FailedExchange) -> ResponseError {
    let err = classify_miscellaneous_failure(failure);
    warn!(kind = %err.kind(), error = %err, "request failed");
    err
}

fn classify_push(failure: FailedExchange) -> ResponseError {
    let err = classify_push_failure(failure);
    warn!(kind = %err.kind(), error = %err, "push failed");
    err
}

fn log_push_result(body: &str) {
    if let Some(envelope) = ServerResponse::parse(body) {
        debug!(
            code = ?envelope.code,
            message = ?envelope.message,
            timestamp = ?envelope.timestamp,
            "push accepted"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
