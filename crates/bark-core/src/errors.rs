//! Error families for the Bark client.
//!
//! Three independent families, none of which wraps another:
//!
//! - [`ValidationError`]: a message field received an invalid value
//! - [`EncryptionError`]: key or IV material does not fit the chosen algorithm
//! - [`ResponseError`]: the server rejected a request, or never answered
//!
//! Every error carries a machine-checkable kind and a human-readable message.
//! [`ResponseError`] additionally retains the low-level failure it was
//! classified from, exposed through [`std::error::Error::source`].
//!
//! [`BarkError`] is the union returned by operations that can fail in more
//! than one family.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error used to retain an underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ─────────────────────────────────────────────────────────────────────────────
// ValidationError
// ─────────────────────────────────────────────────────────────────────────────

/// Kinds of [`ValidationError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    /// A field requiring URL shape received a non-URL string.
    IsNotUrl,
}

/// A message field received an invalid value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    kind: ValidationErrorKind,
    message: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The argument named `argument` is not a well-formed URL.
    pub fn is_not_url(argument: &str) -> Self {
        Self::new(
            ValidationErrorKind::IsNotUrl,
            format!("The argument {argument} is not a URL"),
        )
    }

    /// Machine-checkable kind.
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EncryptionError
// ─────────────────────────────────────────────────────────────────────────────

/// Kinds of [`EncryptionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncryptionErrorKind {
    /// Key length does not match the algorithm's key size.
    KeyIsNotCorrect,
    /// IV is not exactly one AES block long.
    IvIsNotCorrect,
}

/// Key or IV material does not fit the chosen algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EncryptionError {
    kind: EncryptionErrorKind,
    message: String,
}

impl EncryptionError {
    /// Create an encryption error.
    pub fn new(kind: EncryptionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The key is not `expected_len` bytes long.
    pub fn key_is_not_correct(expected_len: usize) -> Self {
        Self::new(
            EncryptionErrorKind::KeyIsNotCorrect,
            format!("The length of key is not {expected_len}"),
        )
    }

    /// The IV is not `expected_len` bytes long.
    pub fn iv_is_not_correct(expected_len: usize) -> Self {
        Self::new(
            EncryptionErrorKind::IvIsNotCorrect,
            format!("The length of iv is not {expected_len}"),
        )
    }

    /// Machine-checkable kind.
    pub fn kind(&self) -> EncryptionErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ResponseError
// ─────────────────────────────────────────────────────────────────────────────

/// Kinds of [`ResponseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseErrorKind {
    /// The push request carried no device key.
    DeviceKeyIsEmpty,
    /// The server could not resolve a device token for the key.
    FailedToGetDeviceToken,
    /// The server could not bind the request body.
    RequestBindFailed,
    /// The server accepted the request but delivery failed upstream.
    PushFailed,
    /// No HTTP response was received at all.
    #[serde(alias = "SERVER_HAS_NOT_RESPONSE")]
    ServerHasNoResponse,
    /// Anything else.
    UnknownError,
}

impl ResponseErrorKind {
    /// Wire-style name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeviceKeyIsEmpty => "DEVICE_KEY_IS_EMPTY",
            Self::FailedToGetDeviceToken => "FAILED_TO_GET_DEVICE_TOKEN",
            Self::RequestBindFailed => "REQUEST_BIND_FAILED",
            Self::PushFailed => "PUSH_FAILED",
            Self::ServerHasNoResponse => "SERVER_HAS_NO_RESPONSE",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ResponseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The server rejected a request, or never answered.
///
/// Equality compares kind and message only; the cause is diagnostic.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResponseError {
    kind: ResponseErrorKind,
    message: String,
    #[source]
    cause: Option<BoxError>,
}

impl ResponseError {
    /// Create a response error without a cause.
    pub fn new(kind: ResponseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Create a response error retaining the failure it was classified from.
    pub fn with_cause(
        kind: ResponseErrorKind,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Machine-checkable kind.
    pub fn kind(&self) -> ResponseErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying failure, if one was retained.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl PartialEq for ResponseError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl Eq for ResponseError {}

/// A response arrived with a non-success status.
///
/// Retained as the cause of a [`ResponseError`] classified from it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("HTTP status {status}: {body}")]
pub struct HttpStatusError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// BarkError
// ─────────────────────────────────────────────────────────────────────────────

/// Any error a client operation can produce.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum BarkError {
    /// Message validation failed.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Key/IV validation failed.
    #[error("{0}")]
    Encryption(#[from] EncryptionError),

    /// Server rejected the request or did not answer.
    #[error("{0}")]
    Response(#[from] ResponseError),
}

impl BarkError {
    /// Error family string for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Encryption(_) => "encryption",
            Self::Response(_) => "response",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn is_not_url_display() {
        let err = ValidationError::is_not_url("icon");
        assert_eq!(err.kind(), ValidationErrorKind::IsNotUrl);
        insta::assert_snapshot!(err.to_string(), @"The argument icon is not a URL");
    }

    #[test]
    fn key_and_iv_messages() {
        insta::assert_snapshot!(
            EncryptionError::key_is_not_correct(24).to_string(),
            @"The length of key is not 24"
        );
        insta::assert_snapshot!(
            EncryptionError::iv_is_not_correct(16).to_string(),
            @"The length of iv is not 16"
        );
    }

    #[test]
    fn response_error_equality_ignores_cause() {
        let with = ResponseError::with_cause(
            ResponseErrorKind::PushFailed,
            "Push failed: ",
            HttpStatusError {
                status: 500,
                body: "{}".into(),
            },
        );
        let without = ResponseError::new(ResponseErrorKind::PushFailed, "Push failed: ");
        assert_eq!(with, without);
        assert_ne!(
            without,
            ResponseError::new(ResponseErrorKind::UnknownError, "Push failed: ")
        );
    }

    #[test]
    fn response_error_exposes_source() {
        let err = ResponseError::with_cause(
            ResponseErrorKind::DeviceKeyIsEmpty,
            "Device key is empty",
            HttpStatusError {
                status: 400,
                body: "device key is empty".into(),
            },
        );
        let source = err.source().expect("cause retained");
        assert_eq!(source.to_string(), "HTTP status 400: device key is empty");
        assert!(err.cause().is_some());
    }

    #[test]
    fn response_error_without_cause_has_no_source() {
        let err = ResponseError::new(ResponseErrorKind::UnknownError, "Unknown error");
        assert!(err.source().is_none());
    }

    #[test]
    fn kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&ResponseErrorKind::ServerHasNoResponse).unwrap();
        assert_eq!(json, r#""SERVER_HAS_NO_RESPONSE""#);
        let json = serde_json::to_string(&EncryptionErrorKind::IvIsNotCorrect).unwrap();
        assert_eq!(json, r#""IV_IS_NOT_CORRECT""#);
    }

    #[test]
    fn legacy_no_response_name_is_accepted() {
        let kind: ResponseErrorKind = serde_json::from_str(r#""SERVER_HAS_NOT_RESPONSE""#).unwrap();
        assert_eq!(kind, ResponseErrorKind::ServerHasNoResponse);
    }

    #[test]
    fn kind_display_matches_serde_name() {
        for kind in [
            ResponseErrorKind::DeviceKeyIsEmpty,
            ResponseErrorKind::FailedToGetDeviceToken,
            ResponseErrorKind::RequestBindFailed,
            ResponseErrorKind::PushFailed,
            ResponseErrorKind::ServerHasNoResponse,
            ResponseErrorKind::UnknownError,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn bark_error_from_conversions() {
        let err: BarkError = EncryptionError::iv_is_not_correct(16).into();
        assert_matches!(err, BarkError::Encryption(ref e) if e.kind() == EncryptionErrorKind::IvIsNotCorrect);
        assert_eq!(err.category(), "encryption");
        assert_eq!(err.to_string(), "The length of iv is not 16");

        let err: BarkError = ValidationError::is_not_url("url").into();
        assert_eq!(err.category(), "validation");
    }
}
