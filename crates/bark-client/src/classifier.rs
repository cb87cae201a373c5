//! Classification of failed HTTP exchanges into [`ResponseError`]s.
//!
//! The server reports push failures as semi-structured prose in the
//! `message` field of its JSON envelope. The literal prefixes matched here
//! (`"failed to get device token: "` etc.) are part of the wire contract.
//!
//! Push rules, strict first match:
//! 1. No response at all → `SERVER_HAS_NO_RESPONSE`
//! 2. 400 + `"device key is empty"` → `DEVICE_KEY_IS_EMPTY`
//! 3. 400 + `"failed to get device token: <detail>"` → `FAILED_TO_GET_DEVICE_TOKEN`
//! 4. 400 + `"request bind failed: <detail>"` → `REQUEST_BIND_FAILED`
//! 5. 500 + `"push failed: <detail>"` → `PUSH_FAILED`
//! 6. Anything else → `UNKNOWN_ERROR`
//!
//! Miscellaneous calls (`health`, `info`, `ping`) only distinguish an
//! HTTP-level failure (`SERVER_HAS_NO_RESPONSE`) from anything else.

use std::sync::LazyLock;

use bark_core::errors::{BoxError, HttpStatusError, ResponseError, ResponseErrorKind};
use regex::Regex;
use serde_json::Value;

/// Exact message the server sends when no device key was supplied.
pub const DEVICE_KEY_IS_EMPTY_MESSAGE: &str = "device key is empty";

/// How an exchange failed.
#[derive(Debug)]
pub enum FailedExchange {
    /// No HTTP response was received (timeout, refused connection, DNS).
    NoResponse(BoxError),
    /// A response arrived with a non-success status.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// Any other failure, e.g. an undecodable success body.
    Other(BoxError),
}

/// A status + message-pattern rule that captures a detail string.
struct DetailRule {
    status: u16,
    kind: ResponseErrorKind,
    pattern: Regex,
    label: &'static str,
}

impl DetailRule {
    fn new(status: u16, kind: ResponseErrorKind, pattern: &str, label: &'static str) -> Self {
        Self {
            status,
            kind,
            pattern: Regex::new(pattern).expect("valid regex"),
            label,
        }
    }

    fn capture<'m>(&self, status: u16, message: &'m str) -> Option<&'m str> {
        if status != self.status {
            return None;
        }
        self.pattern
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|detail| detail.as_str())
    }
}

static DETAIL_RULES: LazyLock<[DetailRule; 3]> = LazyLock::new(|| {
    [
        DetailRule::new(
            400,
            ResponseErrorKind::FailedToGetDeviceToken,
            r"failed to get device token: (.*)",
            "Failed to get device token",
        ),
        DetailRule::new(
            400,
            ResponseErrorKind::RequestBindFailed,
            r"request bind failed: (.*)",
            "Request bind failed",
        ),
        DetailRule::new(
            500,
            ResponseErrorKind::PushFailed,
            r"push failed: (.*)",
            "Push failed",
        ),
    ]
});

/// Match a rejected push against the server's known failure messages.
///
/// Returns the kind and human-readable message, or `None` if nothing matches.
pub fn match_push_rejection(status: u16, message: &str) -> Option<(ResponseErrorKind, String)> {
    if status == 400 && message == DEVICE_KEY_IS_EMPTY_MESSAGE {
        return Some((
            ResponseErrorKind::DeviceKeyIsEmpty,
            "Device key is empty".to_string(),
        ));
    }
    DETAIL_RULES.iter().find_map(|rule| {
        rule.capture(status, message)
            .map(|detail| (rule.kind, format!("{}: {detail}", rule.label)))
    })
}

/// The `message` string of a rejection body.
///
/// Only `message` is read; the other envelope fields may have any shape.
fn rejection_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body).ok()?;
    json["message"].as_str().map(String::from)
}

/// Classify a failed `push` or `push_encrypted` exchange.
pub fn classify_push_failure(failure: FailedExchange) -> ResponseError {
    match failure {
        FailedExchange::NoResponse(cause) => no_response(cause),
        FailedExchange::Rejected { status, body } => {
            let matched = rejection_message(&body)
                .and_then(|message| match_push_rejection(status, &message));
            let cause = HttpStatusError { status, body };
            match matched {
                Some((kind, message)) => ResponseError::with_cause(kind, message, cause),
                None => unknown(cause),
            }
        }
        FailedExchange::Other(cause) => unknown(cause),
    }
}

/// Classify a failed `health`, `info` or `ping` exchange.
pub fn classify_miscellaneous_failure(failure: FailedExchange) -> ResponseError {
    match failure {
        FailedExchange::NoResponse(cause) => no_response(cause),
        FailedExchange::Rejected { status, body } => no_response(HttpStatusError { status, body }),
        FailedExchange::Other(cause) => unknown(cause),
    }
}

fn no_response(cause: impl Into<BoxError>) -> ResponseError {
    ResponseError::with_cause(
        ResponseErrorKind::ServerHasNoResponse,
        "Server has no response",
        cause,
    )
}

fn unknown(cause: impl Into<BoxError>) -> ResponseError {
    ResponseError::with_cause(ResponseErrorKind::UnknownError, "Unknown error", cause)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn rejected(status: u16, message: &str) -> FailedExchange {
        FailedExchange::Rejected {
            status,
            body: serde_json::json!({
                "code": status,
                "message": message,
                "timestamp": 0,
            })
            .to_string(),
        }
    }

    fn timeout() -> FailedExchange {
        FailedExchange::NoResponse(
            std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out").into(),
        )
    }

    #[test]
    fn device_key_is_empty() {
        let err = classify_push_failure(rejected(400, "device key is empty"));
        assert_eq!(err.kind(), ResponseErrorKind::DeviceKeyIsEmpty);
        assert_eq!(err.message(), "Device key is empty");
    }

    #[test]
    fn failed_to_get_device_token_carries_detail() {
        let err = classify_push_failure(rejected(400, "failed to get device token: xyz"));
        assert_eq!(err.kind(), ResponseErrorKind::FailedToGetDeviceToken);
        assert!(err.message().contains("xyz"));
        insta::assert_snapshot!(err.message(), @"Failed to get device token: xyz");
    }

    #[test]
    fn failed_to_get_device_token_database_detail() {
        let err = classify_push_failure(rejected(
            400,
            "failed to get device token: failed to get [] devices token from database",
        ));
        assert_eq!(
            err.message(),
            "Failed to get device token: failed to get [] devices token from database"
        );
    }

    #[test]
    fn request_bind_failed_carries_detail() {
        let err = classify_push_failure(rejected(
            400,
            r#"request bind failed: invalid character '\"' after object key:value pair"#,
        ));
        assert_eq!(err.kind(), ResponseErrorKind::RequestBindFailed);
        assert_eq!(
            err.message(),
            r#"Request bind failed: invalid character '\"' after object key:value pair"#
        );
    }

    #[test]
    fn push_failed_with_empty_detail() {
        let err = classify_push_failure(rejected(500, "push failed: "));
        assert_eq!(err.kind(), ResponseErrorKind::PushFailed);
        assert_eq!(err.message(), "Push failed: ");
    }

    #[test]
    fn status_must_match_the_rule() {
        let err = classify_push_failure(rejected(500, "device key is empty"));
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);

        let err = classify_push_failure(rejected(400, "push failed: boom"));
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);

        let err = classify_push_failure(rejected(500, "failed to get device token: x"));
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);
    }

    #[test]
    fn prefix_without_separator_falls_through() {
        let err = classify_push_failure(rejected(400, "failed to get device token"));
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);
        assert_eq!(err.message(), "Unknown error");
    }

    #[test]
    fn device_key_message_must_be_exact() {
        let err = classify_push_failure(rejected(400, "device key is empty!"));
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);
    }

    #[test]
    fn non_json_body_is_unknown() {
        let err = classify_push_failure(FailedExchange::Rejected {
            status: 502,
            body: "Bad Gateway".into(),
        });
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "HTTP status 502: Bad Gateway");
    }

    #[test]
    fn envelope_fields_other_than_message_are_ignored() {
        let err = classify_push_failure(FailedExchange::Rejected {
            status: 400,
            body: r#"{"message":"device key is empty","code":"400"}"#.into(),
        });
        assert_eq!(err.kind(), ResponseErrorKind::DeviceKeyIsEmpty);

        let err = classify_push_failure(FailedExchange::Rejected {
            status: 500,
            body: r#"{"code":500,"message":"push failed: x","timestamp":"soon"}"#.into(),
        });
        assert_eq!(err.kind(), ResponseErrorKind::PushFailed);
        assert_eq!(err.message(), "Push failed: x");
    }

    #[test]
    fn non_string_message_is_unknown() {
        let err = classify_push_failure(FailedExchange::Rejected {
            status: 400,
            body: r#"{"message":400}"#.into(),
        });
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);
    }

    #[test]
    fn push_timeout_is_no_response() {
        let err = classify_push_failure(timeout());
        assert_eq!(err.kind(), ResponseErrorKind::ServerHasNoResponse);
        assert_eq!(err.message(), "Server has no response");
    }

    #[test]
    fn miscellaneous_timeout_is_no_response() {
        let err = classify_miscellaneous_failure(timeout());
        assert_eq!(err.kind(), ResponseErrorKind::ServerHasNoResponse);
        assert_eq!(err.source().unwrap().to_string(), "timed out");
    }

    #[test]
    fn miscellaneous_error_status_is_no_response() {
        let err = classify_miscellaneous_failure(FailedExchange::Rejected {
            status: 503,
            body: String::new(),
        });
        assert_eq!(err.kind(), ResponseErrorKind::ServerHasNoResponse);
    }

    #[test]
    fn other_failures_are_unknown_with_cause() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = classify_miscellaneous_failure(FailedExchange::Other(decode.into()));
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);
        assert!(err.cause().is_some());

        let err = classify_push_failure(FailedExchange::Other("boom".into()));
        assert_eq!(err.kind(), ResponseErrorKind::UnknownError);
    }

    #[test]
    fn every_classified_error_keeps_its_cause() {
        for failure in [
            rejected(400, "device key is empty"),
            rejected(400, "request bind failed: x"),
            rejected(500, "push failed: y"),
            rejected(404, "not found"),
            timeout(),
        ] {
            assert!(classify_push_failure(failure).cause().is_some());
        }
    }
}
