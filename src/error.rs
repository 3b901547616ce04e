use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;
pub(crate) const CONFIG_ERROR_REDIRECT_WITH_AUTH: &str =
    "config error: following redirects is not allowed while an auth header is configured";

/// Okta error envelope as returned on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error_code: String,
    pub error_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_causes: Vec<ErrorCause>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorCause {
    pub error_summary: String,
}

impl ErrorEnvelope {
    fn is_empty(&self) -> bool {
        self.error_code.is_empty() && self.error_summary.is_empty()
    }
}

/// A non-2xx answer from the Governance API.
///
/// `envelope` is set when the body decoded as an Okta error envelope; otherwise
/// the raw body is kept and used for the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub envelope: Option<ErrorEnvelope>,
    pub body: String,
}

impl ApiError {
    pub(crate) fn from_body(status: StatusCode, body: &[u8]) -> Self {
        let envelope = serde_json::from_slice::<ErrorEnvelope>(body)
            .ok()
            .filter(|envelope| !envelope.is_empty());
        Self {
            status,
            envelope,
            body: String::from_utf8_lossy(body).trim().to_string(),
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        self.envelope.as_ref().map(|e| e.error_code.as_str())
    }

    /// `"<status>: <code>: <summary>[: <cause>]..."`, or the raw body when the
    /// envelope did not decode.
    pub fn normalized(&self) -> String {
        let mut parts = vec![self.status.to_string()];
        match &self.envelope {
            Some(envelope) => {
                parts.push(envelope.error_code.clone());
                parts.push(envelope.error_summary.clone());
                parts.extend(
                    envelope
                        .error_causes
                        .iter()
                        .filter(|cause| !cause.error_summary.is_empty())
                        .map(|cause| cause.error_summary.clone()),
                );
            }
            None => {
                if !self.body.is_empty() {
                    parts.push(self.body.clone());
                }
            }
        }
        parts.join(": ")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Config(String),
    #[error("governance api error: {0}")]
    Api(ApiError),
    #[error("{path}: {message}")]
    Validation { path: String, message: String },
    #[error("expected import identifier with format {expected}, got {got:?}")]
    ImportId { expected: String, got: String },
    #[error("unexpected response payload: {0}")]
    Translation(String),
    #[error("timestamp error: {0}")]
    Timestamp(String),
    #[error("governance client has not been configured")]
    Unconfigured,
}

impl Error {
    pub(crate) fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(err) if err.status == StatusCode::NOT_FOUND)
    }
}

pub(crate) async fn read_body_with_limit_async(
    resp: &mut Response,
    limit: usize,
) -> Result<Vec<u8>, Error> {
    let mut body = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        let remaining = limit.saturating_sub(body.len());
        if remaining == 0 {
            break;
        }
        let take = chunk.len().min(remaining);
        body.extend_from_slice(&chunk[..take]);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_envelope_with_causes() {
        let body = br#"{"errorCode":"E0000001","errorSummary":"Api validation failed: name","errorCauses":[{"errorSummary":"name: must not be blank"},{"errorSummary":"priority: out of range"}]}"#;
        let err = ApiError::from_body(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err.normalized(),
            "400 Bad Request: E0000001: Api validation failed: name: name: must not be blank: priority: out of range"
        );
        assert_eq!(err.error_code(), Some("E0000001"));
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = ApiError::from_body(StatusCode::BAD_GATEWAY, b"<html>upstream down</html>");
        assert!(err.envelope.is_none());
        assert_eq!(err.normalized(), "502 Bad Gateway: <html>upstream down</html>");
    }

    #[test]
    fn json_without_envelope_fields_uses_raw_body() {
        let err = ApiError::from_body(StatusCode::CONFLICT, br#"{"message":"busy"}"#);
        assert!(err.envelope.is_none());
        assert_eq!(err.normalized(), r#"409 Conflict: {"message":"busy"}"#);
    }

    #[test]
    fn empty_body_yields_status_only() {
        let err = ApiError::from_body(StatusCode::NOT_FOUND, b"");
        assert_eq!(err.normalized(), "404 Not Found");
        assert!(Error::Api(err).is_not_found());
    }
}
