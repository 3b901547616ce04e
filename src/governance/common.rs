use crate::error::{ApiError, Error};
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use std::fmt;

pub(crate) use crate::build_url::{build_url, BuildUrlOptions};

/// Credentials sent in the `Authorization` header.
#[derive(Clone)]
pub(crate) enum AuthProvider {
    /// Okta API token, sent as `SSWS <token>`.
    ApiToken(String),
    /// OAuth 2.0 access token, sent as `Bearer <token>`.
    Bearer(String),
}

impl AuthProvider {
    pub(crate) fn header_value(&self) -> Result<HeaderValue, Error> {
        let raw = match self {
            AuthProvider::ApiToken(token) => format!("SSWS {token}"),
            AuthProvider::Bearer(token) => format!("Bearer {token}"),
        };
        let mut value = HeaderValue::from_str(&raw)
            .map_err(|e| Error::Config(format!("config error: invalid auth header value: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthProvider::ApiToken(_) => f.write_str("ApiToken([REDACTED])"),
            AuthProvider::Bearer(_) => f.write_str("Bearer([REDACTED])"),
        }
    }
}

/// Governance API generation a path lives under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub(crate) fn prefix(self) -> [&'static str; 3] {
        match self {
            ApiVersion::V1 => ["governance", "api", "v1"],
            ApiVersion::V2 => ["governance", "api", "v2"],
        }
    }
}

pub(crate) fn parse_error_from_body(status: StatusCode, body: &[u8]) -> Error {
    Error::Api(ApiError::from_body(status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_debug_is_redacted() {
        let auth = AuthProvider::ApiToken("00secret".to_string());
        assert_eq!(format!("{auth:?}"), "ApiToken([REDACTED])");
        let value = auth.header_value().expect("header");
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().expect("ascii"), "SSWS 00secret");
    }

    #[test]
    fn rejects_tokens_with_control_characters() {
        let auth = AuthProvider::Bearer("abc\ndef".to_string());
        assert!(matches!(auth.header_value(), Err(Error::Config(_))));
    }
}
