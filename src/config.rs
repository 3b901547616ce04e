use crate::client_defaults::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::Error;
use crate::governance::GovernanceClient;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Provider block handed over by the host once configuration is resolved.
///
/// Either `endpoint` or `org_name` (+ `base_url`) locates the org. Exactly
/// one of `api_token` / `access_token` authenticates.
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    pub org_name: Option<String>,
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub api_token: Option<String>,
    pub access_token: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ProviderConfig")
            .field("org_name", &self.org_name)
            .field("base_url", &self.base_url)
            .field("endpoint", &self.endpoint)
            .field("api_token", &redact(&self.api_token))
            .field("access_token", &redact(&self.access_token))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

/// Empty strings count as unset.
fn present(token: &Option<String>) -> Option<&str> {
    token.as_deref().filter(|t| !t.is_empty())
}

impl ProviderConfig {
    /// Resolves the org root URL.
    pub fn org_url(&self) -> Result<String, Error> {
        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.is_empty()) {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }
        let org_name = self
            .org_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Config("config error: org_name or endpoint is required".into()))?;
        let base_url = self
            .base_url
            .as_deref()
            .filter(|base| !base.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        Ok(format!("https://{org_name}.{base_url}"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Builds the client shared by every controller of the provider.
    pub fn build_client(&self) -> Result<GovernanceClient, Error> {
        let builder = GovernanceClient::builder(self.org_url()?)?.timeout(self.timeout());
        let builder = match (present(&self.api_token), present(&self.access_token)) {
            (Some(token), None) => builder.api_token(token),
            (None, Some(token)) => builder.bearer_token(token),
            (Some(_), Some(_)) => {
                return Err(Error::Config(
                    "config error: api_token and access_token are mutually exclusive".into(),
                ))
            }
            _ => {
                return Err(Error::Config(
                    "config error: one of api_token or access_token is required".into(),
                ))
            }
        };
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> ProviderConfig {
        serde_json::from_str(json).expect("config")
    }

    #[test]
    fn org_url_from_name_and_default_base() {
        let cfg = config(r#"{"org_name":"acme","api_token":"t"}"#);
        assert_eq!(cfg.org_url().expect("url"), "https://acme.okta.com");
    }

    #[test]
    fn endpoint_overrides_org_name() {
        let cfg = config(r#"{"org_name":"acme","endpoint":"http://127.0.0.1:8080/"}"#);
        assert_eq!(cfg.org_url().expect("url"), "http://127.0.0.1:8080");
    }

    #[test]
    fn missing_org_is_a_config_error() {
        let cfg = config(r#"{"api_token":"t"}"#);
        assert!(matches!(cfg.org_url(), Err(Error::Config(_))));
    }

    #[test]
    fn exactly_one_credential_is_required() {
        let both = config(r#"{"org_name":"acme","api_token":"a","access_token":"b"}"#);
        assert!(matches!(both.build_client(), Err(Error::Config(_))));
        let neither = config(r#"{"org_name":"acme"}"#);
        assert!(matches!(neither.build_client(), Err(Error::Config(_))));
        let token = config(r#"{"org_name":"acme","base_url":"oktapreview.com","access_token":"b"}"#);
        let client = token.build_client().expect("client");
        assert_eq!(client.base_url().as_str(), "https://acme.oktapreview.com/");
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let cfg = config(r#"{"org_name":"acme","api_token":"","access_token":"b"}"#);
        assert!(cfg.build_client().is_ok());
        let cfg = config(r#"{"org_name":"acme","api_token":"","access_token":""}"#);
        assert!(matches!(cfg.build_client(), Err(Error::Config(ref msg)) if msg.contains("required")));
    }

    #[test]
    fn debug_redacts_tokens() {
        let cfg = config(r#"{"org_name":"acme","api_token":"00secret"}"#);
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("00secret"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn timeout_defaults_to_client_default() {
        assert_eq!(ProviderConfig::default().timeout(), Duration::from_secs(30));
    }
}
