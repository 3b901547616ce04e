use crate::client_defaults::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::{
    read_body_with_limit_async, Error, CONFIG_ERROR_REDIRECT_WITH_AUTH, MAX_ERROR_BODY_BYTES,
};
use crate::governance::common::{self, ApiVersion, AuthProvider};
use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Certificate, Client as HttpClient, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use url::Url;

mod campaigns;
mod collections;
mod entitlements;
mod request_conditions;
mod request_sequences;
mod request_settings;
mod requests;
mod reviews;
mod risk_rules;

/// Builder for [`GovernanceClient`].
///
/// `org_url` is the Okta org root, for example `https://example.okta.com`.
/// Governance paths (`/governance/api/v1/...`) are appended per request.
pub struct GovernanceClientBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    disable_redirect: bool,
    ca_certs: Vec<Certificate>,
    auth: Option<AuthProvider>,
    user_agent: String,
}

impl GovernanceClientBuilder {
    /// Creates a builder for the provided org URL.
    pub fn new(org_url: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self {
            base_url: Url::parse(org_url.as_ref())?,
            timeout: Some(DEFAULT_TIMEOUT),
            disable_redirect: true,
            ca_certs: Vec::new(),
            auth: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Sets the request timeout for the underlying HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Control whether HTTP redirects should be followed.
    ///
    /// Redirects are off by default. Enabling them while credentials are
    /// configured is rejected by [`build`](Self::build).
    pub fn follow_redirects(mut self, follow_redirects: bool) -> Self {
        self.disable_redirect = !follow_redirects;
        self
    }

    /// Adds a PEM-encoded CA certificate to the trust store.
    pub fn add_ca_cert_pem(mut self, ca_pem: &[u8]) -> Result<Self, Error> {
        self.ca_certs.push(Certificate::from_pem(ca_pem)?);
        Ok(self)
    }

    /// Authenticates with an Okta API token (`SSWS`).
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthProvider::ApiToken(token.into()));
        self
    }

    /// Authenticates with an OAuth 2.0 access token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthProvider::Bearer(token.into()));
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the client. The result is cheap to share behind an `Arc`.
    pub fn build(self) -> Result<GovernanceClient, Error> {
        if self.auth.is_some() && !self.disable_redirect {
            return Err(Error::Config(CONFIG_ERROR_REDIRECT_WITH_AUTH.to_string()));
        }
        let authorization = self
            .auth
            .as_ref()
            .map(AuthProvider::header_value)
            .transpose()?;
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| Error::Config(format!("config error: invalid user agent: {e}")))?;

        let mut builder = HttpClient::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if self.disable_redirect {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }
        for cert in self.ca_certs {
            builder = builder.add_root_certificate(cert);
        }
        let http = builder.build()?;
        Ok(GovernanceClient {
            base_url: self.base_url,
            http,
            authorization,
            user_agent,
        })
    }
}

/// Async client for the Okta Identity Governance API.
///
/// Holds no per-call state; one instance is shared by every controller.
pub struct GovernanceClient {
    base_url: Url,
    http: HttpClient,
    authorization: Option<HeaderValue>,
    user_agent: HeaderValue,
}

impl std::fmt::Debug for GovernanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.authorization.is_some())
            .finish()
    }
}

impl GovernanceClient {
    /// Returns a builder for a governance client.
    pub fn builder(org_url: impl AsRef<str>) -> Result<GovernanceClientBuilder, Error> {
        GovernanceClientBuilder::new(org_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, version: ApiVersion, segments: &[&str]) -> Result<Url, Error> {
        let mut all: Vec<&str> = version.prefix().to_vec();
        all.extend_from_slice(segments);
        common::build_url(&self.base_url, &all, common::BuildUrlOptions::REQUEST)
    }

    fn apply_headers(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req
            .header(USER_AGENT, self.user_agent.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.authorization {
            Some(value) => req.header(AUTHORIZATION, value.clone()),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, Error> {
        let resp = self.apply_headers(req).send().await?;
        Ok(resp)
    }

    async fn expect_json<T: serde::de::DeserializeOwned>(&self, resp: Response) -> Result<T, Error> {
        match resp.status() {
            StatusCode::OK | StatusCode::CREATED => resp.json::<T>().await.map_err(Error::from),
            _ => self.parse_error(resp).await,
        }
    }

    async fn expect_empty(&self, resp: Response) -> Result<(), Error> {
        match resp.status() {
            StatusCode::NO_CONTENT | StatusCode::OK | StatusCode::ACCEPTED => Ok(()),
            _ => self.parse_error(resp).await,
        }
    }

    async fn parse_error<T>(&self, mut resp: Response) -> Result<T, Error> {
        let status = resp.status();
        let body = read_body_with_limit_async(&mut resp, MAX_ERROR_BODY_BYTES).await?;
        Err(common::parse_error_from_body(status, &body))
    }
}
