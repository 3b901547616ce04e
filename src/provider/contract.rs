//! The CRUD contract every managed entity implements, plus the helpers
//! controllers share at the boundary to the host.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::provider::diagnostics::{AttributePath, Diagnostics};
use crate::provider::schema::Schema;
use async_trait::async_trait;
use log::warn;
use std::sync::Arc;

/// Operation a diagnostic is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Creating,
    Reading,
    Updating,
    Deleting,
    Importing,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Creating => "creating",
            Verb::Reading => "reading",
            Verb::Updating => "updating",
            Verb::Deleting => "deleting",
            Verb::Importing => "importing",
        }
    }
}

/// Result of a controller operation.
///
/// `state: None` without errors means the entity is gone (Read) or the
/// mirror is released (Delete).
#[derive(Debug, Clone, PartialEq)]
pub struct Response<S> {
    pub state: Option<S>,
    pub diagnostics: Diagnostics,
}

impl<S> Response<S> {
    pub fn ok(state: S) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn gone() -> Self {
        Self {
            state: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn from_error(verb: Verb, entity: &str, err: &Error) -> Self {
        Self {
            state: None,
            diagnostics: error_diagnostics(verb, entity, err),
        }
    }

    pub fn from_result(verb: Verb, entity: &str, result: Result<S, Error>) -> Self {
        match result {
            Ok(state) => Self::ok(state),
            Err(err) => Self::from_error(verb, entity, &err),
        }
    }

    /// A 404 on Read means the entity was removed outside of the host.
    pub fn from_read(entity: &str, id: &str, result: Result<S, Error>) -> Self {
        match result {
            Err(err) if err.is_not_found() => {
                warn!("{entity} {id} no longer exists, removing from state");
                Self::gone()
            }
            other => Self::from_result(Verb::Reading, entity, other),
        }
    }

    /// Delete carries no state back on success.
    pub fn from_delete(entity: &str, result: Result<(), Error>) -> Self {
        match result {
            Ok(()) => Self::gone(),
            Err(err) => Self::from_error(Verb::Deleting, entity, &err),
        }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

/// Maps a crate error onto the diagnostic the host shows the user.
pub fn error_diagnostics(verb: Verb, entity: &str, err: &Error) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    match err {
        Error::Validation { path, message } => diagnostics.add_attribute_error(
            AttributePath::parse(path),
            "Invalid Attribute Value",
            message.clone(),
        ),
        Error::ImportId { .. } => {
            diagnostics.add_error("Unexpected Import Identifier", err.to_string())
        }
        Error::Unconfigured => diagnostics.add_error(
            "Unconfigured Governance Client",
            "the provider has not been configured with a governance client",
        ),
        _ => diagnostics.add_error(format!("Error {} {entity}", verb.as_str()), err.to_string()),
    }
    diagnostics
}

/// Warning response for operations the remote API does not offer.
///
/// The host proceeds with `state` unchanged.
pub fn unsupported<S>(operation: &str, entity: &str, detail: &str, state: Option<S>) -> Response<S> {
    warn!("{operation} is not supported for {entity}: {detail}");
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_warning(format!("{operation} Not Supported"), detail.to_string());
    Response { state, diagnostics }
}

pub fn require_client(client: &Option<Arc<GovernanceClient>>) -> Result<&GovernanceClient, Error> {
    client.as_deref().ok_or(Error::Unconfigured)
}

/// Splits a composite import identifier such as `collection_id/resource_id`.
///
/// `parts` names the expected segments; every segment must be non-empty.
pub fn parse_import_id<'a>(id: &'a str, parts: &[&str]) -> Result<Vec<&'a str>, Error> {
    let segments: Vec<&str> = id.split('/').collect();
    if segments.len() != parts.len() || segments.iter().any(|s| s.is_empty()) {
        return Err(Error::ImportId {
            expected: parts.join("/"),
            got: id.to_string(),
        });
    }
    Ok(segments)
}

/// Controller contract invoked by the host for one resource type.
///
/// Controllers hold nothing but the shared client; every call is a
/// read-through to the remote service.
#[async_trait]
pub trait Resource: Send + Sync {
    type State: Send + 'static;

    /// Entity part of the type name, e.g. `campaign`.
    fn type_name_suffix(&self) -> &'static str;

    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_{}", self.type_name_suffix())
    }

    fn schema(&self) -> Schema;

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>);

    async fn create(&self, plan: Self::State) -> Response<Self::State>;

    async fn read(&self, prior: Self::State) -> Response<Self::State>;

    async fn update(&self, prior: Self::State, plan: Self::State) -> Response<Self::State>;

    async fn delete(&self, prior: Self::State) -> Response<Self::State>;

    /// Seeds a partial state from an identifier. No remote calls; Read follows.
    fn import_state(&self, id: &str) -> Response<Self::State>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::provider::diagnostics::Severity;
    use reqwest::StatusCode;

    #[test]
    fn import_id_requires_exact_segment_count() {
        let parts = ["collection_id", "resource_id"];
        assert_eq!(parse_import_id("c1/r1", &parts).expect("ok"), vec!["c1", "r1"]);
        match parse_import_id("a/b/c", &parts) {
            Err(Error::ImportId { expected, got }) => {
                assert_eq!(expected, "collection_id/resource_id");
                assert_eq!(got, "a/b/c");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(parse_import_id("a/", &parts).is_err());
        assert!(parse_import_id("a", &parts).is_err());
    }

    #[test]
    fn api_errors_become_verb_entity_diagnostics() {
        let err = Error::Api(ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"errorCode":"E0000001","errorSummary":"Api validation failed"}"#,
        ));
        let response: Response<()> = Response::from_error(Verb::Creating, "Campaign", &err);
        let diag = response.diagnostics.iter().next().expect("diagnostic");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.summary, "Error creating Campaign");
        assert!(diag.detail.contains("400 Bad Request: E0000001: Api validation failed"));
    }

    #[test]
    fn validation_errors_carry_attribute_path() {
        let err = Error::validation("values[1].name", "must not be empty");
        let diagnostics = error_diagnostics(Verb::Updating, "Entitlement", &err);
        let diag = diagnostics.iter().next().expect("diagnostic");
        assert_eq!(diag.summary, "Invalid Attribute Value");
        assert_eq!(
            diag.path.as_ref().map(ToString::to_string).as_deref(),
            Some("values[1].name")
        );
    }

    #[test]
    fn not_found_on_read_is_gone_without_diagnostics() {
        let err = Error::Api(ApiError::from_body(StatusCode::NOT_FOUND, b""));
        let response: Response<()> = Response::from_read("Campaign", "c1", Err(err));
        assert!(response.state.is_none());
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn unsupported_is_a_warning() {
        let response = unsupported("Update", "Request", "requests are immutable", Some(1));
        assert_eq!(response.state, Some(1));
        assert!(!response.has_error());
        let diag = response.diagnostics.warnings().next().expect("warning");
        assert_eq!(diag.summary, "Update Not Supported");
    }
}
