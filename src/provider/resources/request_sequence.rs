//! Approval sequences are authored in the admin console. The provider
//! mirrors them after import and can delete them.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::RequestSequence;
use crate::provider::contract::{
    parse_import_id, require_client, unsupported, Resource, Response, Verb,
};
use crate::provider::convert::{optional_string, required_str, with_audit_attributes, AuditState};
use crate::provider::schema::{Attribute, AttributeKind, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Request Sequence";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestSequenceState {
    pub id: Value<String>,
    pub resource_id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub link: Value<String>,
    pub compatible_resource_types: Value<Vec<String>>,
    pub audit: AuditState,
}

pub fn request_sequence_schema() -> Schema {
    let schema = Schema::new("Read-only mirror of an approval sequence. Import-only.")
        .attribute(Attribute::required("id", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(
            Attribute::required("resource_id", AttributeKind::String)
                .with_validator(Validator::NonEmpty),
        )
        .attribute(Attribute::computed("name", AttributeKind::String))
        .attribute(Attribute::computed("description", AttributeKind::String))
        .attribute(Attribute::computed("link", AttributeKind::String))
        .attribute(Attribute::computed(
            "compatible_resource_types",
            AttributeKind::list_of(AttributeKind::String),
        ));
    with_audit_attributes(schema)
}

pub fn apply_request_sequence_to_state(
    state: &mut RequestSequenceState,
    sequence: &RequestSequence,
) -> Result<(), Error> {
    state.id = Value::Known(sequence.id.clone());
    state.name = Value::Known(sequence.name.clone());
    state.description = optional_string(sequence.description.clone());
    state.link = optional_string(sequence.link.clone());
    state.compatible_resource_types = Value::Known(sequence.compatible_resource_types.clone());
    state.audit = AuditState::from_audit(&sequence.audit)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct RequestSequenceResource {
    client: Option<Arc<GovernanceClient>>,
}

impl RequestSequenceResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn read_sequence(&self, mut prior: RequestSequenceState) -> Result<RequestSequenceState, Error> {
        let client = require_client(&self.client)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading request sequence {id} on {resource_id}");
        let sequence = client.get_request_sequence(&resource_id, &id).await?;
        apply_request_sequence_to_state(&mut prior, &sequence)?;
        Ok(prior)
    }

    async fn delete_sequence(&self, prior: &RequestSequenceState) -> Result<(), Error> {
        let client = require_client(&self.client)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        let id = required_str("id", &prior.id)?;
        debug!("deleting request sequence {id} on {resource_id}");
        client.delete_request_sequence(&resource_id, &id).await
    }
}

#[async_trait]
impl Resource for RequestSequenceResource {
    type State = RequestSequenceState;

    fn type_name_suffix(&self) -> &'static str {
        "request_sequence"
    }

    fn schema(&self) -> Schema {
        request_sequence_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: RequestSequenceState) -> Response<RequestSequenceState> {
        unsupported(
            "Create",
            ENTITY,
            "request sequences are managed in the Okta admin console; import them instead",
            Some(plan),
        )
    }

    async fn read(&self, prior: RequestSequenceState) -> Response<RequestSequenceState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_sequence(prior).await)
    }

    async fn update(
        &self,
        prior: RequestSequenceState,
        _plan: RequestSequenceState,
    ) -> Response<RequestSequenceState> {
        unsupported(
            "Update",
            ENTITY,
            "request sequences are read-only through the governance API",
            Some(prior),
        )
    }

    async fn delete(&self, prior: RequestSequenceState) -> Response<RequestSequenceState> {
        Response::from_delete(ENTITY, self.delete_sequence(&prior).await)
    }

    fn import_state(&self, id: &str) -> Response<RequestSequenceState> {
        match parse_import_id(id, &["resource_id", "sequence_id"]) {
            Ok(parts) => Response::ok(RequestSequenceState {
                resource_id: Value::known(parts[0]),
                id: Value::known(parts[1]),
                ..Default::default()
            }),
            Err(err) => Response::from_error(Verb::Importing, ENTITY, &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn apply_mirrors_the_sequence() {
        let sequence: RequestSequence = serde_json::from_value(json!({
            "id": "seq1",
            "name": "Manager then owner",
            "link": "https://example.okta.com/admin/sequences/seq1",
            "compatibleResourceTypes": ["APPLICATION"],
            "created": "2024-05-01T10:00:00Z"
        }))
        .expect("decode");
        let mut state = RequestSequenceState::default();
        apply_request_sequence_to_state(&mut state, &sequence).expect("apply");
        assert_eq!(state.name, Value::from("Manager then owner"));
        assert!(state.description.is_null());
        assert_eq!(state.audit.created, Value::from("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn import_splits_resource_and_sequence() {
        let resource = RequestSequenceResource::default();
        let state = resource.import_state("0oares/seq1").state.expect("state");
        assert_eq!(state.resource_id, Value::from("0oares"));
        assert_eq!(state.id, Value::from("seq1"));
        assert!(resource.import_state("seq1").has_error());
    }

    #[tokio::test]
    async fn create_and_update_only_warn() {
        let resource = RequestSequenceResource::default();
        let created = resource.create(RequestSequenceState::default()).await;
        assert!(!created.has_error());
        assert_eq!(
            created.diagnostics.warnings().next().map(|d| d.summary.as_str()),
            Some("Create Not Supported")
        );
        let prior = RequestSequenceState {
            id: Value::from("seq1"),
            ..Default::default()
        };
        let updated = resource.update(prior.clone(), RequestSequenceState::default()).await;
        assert_eq!(updated.state, Some(prior));
    }
}
