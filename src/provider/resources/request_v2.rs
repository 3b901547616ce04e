//! Access requests. A submitted request cannot be changed or withdrawn
//! through this API, so Update and Delete only warn.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{FieldValue, Request, RequestCreatable, Requested, RequestedFor, RequesterFieldValue};
use crate::provider::contract::{require_client, unsupported, Resource, Response, Verb};
use crate::provider::convert::{
    format_timestamp, optional_string, required_str, with_audit_attributes, AuditState,
};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Request";

pub const REQUESTED_TYPE: &str = "CATALOG_ENTRY";
pub const REQUESTED_FOR_TYPE: &str = "OKTA_USER";
pub const MAX_REQUESTER_FIELDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestV2State {
    pub id: Value<String>,
    pub requested: Option<RequestedBlock>,
    pub requested_for: Option<RequestedForBlock>,
    pub requester_field_values: Vec<RequesterFieldBlock>,
    pub lifecycle: RequestLifecycle,
    pub audit: AuditState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestedBlock {
    pub entry_id: Value<String>,
    pub kind: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestedForBlock {
    pub external_id: Value<String>,
    pub kind: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequesterFieldBlock {
    pub id: Value<String>,
    pub label: Value<String>,
    pub kind: Value<String>,
    pub value: Value<String>,
    pub values: Value<Vec<String>>,
}

/// Server-driven progress of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestLifecycle {
    pub status: Value<String>,
    pub granted: Value<String>,
    pub grant_status: Value<String>,
    pub resolved: Value<String>,
    pub revocation_scheduled: Value<String>,
    pub revocation_status: Value<String>,
    pub revoked: Value<String>,
    pub access_duration: Value<String>,
}

impl RequestLifecycle {
    pub fn unknown() -> Self {
        Self {
            status: Value::Unknown,
            granted: Value::Unknown,
            grant_status: Value::Unknown,
            resolved: Value::Unknown,
            revocation_scheduled: Value::Unknown,
            revocation_status: Value::Unknown,
            revoked: Value::Unknown,
            access_duration: Value::Unknown,
        }
    }

    pub fn from_request(request: &Request) -> Result<Self, Error> {
        Ok(Self {
            status: optional_string(request.status.clone()),
            granted: format_timestamp(request.granted)?,
            grant_status: optional_string(request.grant_status.clone()),
            resolved: format_timestamp(request.resolved)?,
            revocation_scheduled: format_timestamp(request.revocation_scheduled)?,
            revocation_status: optional_string(request.revocation_status.clone()),
            revoked: format_timestamp(request.revoked)?,
            access_duration: optional_string(request.access_duration.clone()),
        })
    }
}

pub fn requester_fields_block() -> Block {
    Block::list("requester_field_values")
        .with_validator(Validator::SizeAtMost(MAX_REQUESTER_FIELDS))
        .attribute(Attribute::required("id", AttributeKind::String))
        .attribute(Attribute::optional("label", AttributeKind::String))
        .attribute(
            Attribute::required("type", AttributeKind::String)
                .with_validator(Validator::OneOf(&FieldValue::TYPES)),
        )
        .attribute(Attribute::optional("value", AttributeKind::String))
        .attribute(Attribute::optional(
            "values",
            AttributeKind::list_of(AttributeKind::String),
        ))
}

pub fn with_lifecycle_attributes(schema: Schema) -> Schema {
    [
        "status",
        "granted",
        "grant_status",
        "resolved",
        "revocation_scheduled",
        "revocation_status",
        "revoked",
        "access_duration",
    ]
    .into_iter()
    .fold(schema, |schema, name| {
        schema.attribute(Attribute::computed(name, AttributeKind::String))
    })
}

pub fn request_v2_schema() -> Schema {
    let schema = Schema::new("Submits an access request for a catalog entry. Immutable once created.")
        .attribute(Attribute::id())
        .block(
            Block::single("requested")
                .attribute(Attribute::required("entry_id", AttributeKind::String).with_validator(Validator::NonEmpty))
                .attribute(
                    Attribute::required("type", AttributeKind::String)
                        .with_validator(Validator::OneOf(&[REQUESTED_TYPE])),
                ),
        )
        .block(
            Block::single("requested_for")
                .attribute(
                    Attribute::required("external_id", AttributeKind::String)
                        .with_validator(Validator::NonEmpty),
                )
                .attribute(
                    Attribute::required("type", AttributeKind::String)
                        .with_validator(Validator::OneOf(&[REQUESTED_FOR_TYPE])),
                ),
        )
        .block(requester_fields_block());
    with_audit_attributes(with_lifecycle_attributes(schema))
}

/// Builds requester field answers, one variant per declared `type`.
pub fn build_requester_fields(
    schema: &Schema,
    blocks: &[RequesterFieldBlock],
) -> Result<Vec<RequesterFieldValue>, Error> {
    schema.check_len("requester_field_values", blocks.len())?;
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let path = format!("requester_field_values[{i}]");
            let kind = required_str(&format!("{path}.type"), &block.kind)?;
            schema.check_str(&format!("{path}.type"), &kind)?;
            let values = block.values.as_known().cloned().unwrap_or_default();
            let value = FieldValue::from_parts(&kind, block.value.non_empty_owned(), values)
                .ok_or_else(|| {
                    Error::validation(format!("{path}.value"), format!("a value is required for type {kind}"))
                })?;
            Ok(RequesterFieldValue {
                id: required_str(&format!("{path}.id"), &block.id)?,
                label: block.label.non_empty_owned(),
                value,
            })
        })
        .collect()
}

pub fn requester_field_blocks(fields: &[RequesterFieldValue]) -> Vec<RequesterFieldBlock> {
    fields
        .iter()
        .map(|field| RequesterFieldBlock {
            id: Value::Known(field.id.clone()),
            label: optional_string(field.label.clone()),
            kind: Value::known(field.value.type_name()),
            value: Value::from_option(field.value.single_value().map(str::to_string)),
            values: Value::from_option(field.value.multi_values().map(<[String]>::to_vec)),
        })
        .collect()
}

pub fn build_request(state: &RequestV2State) -> Result<RequestCreatable, Error> {
    let schema = request_v2_schema();
    let requested = state
        .requested
        .as_ref()
        .ok_or_else(|| Error::validation("requested", "block is required"))?;
    let requested_for = state
        .requested_for
        .as_ref()
        .ok_or_else(|| Error::validation("requested_for", "block is required"))?;
    let requested_kind = requested.kind.non_empty().unwrap_or(REQUESTED_TYPE);
    schema.check_str("requested.type", requested_kind)?;
    let requested_for_kind = requested_for.kind.non_empty().unwrap_or(REQUESTED_FOR_TYPE);
    schema.check_str("requested_for.type", requested_for_kind)?;
    Ok(RequestCreatable {
        requested: Requested {
            entry_id: required_str("requested.entry_id", &requested.entry_id)?,
            kind: requested_kind.to_string(),
        },
        requested_for: RequestedFor {
            external_id: required_str("requested_for.external_id", &requested_for.external_id)?,
            kind: requested_for_kind.to_string(),
        },
        requester_field_values: build_requester_fields(&schema, &state.requester_field_values)?,
    })
}

pub fn apply_request_to_state(state: &mut RequestV2State, request: &Request) -> Result<(), Error> {
    state.id = Value::Known(request.id.clone());
    if let Some(requested) = &request.requested {
        state.requested = Some(RequestedBlock {
            entry_id: Value::Known(requested.entry_id.clone()),
            kind: Value::Known(requested.kind.clone()),
        });
    }
    if let Some(requested_for) = &request.requested_for {
        state.requested_for = Some(RequestedForBlock {
            external_id: Value::Known(requested_for.external_id.clone()),
            kind: Value::Known(requested_for.kind.clone()),
        });
    }
    state.requester_field_values = requester_field_blocks(&request.requester_field_values);
    state.lifecycle = RequestLifecycle::from_request(request)?;
    state.audit = AuditState::from_audit(&request.audit)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct RequestV2Resource {
    client: Option<Arc<GovernanceClient>>,
}

impl RequestV2Resource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn create_request(&self, mut plan: RequestV2State) -> Result<RequestV2State, Error> {
        let body = build_request(&plan)?;
        let client = require_client(&self.client)?;
        debug!(
            "requesting catalog entry {} for {}",
            body.requested.entry_id, body.requested_for.external_id
        );
        let request = client.create_request(&body).await?;
        apply_request_to_state(&mut plan, &request)?;
        Ok(plan)
    }

    async fn read_request(&self, mut prior: RequestV2State) -> Result<RequestV2State, Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading request {id}");
        let request = client.get_request(&id).await?;
        apply_request_to_state(&mut prior, &request)?;
        Ok(prior)
    }
}

#[async_trait]
impl Resource for RequestV2Resource {
    type State = RequestV2State;

    fn type_name_suffix(&self) -> &'static str {
        "request_v2"
    }

    fn schema(&self) -> Schema {
        request_v2_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: RequestV2State) -> Response<RequestV2State> {
        Response::from_result(Verb::Creating, ENTITY, self.create_request(plan).await)
    }

    async fn read(&self, prior: RequestV2State) -> Response<RequestV2State> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_request(prior).await)
    }

    async fn update(&self, prior: RequestV2State, _plan: RequestV2State) -> Response<RequestV2State> {
        unsupported(
            "Update",
            ENTITY,
            "submitted requests cannot be modified; the state is kept as last read",
            Some(prior),
        )
    }

    async fn delete(&self, _prior: RequestV2State) -> Response<RequestV2State> {
        unsupported(
            "Delete",
            ENTITY,
            "submitted requests cannot be withdrawn; the request is only removed from state",
            None,
        )
    }

    fn import_state(&self, id: &str) -> Response<RequestV2State> {
        Response::ok(RequestV2State {
            id: Value::known(id),
            ..Default::default()
        })
    }
}
