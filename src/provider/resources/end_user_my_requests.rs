//! Catalog requests filed by the calling end user.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{MyRequestCreatable, Request};
use crate::provider::contract::{
    parse_import_id, require_client, unsupported, Resource, Response, Verb,
};
use crate::provider::convert::{required_str, with_audit_attributes, AuditState};
use crate::provider::resources::request_v2::{
    build_requester_fields, requester_field_blocks, requester_fields_block,
    with_lifecycle_attributes, RequestLifecycle, RequesterFieldBlock,
};
use crate::provider::schema::{Attribute, AttributeKind, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "End User Request";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MyRequestState {
    pub id: Value<String>,
    pub entry_id: Value<String>,
    pub requester_field_values: Vec<RequesterFieldBlock>,
    pub lifecycle: RequestLifecycle,
    pub audit: AuditState,
}

pub fn my_request_schema() -> Schema {
    let schema = Schema::new("Requests a catalog entry as the calling end user. Immutable once created.")
        .attribute(Attribute::id())
        .attribute(Attribute::required("entry_id", AttributeKind::String).with_validator(Validator::NonEmpty))
        .block(requester_fields_block());
    with_audit_attributes(with_lifecycle_attributes(schema))
}

pub fn build_my_request(state: &MyRequestState) -> Result<MyRequestCreatable, Error> {
    let schema = my_request_schema();
    Ok(MyRequestCreatable {
        requester_field_values: build_requester_fields(&schema, &state.requester_field_values)?,
    })
}

pub fn apply_my_request_to_state(state: &mut MyRequestState, request: &Request) -> Result<(), Error> {
    state.id = Value::Known(request.id.clone());
    if let Some(requested) = &request.requested {
        state.entry_id = Value::Known(requested.entry_id.clone());
    }
    state.requester_field_values = requester_field_blocks(&request.requester_field_values);
    state.lifecycle = RequestLifecycle::from_request(request)?;
    state.audit = AuditState::from_audit(&request.audit)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct EndUserMyRequestsResource {
    client: Option<Arc<GovernanceClient>>,
}

impl EndUserMyRequestsResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn create_my_request(&self, mut plan: MyRequestState) -> Result<MyRequestState, Error> {
        let entry_id = required_str("entry_id", &plan.entry_id)?;
        let body = build_my_request(&plan)?;
        let client = require_client(&self.client)?;
        debug!("requesting catalog entry {entry_id} as end user");
        let request = client.create_my_request(&entry_id, &body).await?;
        apply_my_request_to_state(&mut plan, &request)?;
        Ok(plan)
    }

    async fn read_my_request(&self, mut prior: MyRequestState) -> Result<MyRequestState, Error> {
        let client = require_client(&self.client)?;
        let entry_id = required_str("entry_id", &prior.entry_id)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading end user request {id} for entry {entry_id}");
        let request = client.get_my_request(&entry_id, &id).await?;
        apply_my_request_to_state(&mut prior, &request)?;
        Ok(prior)
    }
}

#[async_trait]
impl Resource for EndUserMyRequestsResource {
    type State = MyRequestState;

    fn type_name_suffix(&self) -> &'static str {
        "end_user_my_requests"
    }

    fn schema(&self) -> Schema {
        my_request_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: MyRequestState) -> Response<MyRequestState> {
        Response::from_result(Verb::Creating, ENTITY, self.create_my_request(plan).await)
    }

    async fn read(&self, prior: MyRequestState) -> Response<MyRequestState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_my_request(prior).await)
    }

    async fn update(&self, prior: MyRequestState, _plan: MyRequestState) -> Response<MyRequestState> {
        unsupported(
            "Update",
            ENTITY,
            "submitted requests cannot be modified; the state is kept as last read",
            Some(prior),
        )
    }

    async fn delete(&self, _prior: MyRequestState) -> Response<MyRequestState> {
        unsupported(
            "Delete",
            ENTITY,
            "submitted requests cannot be withdrawn; the request is only removed from state",
            None,
        )
    }

    fn import_state(&self, id: &str) -> Response<MyRequestState> {
        match parse_import_id(id, &["request_id", "entry_id"]) {
            Ok(parts) => Response::ok(MyRequestState {
                id: Value::known(parts[0]),
                entry_id: Value::known(parts[1]),
                ..Default::default()
            }),
            Err(err) => Response::from_error(Verb::Importing, ENTITY, &err),
        }
    }
}
