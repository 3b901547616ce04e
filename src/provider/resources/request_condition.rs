//! Request conditions: the only entity with a status state machine.
//!
//! ```text
//! create -> INACTIVE <-> ACTIVE (activate / deactivate endpoints)
//! delete from ACTIVE deactivates first
//! ```

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{
    AccessDurationSettings, AccessScopeSettings, IdRef, RequestCondition, RequestConditionCreatable,
    RequestConditionPatchable, RequesterSettings,
};
use crate::provider::contract::{parse_import_id, require_client, Resource, Response, Verb};
use crate::provider::convert::{
    id_blocks, id_refs, optional_string, required_str, with_audit_attributes, AuditState, IdBlock,
};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Request Condition";

pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_INACTIVE: &str = "INACTIVE";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestConditionState {
    pub id: Value<String>,
    pub resource_id: Value<String>,
    pub approval_sequence_id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub priority: Value<i32>,
    pub status: Value<String>,
    pub access_scope_settings: Option<ScopeBlock>,
    pub requester_settings: Option<ScopeBlock>,
    pub access_duration_settings: Option<AccessDurationBlock>,
    pub audit: AuditState,
}

/// `{ type, ids[] { id } }`, shared by access scope and requester settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeBlock {
    pub kind: Value<String>,
    pub ids: Vec<IdBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessDurationBlock {
    pub kind: Value<String>,
    pub duration: Value<String>,
}

pub fn access_duration_block() -> Block {
    Block::single("access_duration_settings")
        .attribute(Attribute::required("type", AttributeKind::String).with_validator(
            Validator::OneOf(&["ADMIN_FIXED_DURATION", "REQUESTER_SPECIFIED_DURATION"]),
        ))
        .attribute(
            Attribute::required("duration", AttributeKind::String)
                .with_description("ISO 8601 duration, e.g. P7D."),
        )
}

pub fn request_condition_schema() -> Schema {
    let schema = Schema::new("Routes access requests for a resource through an approval sequence.")
        .attribute(Attribute::id())
        .attribute(Attribute::required("resource_id", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(
            Attribute::required("approval_sequence_id", AttributeKind::String)
                .with_validator(Validator::NonEmpty),
        )
        .attribute(Attribute::required("name", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(Attribute::optional("description", AttributeKind::String))
        .attribute(
            Attribute::optional_computed("priority", AttributeKind::Int32)
                .with_description("Lower values take precedence."),
        )
        .attribute(
            Attribute::optional_computed("status", AttributeKind::String)
                .with_description("ACTIVE or INACTIVE. Defaults to INACTIVE.")
                .with_validator(Validator::OneOf(&[STATUS_ACTIVE, STATUS_INACTIVE])),
        )
        .block(
            Block::single("access_scope_settings")
                .attribute(Attribute::required("type", AttributeKind::String).with_validator(
                    Validator::OneOf(&["RESOURCE_DEFAULT", "GROUPS", "ENTITLEMENT_BUNDLES"]),
                ))
                .block(Block::id_list("ids")),
        )
        .block(
            Block::single("requester_settings")
                .attribute(
                    Attribute::required("type", AttributeKind::String)
                        .with_validator(Validator::OneOf(&["EVERYONE", "GROUPS"])),
                )
                .block(Block::id_list("ids")),
        )
        .block(access_duration_block());
    with_audit_attributes(schema)
}

/// List variants need at least one id; the others carry none.
fn scope_ids(path: &str, kind: &str, block: &ScopeBlock, listed: bool) -> Result<Vec<IdRef>, Error> {
    let ids_path = format!("{path}.ids");
    match (listed, block.ids.is_empty()) {
        (true, true) => Err(Error::validation(
            ids_path,
            format!("at least one id is required when type is {kind}"),
        )),
        (false, false) => Err(Error::validation(
            ids_path,
            format!("must not be set when type is {kind}"),
        )),
        _ => id_refs(&ids_path, &block.ids),
    }
}

fn build_access_scope(schema: &Schema, block: &ScopeBlock) -> Result<AccessScopeSettings, Error> {
    let path = "access_scope_settings";
    let kind = required_str(&format!("{path}.type"), &block.kind)?;
    schema.check_str(&format!("{path}.type"), &kind)?;
    match kind.as_str() {
        "RESOURCE_DEFAULT" => {
            scope_ids(path, &kind, block, false)?;
            Ok(AccessScopeSettings::ResourceDefault)
        }
        "GROUPS" => Ok(AccessScopeSettings::Groups {
            groups: scope_ids(path, &kind, block, true)?,
        }),
        "ENTITLEMENT_BUNDLES" => Ok(AccessScopeSettings::EntitlementBundles {
            entitlement_bundles: scope_ids(path, &kind, block, true)?,
        }),
        other => Err(Error::validation(format!("{path}.type"), format!("unsupported type {other:?}"))),
    }
}

fn build_requester(schema: &Schema, block: &ScopeBlock) -> Result<RequesterSettings, Error> {
    let path = "requester_settings";
    let kind = required_str(&format!("{path}.type"), &block.kind)?;
    schema.check_str(&format!("{path}.type"), &kind)?;
    match kind.as_str() {
        "EVERYONE" => {
            scope_ids(path, &kind, block, false)?;
            Ok(RequesterSettings::Everyone)
        }
        "GROUPS" => Ok(RequesterSettings::Groups {
            groups: scope_ids(path, &kind, block, true)?,
        }),
        other => Err(Error::validation(format!("{path}.type"), format!("unsupported type {other:?}"))),
    }
}

/// Fixed durations travel as `duration`, requester-chosen ones as
/// `maximumDuration`.
pub fn build_access_duration(
    schema: &Schema,
    block: &AccessDurationBlock,
) -> Result<AccessDurationSettings, Error> {
    let kind = required_str("access_duration_settings.type", &block.kind)?;
    schema.check_str("access_duration_settings.type", &kind)?;
    let duration = required_str("access_duration_settings.duration", &block.duration)?;
    match kind.as_str() {
        "ADMIN_FIXED_DURATION" => Ok(AccessDurationSettings::AdminFixedDuration { duration }),
        "REQUESTER_SPECIFIED_DURATION" => Ok(AccessDurationSettings::RequesterSpecifiedDuration {
            maximum_duration: duration,
        }),
        other => Err(Error::validation(
            "access_duration_settings.type",
            format!("unsupported type {other:?}"),
        )),
    }
}

pub fn access_duration_to_state(settings: &AccessDurationSettings) -> AccessDurationBlock {
    AccessDurationBlock {
        kind: Value::known(settings.type_name()),
        duration: Value::known(settings.duration()),
    }
}

pub fn build_request_condition(state: &RequestConditionState) -> Result<RequestConditionCreatable, Error> {
    let schema = request_condition_schema();
    if let Some(status) = state.status.non_empty() {
        schema.check_str("status", status)?;
    }
    let access_scope = state
        .access_scope_settings
        .as_ref()
        .ok_or_else(|| Error::validation("access_scope_settings", "block is required"))?;
    let requester = state
        .requester_settings
        .as_ref()
        .ok_or_else(|| Error::validation("requester_settings", "block is required"))?;
    Ok(RequestConditionCreatable {
        approval_sequence_id: required_str("approval_sequence_id", &state.approval_sequence_id)?,
        name: required_str("name", &state.name)?,
        description: state.description.non_empty_owned(),
        priority: state.priority.get(),
        access_scope_settings: build_access_scope(&schema, access_scope)?,
        requester_settings: build_requester(&schema, requester)?,
        access_duration_settings: state
            .access_duration_settings
            .as_ref()
            .map(|block| build_access_duration(&schema, block))
            .transpose()?,
    })
}

/// Patch body: the full declared shape, status excluded.
pub fn build_request_condition_patch(
    state: &RequestConditionState,
) -> Result<RequestConditionPatchable, Error> {
    let creatable = build_request_condition(state)?;
    Ok(RequestConditionPatchable {
        approval_sequence_id: Some(creatable.approval_sequence_id),
        name: Some(creatable.name),
        description: creatable.description,
        priority: creatable.priority,
        access_scope_settings: Some(creatable.access_scope_settings),
        requester_settings: Some(creatable.requester_settings),
        access_duration_settings: creatable.access_duration_settings,
    })
}

pub fn apply_request_condition_to_state(
    state: &mut RequestConditionState,
    condition: &RequestCondition,
) -> Result<(), Error> {
    state.id = Value::Known(condition.id.clone());
    if let Some(resource_id) = condition.resource_id.as_deref().filter(|r| !r.is_empty()) {
        state.resource_id = Value::known(resource_id);
    }
    state.approval_sequence_id = Value::Known(condition.approval_sequence_id.clone());
    state.name = Value::Known(condition.name.clone());
    state.description = optional_string(condition.description.clone());
    state.priority = Value::from_option(condition.priority);
    state.status = Value::known(condition.status.as_str());
    state.access_scope_settings = Some(ScopeBlock {
        kind: Value::known(condition.access_scope_settings.type_name()),
        ids: id_blocks(condition.access_scope_settings.ids()),
    });
    state.requester_settings = Some(ScopeBlock {
        kind: Value::known(condition.requester_settings.type_name()),
        ids: id_blocks(condition.requester_settings.ids()),
    });
    state.access_duration_settings = condition
        .access_duration_settings
        .as_ref()
        .map(access_duration_to_state);
    state.audit = AuditState::from_audit(&condition.audit)?;
    Ok(())
}

/// Declared status; unknown or unset means the server default.
fn planned_status(state: &RequestConditionState) -> &str {
    state.status.non_empty().unwrap_or(STATUS_INACTIVE)
}

#[derive(Debug, Default)]
pub struct RequestConditionResource {
    client: Option<Arc<GovernanceClient>>,
}

impl RequestConditionResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn create_condition(
        &self,
        mut plan: RequestConditionState,
    ) -> Result<RequestConditionState, Error> {
        let body = build_request_condition(&plan)?;
        let resource_id = required_str("resource_id", &plan.resource_id)?;
        let client = require_client(&self.client)?;
        debug!("creating request condition {} on {resource_id}", body.name);
        let mut condition = client.create_request_condition(&resource_id, &body).await?;
        if planned_status(&plan) == STATUS_ACTIVE {
            let id = condition.id.clone();
            debug!("activating request condition {id}");
            condition = client.activate_request_condition(&resource_id, &id).await?;
        }
        apply_request_condition_to_state(&mut plan, &condition)?;
        Ok(plan)
    }

    async fn read_condition(
        &self,
        mut prior: RequestConditionState,
    ) -> Result<RequestConditionState, Error> {
        let client = require_client(&self.client)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading request condition {id} on {resource_id}");
        let condition = client.get_request_condition(&resource_id, &id).await?;
        apply_request_condition_to_state(&mut prior, &condition)?;
        Ok(prior)
    }

    async fn update_condition(
        &self,
        prior: RequestConditionState,
        mut plan: RequestConditionState,
    ) -> Result<RequestConditionState, Error> {
        let patch = build_request_condition_patch(&plan)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        let id = required_str("id", &prior.id)?;
        let from = planned_status(&prior).to_string();
        let to = if plan.status.is_unknown() {
            from.clone()
        } else {
            planned_status(&plan).to_string()
        };
        let client = require_client(&self.client)?;
        debug!("patching request condition {id} on {resource_id}");
        let mut condition = client.patch_request_condition(&resource_id, &id, &patch).await?;
        if from != to {
            condition = match to.as_str() {
                STATUS_ACTIVE => {
                    debug!("activating request condition {id}");
                    client.activate_request_condition(&resource_id, &id).await?
                }
                _ => {
                    debug!("deactivating request condition {id}");
                    client.deactivate_request_condition(&resource_id, &id).await?
                }
            };
        }
        plan.resource_id = Value::Known(resource_id);
        apply_request_condition_to_state(&mut plan, &condition)?;
        Ok(plan)
    }

    async fn delete_condition(&self, prior: &RequestConditionState) -> Result<(), Error> {
        let client = require_client(&self.client)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        let id = required_str("id", &prior.id)?;
        if planned_status(prior) == STATUS_ACTIVE {
            debug!("deactivating request condition {id} before delete");
            client.deactivate_request_condition(&resource_id, &id).await?;
        }
        debug!("deleting request condition {id} on {resource_id}");
        client.delete_request_condition(&resource_id, &id).await
    }
}

#[async_trait]
impl Resource for RequestConditionResource {
    type State = RequestConditionState;

    fn type_name_suffix(&self) -> &'static str {
        "request_condition"
    }

    fn schema(&self) -> Schema {
        request_condition_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: RequestConditionState) -> Response<RequestConditionState> {
        Response::from_result(Verb::Creating, ENTITY, self.create_condition(plan).await)
    }

    async fn read(&self, prior: RequestConditionState) -> Response<RequestConditionState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_condition(prior).await)
    }

    async fn update(
        &self,
        prior: RequestConditionState,
        plan: RequestConditionState,
    ) -> Response<RequestConditionState> {
        Response::from_result(Verb::Updating, ENTITY, self.update_condition(prior, plan).await)
    }

    async fn delete(&self, prior: RequestConditionState) -> Response<RequestConditionState> {
        Response::from_delete(ENTITY, self.delete_condition(&prior).await)
    }

    fn import_state(&self, id: &str) -> Response<RequestConditionState> {
        match parse_import_id(id, &["resource_id", "condition_id"]) {
            Ok(parts) => Response::ok(RequestConditionState {
                resource_id: Value::known(parts[0]),
                id: Value::known(parts[1]),
                ..Default::default()
            }),
            Err(err) => Response::from_error(Verb::Importing, ENTITY, &err),
        }
    }
}
