use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{AuditFields, Entitlement, EntitlementValue};
use crate::provider::contract::{require_client, Resource, Response, Verb};
use crate::provider::convert::{
    optional_string, required_str, with_audit_attributes, AuditState, ExternalRefBlock,
};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Entitlement";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntitlementState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub data_type: Value<String>,
    pub external_value: Value<String>,
    pub multi_value: Value<bool>,
    pub parent: Option<ExternalRefBlock>,
    pub parent_resource_orn: Value<String>,
    pub value: Value<String>,
    pub values: Vec<EntitlementValueBlock>,
    pub audit: AuditState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntitlementValueBlock {
    pub id: Value<String>,
    pub external_value: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
}

pub fn entitlement_schema() -> Schema {
    let schema = Schema::new("Manages an entitlement defined on a resource.")
        .attribute(Attribute::id())
        .attribute(Attribute::optional("name", AttributeKind::String))
        .attribute(Attribute::optional("description", AttributeKind::String))
        .attribute(
            Attribute::required("data_type", AttributeKind::String)
                .with_description("Data type of the entitlement values, e.g. string or array."),
        )
        .attribute(Attribute::required("external_value", AttributeKind::String))
        .attribute(
            Attribute::required("multi_value", AttributeKind::Bool)
                .with_description("Whether several values may be granted. Not allowed for string types."),
        )
        .attribute(Attribute::computed("parent_resource_orn", AttributeKind::String))
        .attribute(Attribute::optional("value", AttributeKind::String))
        .block(
            Block::single("parent")
                .attribute(Attribute::required("external_id", AttributeKind::String))
                .attribute(Attribute::required("type", AttributeKind::String)),
        )
        .block(
            Block::list("values")
                .attribute(Attribute::computed("id", AttributeKind::String))
                .attribute(Attribute::optional("external_value", AttributeKind::String))
                .attribute(Attribute::optional("name", AttributeKind::String))
                .attribute(Attribute::optional("description", AttributeKind::String)),
        );
    with_audit_attributes(schema)
}

pub fn build_entitlement(state: &EntitlementState) -> Result<Entitlement, Error> {
    let data_type = required_str("data_type", &state.data_type)?;
    let multi_value = state.multi_value.get().unwrap_or(false);
    if multi_value && data_type == "string" {
        return Err(Error::validation(
            "multi_value",
            "multi_value cannot be true when data_type is \"string\"",
        ));
    }
    let parent = state
        .parent
        .as_ref()
        .ok_or_else(|| Error::validation("parent", "parent block is required"))?
        .to_wire("parent")?;
    let values = state
        .values
        .iter()
        .map(|value| EntitlementValue {
            id: value.id.non_empty_owned(),
            external_value: value.external_value.non_empty_owned(),
            name: value.name.non_empty_owned(),
            description: value.description.non_empty_owned(),
        })
        .collect();
    Ok(Entitlement {
        id: state.id.non_empty_owned(),
        name: state.name.non_empty_owned(),
        description: state.description.non_empty_owned(),
        data_type,
        external_value: required_str("external_value", &state.external_value)?,
        multi_value,
        parent,
        parent_resource_orn: None,
        value: state.value.non_empty_owned(),
        values,
        audit: AuditFields::default(),
    })
}

pub fn apply_entitlement_to_state(
    state: &mut EntitlementState,
    entitlement: &Entitlement,
) -> Result<(), Error> {
    state.id = optional_string(entitlement.id.clone());
    state.name = optional_string(entitlement.name.clone());
    state.description = optional_string(entitlement.description.clone());
    state.data_type = Value::Known(entitlement.data_type.clone());
    state.external_value = Value::Known(entitlement.external_value.clone());
    state.multi_value = Value::Known(entitlement.multi_value);
    state.parent = Some(ExternalRefBlock::from_wire(&entitlement.parent));
    state.parent_resource_orn = optional_string(entitlement.parent_resource_orn.clone());
    state.value = optional_string(entitlement.value.clone());
    state.values = entitlement
        .values
        .iter()
        .map(|value| EntitlementValueBlock {
            id: optional_string(value.id.clone()),
            external_value: optional_string(value.external_value.clone()),
            name: optional_string(value.name.clone()),
            description: optional_string(value.description.clone()),
        })
        .collect();
    state.audit = AuditState::from_audit(&entitlement.audit)?;
    Ok(())
}

/// Pairs planned values with prior ones by position so the replace keeps
/// existing value ids. Values past the prior length stay without an id.
fn reattach_value_ids(prior: &EntitlementState, plan: &mut EntitlementState) {
    for (planned, previous) in plan.values.iter_mut().zip(prior.values.iter()) {
        if planned.id.non_empty().is_none() {
            if let Some(id) = previous.id.non_empty() {
                planned.id = Value::Known(id.to_string());
            }
        }
    }
    for planned in plan.values.iter_mut().skip(prior.values.len()) {
        if planned.id.is_unknown() {
            planned.id = Value::Null;
        }
    }
}

#[derive(Debug, Default)]
pub struct EntitlementResource {
    client: Option<Arc<GovernanceClient>>,
}

impl EntitlementResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn create_entitlement(&self, mut plan: EntitlementState) -> Result<EntitlementState, Error> {
        let body = build_entitlement(&plan)?;
        let client = require_client(&self.client)?;
        debug!("creating entitlement {}", body.external_value);
        let created = client.create_entitlement(&body).await?;
        apply_entitlement_to_state(&mut plan, &created)?;
        Ok(plan)
    }

    async fn read_entitlement(&self, mut prior: EntitlementState) -> Result<EntitlementState, Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading entitlement {id}");
        let entitlement = client.get_entitlement(&id).await?;
        apply_entitlement_to_state(&mut prior, &entitlement)?;
        Ok(prior)
    }

    async fn update_entitlement(
        &self,
        prior: EntitlementState,
        mut plan: EntitlementState,
    ) -> Result<EntitlementState, Error> {
        let id = required_str("id", &prior.id)?;
        plan.id = Value::Known(id.clone());
        reattach_value_ids(&prior, &mut plan);
        let body = build_entitlement(&plan)?;
        let client = require_client(&self.client)?;
        debug!("replacing entitlement {id}");
        let updated = client.replace_entitlement(&id, &body).await?;
        apply_entitlement_to_state(&mut plan, &updated)?;
        Ok(plan)
    }

    async fn delete_entitlement(&self, prior: &EntitlementState) -> Result<(), Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("deleting entitlement {id}");
        client.delete_entitlement(&id).await
    }
}

#[async_trait]
impl Resource for EntitlementResource {
    type State = EntitlementState;

    fn type_name_suffix(&self) -> &'static str {
        "entitlement"
    }

    fn schema(&self) -> Schema {
        entitlement_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: EntitlementState) -> Response<EntitlementState> {
        Response::from_result(Verb::Creating, ENTITY, self.create_entitlement(plan).await)
    }

    async fn read(&self, prior: EntitlementState) -> Response<EntitlementState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_entitlement(prior).await)
    }

    async fn update(&self, prior: EntitlementState, plan: EntitlementState) -> Response<EntitlementState> {
        Response::from_result(Verb::Updating, ENTITY, self.update_entitlement(prior, plan).await)
    }

    async fn delete(&self, prior: EntitlementState) -> Response<EntitlementState> {
        Response::from_delete(ENTITY, self.delete_entitlement(&prior).await)
    }

    fn import_state(&self, id: &str) -> Response<EntitlementState> {
        Response::ok(EntitlementState {
            id: Value::known(id),
            ..Default::default()
        })
    }
}
