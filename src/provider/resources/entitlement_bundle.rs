use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{AuditFields, EntitlementBundle};
use crate::provider::contract::{require_client, Resource, Response, Verb};
use crate::provider::convert::{
    grant_blocks, grants_from_blocks, optional_string, required_str, with_audit_attributes,
    AuditState, ExternalRefBlock, GrantBlock,
};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Entitlement Bundle";

/// Mirror of an entitlement bundle. `entitlements_bundles` maps to the
/// wire `entitlements` list and is kept in id order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntitlementBundleState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub status: Value<String>,
    pub target: Option<ExternalRefBlock>,
    pub target_resource_orn: Value<String>,
    pub entitlements_bundles: Vec<GrantBlock>,
    pub audit: AuditState,
}

pub fn entitlement_bundle_schema() -> Schema {
    let schema = Schema::new("Manages a named set of entitlement values under one resource.")
        .attribute(Attribute::id())
        .attribute(Attribute::required("name", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(Attribute::optional("description", AttributeKind::String))
        .attribute(Attribute::computed("status", AttributeKind::String))
        .attribute(Attribute::computed("target_resource_orn", AttributeKind::String))
        .block(
            Block::single("target")
                .attribute(Attribute::required("external_id", AttributeKind::String))
                .attribute(Attribute::required("type", AttributeKind::String)),
        )
        .block(
            Block::set("entitlements_bundles")
                .with_validator(Validator::SizeAtLeast(1))
                .attribute(Attribute::required("id", AttributeKind::String))
                .block(Block::id_list("values")),
        );
    with_audit_attributes(schema)
}

pub fn build_entitlement_bundle(state: &EntitlementBundleState) -> Result<EntitlementBundle, Error> {
    let schema = entitlement_bundle_schema();
    let name = required_str("name", &state.name)?;
    schema.check_str("name", &name)?;
    schema.check_len("entitlements_bundles", state.entitlements_bundles.len())?;
    let target = state
        .target
        .as_ref()
        .ok_or_else(|| Error::validation("target", "target block is required"))?
        .to_wire("target")?;
    Ok(EntitlementBundle {
        id: state.id.non_empty_owned(),
        name,
        description: state.description.non_empty_owned(),
        status: None,
        target,
        target_resource_orn: None,
        entitlements: grants_from_blocks("entitlements_bundles", &state.entitlements_bundles)?,
        audit: AuditFields::default(),
    })
}

pub fn apply_entitlement_bundle_to_state(
    state: &mut EntitlementBundleState,
    bundle: &EntitlementBundle,
) -> Result<(), Error> {
    state.id = optional_string(bundle.id.clone());
    state.name = Value::Known(bundle.name.clone());
    state.description = optional_string(bundle.description.clone());
    state.status = optional_string(bundle.status.clone());
    state.target = Some(ExternalRefBlock::from_wire(&bundle.target));
    state.target_resource_orn = optional_string(bundle.target_resource_orn.clone());
    state.entitlements_bundles = grant_blocks(bundle.entitlements.clone());
    state.audit = AuditState::from_audit(&bundle.audit)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct EntitlementBundleResource {
    client: Option<Arc<GovernanceClient>>,
}

impl EntitlementBundleResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn create_bundle(&self, mut plan: EntitlementBundleState) -> Result<EntitlementBundleState, Error> {
        let body = build_entitlement_bundle(&plan)?;
        let client = require_client(&self.client)?;
        debug!("creating entitlement bundle {}", body.name);
        let created = client.create_entitlement_bundle(&body).await?;
        apply_entitlement_bundle_to_state(&mut plan, &created)?;
        Ok(plan)
    }

    async fn read_bundle(&self, mut prior: EntitlementBundleState) -> Result<EntitlementBundleState, Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading entitlement bundle {id}");
        let bundle = client.get_entitlement_bundle(&id).await?;
        apply_entitlement_bundle_to_state(&mut prior, &bundle)?;
        Ok(prior)
    }

    async fn update_bundle(
        &self,
        prior: EntitlementBundleState,
        mut plan: EntitlementBundleState,
    ) -> Result<EntitlementBundleState, Error> {
        let id = required_str("id", &prior.id)?;
        plan.id = Value::Known(id.clone());
        let body = build_entitlement_bundle(&plan)?;
        let client = require_client(&self.client)?;
        debug!("replacing entitlement bundle {id}");
        let updated = client.replace_entitlement_bundle(&id, &body).await?;
        apply_entitlement_bundle_to_state(&mut plan, &updated)?;
        Ok(plan)
    }

    async fn delete_bundle(&self, prior: &EntitlementBundleState) -> Result<(), Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("deleting entitlement bundle {id}");
        client.delete_entitlement_bundle(&id).await
    }
}

#[async_trait]
impl Resource for EntitlementBundleResource {
    type State = EntitlementBundleState;

    fn type_name_suffix(&self) -> &'static str {
        "entitlement_bundle"
    }

    fn schema(&self) -> Schema {
        entitlement_bundle_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: EntitlementBundleState) -> Response<EntitlementBundleState> {
        Response::from_result(Verb::Creating, ENTITY, self.create_bundle(plan).await)
    }

    async fn read(&self, prior: EntitlementBundleState) -> Response<EntitlementBundleState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_bundle(prior).await)
    }

    async fn update(
        &self,
        prior: EntitlementBundleState,
        plan: EntitlementBundleState,
    ) -> Response<EntitlementBundleState> {
        Response::from_result(Verb::Updating, ENTITY, self.update_bundle(prior, plan).await)
    }

    async fn delete(&self, prior: EntitlementBundleState) -> Response<EntitlementBundleState> {
        Response::from_delete(ENTITY, self.delete_bundle(&prior).await)
    }

    fn import_state(&self, id: &str) -> Response<EntitlementBundleState> {
        Response::ok(EntitlementBundleState {
            id: Value::known(id),
            ..Default::default()
        })
    }
}
