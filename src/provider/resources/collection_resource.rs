//! Applications (with entitlements) added to a collection.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{CollectionResource, CollectionResourceCreatable, CollectionResourcePatchable};
use crate::provider::contract::{parse_import_id, require_client, Resource, Response, Verb};
use crate::provider::convert::{
    grant_blocks, grants_from_blocks, required_str, with_audit_attributes, AuditState, GrantBlock,
};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Collection Resource";

/// Entitlements are held sorted by id, values too, so the server's order
/// never shows up as drift.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionResourceState {
    pub collection_id: Value<String>,
    pub resource_id: Value<String>,
    pub resource_orn: Value<String>,
    pub entitlements: Vec<GrantBlock>,
    pub audit: AuditState,
}

pub fn collection_resource_schema() -> Schema {
    let schema = Schema::new("Adds a resource and a subset of its entitlements to a collection.")
        .attribute(
            Attribute::required("collection_id", AttributeKind::String)
                .with_validator(Validator::NonEmpty),
        )
        .attribute(Attribute::computed("resource_id", AttributeKind::String))
        .attribute(
            Attribute::required("resource_orn", AttributeKind::String)
                .with_description("ORN of the resource, e.g. orn:okta:idp:<org>:apps:<app>:<id>.")
                .with_validator(Validator::Orn),
        )
        .block(
            Block::set("entitlements")
                .attribute(Attribute::required("id", AttributeKind::String))
                .block(Block::id_list("values")),
        );
    with_audit_attributes(schema)
}

fn validated_orn(state: &CollectionResourceState) -> Result<String, Error> {
    let orn = required_str("resource_orn", &state.resource_orn)?;
    collection_resource_schema().check_str("resource_orn", &orn)?;
    Ok(orn)
}

pub fn build_collection_resource(
    state: &CollectionResourceState,
) -> Result<CollectionResourceCreatable, Error> {
    Ok(CollectionResourceCreatable {
        resource_orn: validated_orn(state)?,
        entitlements: grants_from_blocks("entitlements", &state.entitlements)?,
    })
}

pub fn build_collection_resource_patch(
    state: &CollectionResourceState,
) -> Result<CollectionResourcePatchable, Error> {
    validated_orn(state)?;
    Ok(CollectionResourcePatchable {
        entitlements: grants_from_blocks("entitlements", &state.entitlements)?,
    })
}

pub fn apply_collection_resource_to_state(
    state: &mut CollectionResourceState,
    resource: &CollectionResource,
) -> Result<(), Error> {
    state.resource_id = Value::Known(resource.resource_id.clone());
    state.resource_orn = Value::Known(resource.resource_orn.clone());
    state.entitlements = grant_blocks(resource.entitlements.clone());
    state.audit = AuditState::from_audit(&resource.audit)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct CollectionResourceResource {
    client: Option<Arc<GovernanceClient>>,
}

impl CollectionResourceResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn add(&self, mut plan: CollectionResourceState) -> Result<CollectionResourceState, Error> {
        let body = build_collection_resource(&plan)?;
        let collection_id = required_str("collection_id", &plan.collection_id)?;
        let client = require_client(&self.client)?;
        debug!("adding {} to collection {collection_id}", body.resource_orn);
        let added = client
            .add_collection_resources(&collection_id, std::slice::from_ref(&body))
            .await?;
        let resource = match added.as_slice() {
            [resource] => resource,
            other => {
                return Err(Error::Translation(format!(
                    "expected one collection resource in response, got {}",
                    other.len()
                )))
            }
        };
        apply_collection_resource_to_state(&mut plan, resource)?;
        Ok(plan)
    }

    async fn read_resource(
        &self,
        mut prior: CollectionResourceState,
    ) -> Result<CollectionResourceState, Error> {
        let client = require_client(&self.client)?;
        let collection_id = required_str("collection_id", &prior.collection_id)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        debug!("reading resource {resource_id} of collection {collection_id}");
        let resource = client
            .get_collection_resource(&collection_id, &resource_id)
            .await?;
        apply_collection_resource_to_state(&mut prior, &resource)?;
        Ok(prior)
    }

    async fn replace(
        &self,
        prior: CollectionResourceState,
        mut plan: CollectionResourceState,
    ) -> Result<CollectionResourceState, Error> {
        let patch = build_collection_resource_patch(&plan)?;
        let collection_id = required_str("collection_id", &prior.collection_id)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        let client = require_client(&self.client)?;
        debug!("replacing entitlements of resource {resource_id} in collection {collection_id}");
        let resource = client
            .replace_collection_resource(&collection_id, &resource_id, &patch)
            .await?;
        plan.collection_id = Value::Known(collection_id);
        apply_collection_resource_to_state(&mut plan, &resource)?;
        Ok(plan)
    }

    async fn remove(&self, prior: &CollectionResourceState) -> Result<(), Error> {
        let client = require_client(&self.client)?;
        let collection_id = required_str("collection_id", &prior.collection_id)?;
        let resource_id = required_str("resource_id", &prior.resource_id)?;
        debug!("removing resource {resource_id} from collection {collection_id}");
        client
            .remove_collection_resource(&collection_id, &resource_id)
            .await
    }
}

#[async_trait]
impl Resource for CollectionResourceResource {
    type State = CollectionResourceState;

    fn type_name_suffix(&self) -> &'static str {
        "collection_resource"
    }

    fn schema(&self) -> Schema {
        collection_resource_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: CollectionResourceState) -> Response<CollectionResourceState> {
        Response::from_result(Verb::Creating, ENTITY, self.add(plan).await)
    }

    async fn read(&self, prior: CollectionResourceState) -> Response<CollectionResourceState> {
        let id = prior.resource_id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_resource(prior).await)
    }

    async fn update(
        &self,
        prior: CollectionResourceState,
        plan: CollectionResourceState,
    ) -> Response<CollectionResourceState> {
        Response::from_result(Verb::Updating, ENTITY, self.replace(prior, plan).await)
    }

    async fn delete(&self, prior: CollectionResourceState) -> Response<CollectionResourceState> {
        Response::from_delete(ENTITY, self.remove(&prior).await)
    }

    fn import_state(&self, id: &str) -> Response<CollectionResourceState> {
        match parse_import_id(id, &["collection_id", "resource_id"]) {
            Ok(parts) => Response::ok(CollectionResourceState {
                collection_id: Value::known(parts[0]),
                resource_id: Value::known(parts[1]),
                ..Default::default()
            }),
            Err(err) => Response::from_error(Verb::Importing, ENTITY, &err),
        }
    }
}
