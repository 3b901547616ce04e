//! Separation-of-duties rules.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{
    AuditFields, ConflictCriteria, Criterion, CriterionEntitlement, CriterionValue, IdRef,
    RiskRule, RiskRuleResource as ResourceRef,
};
use crate::provider::contract::{require_client, Resource, Response, Verb};
use crate::provider::convert::{
    id_blocks, id_refs, optional_string, required_str, with_audit_attributes, AuditState,
    GrantBlock,
};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Risk Rule";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskRuleState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub notes: Value<String>,
    pub kind: Value<String>,
    pub resources: Vec<RuleResourceBlock>,
    pub conflict_criteria: Option<ConflictCriteriaBlock>,
    pub audit: AuditState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleResourceBlock {
    pub resource_orn: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConflictCriteriaBlock {
    pub and: Vec<CriterionBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CriterionBlock {
    pub name: Value<String>,
    pub attribute: Value<String>,
    pub operation: Value<String>,
    pub value: Option<CriterionValueBlock>,
}

/// `{ type, value[] { id, values[] { id } } }`. Bundle criteria leave
/// `values` empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CriterionValueBlock {
    pub kind: Value<String>,
    pub value: Vec<GrantBlock>,
}

pub fn risk_rule_schema() -> Schema {
    let schema = Schema::new("Manages a separation-of-duties risk rule.")
        .attribute(Attribute::id())
        .attribute(Attribute::required("name", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(Attribute::optional("description", AttributeKind::String))
        .attribute(Attribute::optional("notes", AttributeKind::String))
        .attribute(Attribute::required("type", AttributeKind::String).with_validator(Validator::NonEmpty))
        .block(
            Block::list("resources")
                .with_validator(Validator::SizeAtLeast(1))
                .attribute(
                    Attribute::required("resource_orn", AttributeKind::String)
                        .with_validator(Validator::Orn),
                ),
        )
        .block(
            Block::single("conflict_criteria").with_validator(Validator::SizeAtLeast(1)).block(
                Block::list("and")
                    .with_validator(Validator::SizeAtLeast(1))
                    .attribute(Attribute::required("name", AttributeKind::String))
                    .attribute(Attribute::required("attribute", AttributeKind::String))
                    .attribute(Attribute::required("operation", AttributeKind::String))
                    .block(
                        Block::single("value")
                            .attribute(Attribute::required("type", AttributeKind::String).with_validator(
                                Validator::OneOf(&["ENTITLEMENTS", "ENTITLEMENT_BUNDLES"]),
                            ))
                            .block(
                                Block::list("value")
                                    .attribute(Attribute::required("id", AttributeKind::String))
                                    .block(Block::id_list("values")),
                            ),
                    ),
            ),
        );
    with_audit_attributes(schema)
}

fn build_criterion_value(
    schema: &Schema,
    path: &str,
    block: &CriterionValueBlock,
) -> Result<CriterionValue, Error> {
    let kind = required_str(&format!("{path}.type"), &block.kind)?;
    schema.check_str(&format!("{path}.type"), &kind)?;
    match kind.as_str() {
        "ENTITLEMENTS" => {
            let mut entitlements = Vec::with_capacity(block.value.len());
            for (i, grant) in block.value.iter().enumerate() {
                let grant_path = format!("{path}.value[{i}]");
                let id = required_str(&format!("{grant_path}.id"), &grant.id)?;
                let values = id_refs(&format!("{grant_path}.values"), &grant.values)?;
                entitlements.push(CriterionEntitlement { id, values });
            }
            Ok(CriterionValue::Entitlements { value: entitlements })
        }
        "ENTITLEMENT_BUNDLES" => {
            let mut bundles = Vec::with_capacity(block.value.len());
            for (i, grant) in block.value.iter().enumerate() {
                let grant_path = format!("{path}.value[{i}]");
                if !grant.values.is_empty() {
                    return Err(Error::validation(
                        format!("{grant_path}.values"),
                        "must not be set when type is ENTITLEMENT_BUNDLES",
                    ));
                }
                bundles.push(IdRef::new(required_str(&format!("{grant_path}.id"), &grant.id)?));
            }
            Ok(CriterionValue::EntitlementBundles { value: bundles })
        }
        other => Err(Error::validation(format!("{path}.type"), format!("unsupported type {other:?}"))),
    }
}

fn build_criterion(schema: &Schema, path: &str, block: &CriterionBlock) -> Result<Criterion, Error> {
    let value = block
        .value
        .as_ref()
        .ok_or_else(|| Error::validation(format!("{path}.value"), "block is required"))?;
    Ok(Criterion {
        name: required_str(&format!("{path}.name"), &block.name)?,
        attribute: required_str(&format!("{path}.attribute"), &block.attribute)?,
        operation: required_str(&format!("{path}.operation"), &block.operation)?,
        value: build_criterion_value(schema, &format!("{path}.value"), value)?,
    })
}

pub fn build_risk_rule(state: &RiskRuleState) -> Result<RiskRule, Error> {
    let schema = risk_rule_schema();
    schema.check_len("resources", state.resources.len())?;
    let resources = state
        .resources
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let path = format!("resources[{i}].resource_orn");
            let resource_orn = required_str(&path, &block.resource_orn)?;
            schema.check_str(&path, &resource_orn)?;
            Ok(ResourceRef { resource_orn })
        })
        .collect::<Result<Vec<_>, Error>>()?;
    let criteria = state
        .conflict_criteria
        .as_ref()
        .ok_or_else(|| Error::validation("conflict_criteria", "block is required"))?;
    schema.check_len("conflict_criteria.and", criteria.and.len())?;
    let and = criteria
        .and
        .iter()
        .enumerate()
        .map(|(i, criterion)| build_criterion(&schema, &format!("conflict_criteria.and[{i}]"), criterion))
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(RiskRule {
        id: state.id.non_empty_owned(),
        name: required_str("name", &state.name)?,
        description: state.description.non_empty_owned(),
        notes: state.notes.non_empty_owned(),
        kind: required_str("type", &state.kind)?,
        resources,
        conflict_criteria: Some(ConflictCriteria { and }),
        audit: AuditFields::default(),
    })
}

/// Shared by Read, Create and Update.
pub fn apply_risk_rule_to_state(state: &mut RiskRuleState, rule: &RiskRule) -> Result<(), Error> {
    state.id = optional_string(rule.id.clone());
    state.name = Value::Known(rule.name.clone());
    state.description = optional_string(rule.description.clone());
    state.notes = optional_string(rule.notes.clone());
    state.kind = Value::Known(rule.kind.clone());
    state.resources = rule
        .resources
        .iter()
        .map(|r| RuleResourceBlock {
            resource_orn: Value::Known(r.resource_orn.clone()),
        })
        .collect();
    state.conflict_criteria = rule.conflict_criteria.as_ref().map(|criteria| ConflictCriteriaBlock {
        and: criteria
            .and
            .iter()
            .map(|criterion| CriterionBlock {
                name: Value::Known(criterion.name.clone()),
                attribute: Value::Known(criterion.attribute.clone()),
                operation: Value::Known(criterion.operation.clone()),
                value: Some(criterion_value_to_state(&criterion.value)),
            })
            .collect(),
    });
    state.audit = AuditState::from_audit(&rule.audit)?;
    Ok(())
}

fn criterion_value_to_state(value: &CriterionValue) -> CriterionValueBlock {
    let grants = match value {
        CriterionValue::Entitlements { value } => value
            .iter()
            .map(|e| GrantBlock {
                id: Value::Known(e.id.clone()),
                values: id_blocks(&e.values),
            })
            .collect(),
        CriterionValue::EntitlementBundles { value } => value
            .iter()
            .map(|bundle| GrantBlock {
                id: Value::Known(bundle.id.clone()),
                values: Vec::new(),
            })
            .collect(),
    };
    CriterionValueBlock {
        kind: Value::known(value.type_name()),
        value: grants,
    }
}

#[derive(Debug, Default)]
pub struct RiskRuleResource {
    client: Option<Arc<GovernanceClient>>,
}

impl RiskRuleResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn create_rule(&self, mut plan: RiskRuleState) -> Result<RiskRuleState, Error> {
        let body = build_risk_rule(&plan)?;
        let client = require_client(&self.client)?;
        debug!("creating risk rule {}", body.name);
        let rule = client.create_risk_rule(&body).await?;
        apply_risk_rule_to_state(&mut plan, &rule)?;
        Ok(plan)
    }

    async fn read_rule(&self, mut prior: RiskRuleState) -> Result<RiskRuleState, Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading risk rule {id}");
        let rule = client.get_risk_rule(&id).await?;
        apply_risk_rule_to_state(&mut prior, &rule)?;
        Ok(prior)
    }

    async fn update_rule(&self, prior: RiskRuleState, mut plan: RiskRuleState) -> Result<RiskRuleState, Error> {
        let id = required_str("id", &prior.id)?;
        plan.id = Value::Known(id.clone());
        let body = build_risk_rule(&plan)?;
        let client = require_client(&self.client)?;
        debug!("replacing risk rule {id}");
        let rule = client.replace_risk_rule(&id, &body).await?;
        apply_risk_rule_to_state(&mut plan, &rule)?;
        Ok(plan)
    }

    async fn delete_rule(&self, prior: &RiskRuleState) -> Result<(), Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("deleting risk rule {id}");
        client.delete_risk_rule(&id).await
    }
}

#[async_trait]
impl Resource for RiskRuleResource {
    type State = RiskRuleState;

    fn type_name_suffix(&self) -> &'static str {
        "risk_rule"
    }

    fn schema(&self) -> Schema {
        risk_rule_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: RiskRuleState) -> Response<RiskRuleState> {
        Response::from_result(Verb::Creating, ENTITY, self.create_rule(plan).await)
    }

    async fn read(&self, prior: RiskRuleState) -> Response<RiskRuleState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_rule(prior).await)
    }

    async fn update(&self, prior: RiskRuleState, plan: RiskRuleState) -> Response<RiskRuleState> {
        Response::from_result(Verb::Updating, ENTITY, self.update_rule(prior, plan).await)
    }

    async fn delete(&self, prior: RiskRuleState) -> Response<RiskRuleState> {
        Response::from_delete(ENTITY, self.delete_rule(&prior).await)
    }

    fn import_state(&self, id: &str) -> Response<RiskRuleState> {
        Response::ok(RiskRuleState {
            id: Value::known(id),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::convert::IdBlock;
    use serde_json::json;

    const ORN: &str = "orn:okta:idp:00o1:apps:salesforce:0oa1";

    fn plan() -> RiskRuleState {
        RiskRuleState {
            id: Value::Unknown,
            name: Value::from("No approve and pay"),
            kind: Value::from("SEPARATION_OF_DUTIES"),
            resources: vec![RuleResourceBlock {
                resource_orn: Value::from(ORN),
            }],
            conflict_criteria: Some(ConflictCriteriaBlock {
                and: vec![
                    CriterionBlock {
                        name: Value::from("approver"),
                        attribute: Value::from("principal.effective_grants"),
                        operation: Value::from("CONTAINS_ONE"),
                        value: Some(CriterionValueBlock {
                            kind: Value::from("ENTITLEMENTS"),
                            value: vec![GrantBlock {
                                id: Value::from("ent1"),
                                values: vec![IdBlock::new("v1")],
                            }],
                        }),
                    },
                    CriterionBlock {
                        name: Value::from("payer"),
                        attribute: Value::from("principal.effective_grants"),
                        operation: Value::from("CONTAINS_ALL"),
                        value: Some(CriterionValueBlock {
                            kind: Value::from("ENTITLEMENT_BUNDLES"),
                            value: vec![GrantBlock {
                                id: Value::from("enb1"),
                                values: vec![],
                            }],
                        }),
                    },
                ],
            }),
            audit: AuditState::unknown(),
            ..Default::default()
        }
    }

    #[test]
    fn build_emits_one_value_variant_per_criterion() {
        let body = build_risk_rule(&plan()).expect("build");
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            value["conflictCriteria"],
            json!({"and": [
                {
                    "name": "approver",
                    "attribute": "principal.effective_grants",
                    "operation": "CONTAINS_ONE",
                    "value": {"type": "ENTITLEMENTS", "value": [{"id": "ent1", "values": [{"id": "v1"}]}]}
                },
                {
                    "name": "payer",
                    "attribute": "principal.effective_grants",
                    "operation": "CONTAINS_ALL",
                    "value": {"type": "ENTITLEMENT_BUNDLES", "value": [{"id": "enb1"}]}
                }
            ]})
        );
        assert!(value.get("id").is_none());
    }

    #[test]
    fn apply_then_build_is_stable() {
        let mut server = build_risk_rule(&plan()).expect("build");
        server.id = Some("rr1".into());
        let mut state = plan();
        apply_risk_rule_to_state(&mut state, &server).expect("apply");
        assert_eq!(state.id, Value::from("rr1"));
        assert_eq!(build_risk_rule(&state).expect("rebuild"), server);
    }

    fn validation_path(state: &RiskRuleState) -> String {
        match build_risk_rule(state) {
            Err(Error::Validation { path, .. }) => path,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn bundle_criteria_reject_nested_values() {
        let mut state = plan();
        if let Some(value) = state
            .conflict_criteria
            .as_mut()
            .and_then(|criteria| criteria.and[1].value.as_mut())
        {
            value.value[0].values.push(IdBlock::new("v9"));
        }
        assert_eq!(
            validation_path(&state),
            "conflict_criteria.and[1].value.value[0].values"
        );
    }

    #[test]
    fn conflict_criteria_are_required() {
        let mut state = plan();
        state.conflict_criteria = None;
        assert_eq!(validation_path(&state), "conflict_criteria");

        state.conflict_criteria = Some(ConflictCriteriaBlock { and: vec![] });
        assert_eq!(validation_path(&state), "conflict_criteria.and");
    }

    #[test]
    fn short_orn_is_rejected_with_index() {
        let mut state = plan();
        state.resources.push(RuleResourceBlock {
            resource_orn: Value::from("orn:okta:idp:x"),
        });
        assert!(matches!(
            build_risk_rule(&state),
            Err(Error::Validation { ref path, .. }) if path == "resources[1].resource_orn"
        ));
    }
}
