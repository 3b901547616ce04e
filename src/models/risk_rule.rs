use super::common::{AuditFields, IdRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskRuleResource {
    pub resource_orn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CriterionEntitlement {
    pub id: String,
    #[serde(default)]
    pub values: Vec<IdRef>,
}

/// The grants a criterion matches against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionValue {
    Entitlements { value: Vec<CriterionEntitlement> },
    EntitlementBundles { value: Vec<IdRef> },
}

impl CriterionValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            CriterionValue::Entitlements { .. } => "ENTITLEMENTS",
            CriterionValue::EntitlementBundles { .. } => "ENTITLEMENT_BUNDLES",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub name: String,
    pub attribute: String,
    pub operation: String,
    pub value: CriterionValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCriteria {
    #[serde(default)]
    pub and: Vec<Criterion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub resources: Vec<RiskRuleResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_criteria: Option<ConflictCriteria>,
    #[serde(flatten)]
    pub audit: AuditFields,
}
