use super::common::{AuditFields, EntitlementGrant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResourceCreatable {
    pub resource_orn: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entitlements: Vec<EntitlementGrant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResourcePatchable {
    pub entitlements: Vec<EntitlementGrant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResource {
    pub resource_id: String,
    pub resource_orn: String,
    #[serde(default)]
    pub entitlements: Vec<EntitlementGrant>,
    #[serde(flatten)]
    pub audit: AuditFields,
}
