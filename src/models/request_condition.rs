use super::common::{AuditFields, IdRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AccessScopeSettings {
    ResourceDefault,
    Groups { groups: Vec<IdRef> },
    EntitlementBundles { entitlement_bundles: Vec<IdRef> },
}

impl AccessScopeSettings {
    pub fn type_name(&self) -> &'static str {
        match self {
            AccessScopeSettings::ResourceDefault => "RESOURCE_DEFAULT",
            AccessScopeSettings::Groups { .. } => "GROUPS",
            AccessScopeSettings::EntitlementBundles { .. } => "ENTITLEMENT_BUNDLES",
        }
    }

    pub fn ids(&self) -> &[IdRef] {
        match self {
            AccessScopeSettings::ResourceDefault => &[],
            AccessScopeSettings::Groups { groups } => groups,
            AccessScopeSettings::EntitlementBundles {
                entitlement_bundles,
            } => entitlement_bundles,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum RequesterSettings {
    Everyone,
    Groups { groups: Vec<IdRef> },
}

impl RequesterSettings {
    pub fn type_name(&self) -> &'static str {
        match self {
            RequesterSettings::Everyone => "EVERYONE",
            RequesterSettings::Groups { .. } => "GROUPS",
        }
    }

    pub fn ids(&self) -> &[IdRef] {
        match self {
            RequesterSettings::Everyone => &[],
            RequesterSettings::Groups { groups } => groups,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AccessDurationSettings {
    AdminFixedDuration { duration: String },
    RequesterSpecifiedDuration { maximum_duration: String },
}

impl AccessDurationSettings {
    pub fn type_name(&self) -> &'static str {
        match self {
            AccessDurationSettings::AdminFixedDuration { .. } => "ADMIN_FIXED_DURATION",
            AccessDurationSettings::RequesterSpecifiedDuration { .. } => {
                "REQUESTER_SPECIFIED_DURATION"
            }
        }
    }

    pub fn duration(&self) -> &str {
        match self {
            AccessDurationSettings::AdminFixedDuration { duration } => duration,
            AccessDurationSettings::RequesterSpecifiedDuration { maximum_duration } => {
                maximum_duration
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestConditionStatus {
    Active,
    Inactive,
    Deleted,
    Invalid,
}

impl RequestConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestConditionStatus::Active => "ACTIVE",
            RequestConditionStatus::Inactive => "INACTIVE",
            RequestConditionStatus::Deleted => "DELETED",
            RequestConditionStatus::Invalid => "INVALID",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestCondition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub approval_sequence_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub status: RequestConditionStatus,
    pub access_scope_settings: AccessScopeSettings,
    pub requester_settings: RequesterSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_duration_settings: Option<AccessDurationSettings>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

/// Create body. Conditions are always created `INACTIVE`; status is driven
/// through the activate/deactivate endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestConditionCreatable {
    pub approval_sequence_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub access_scope_settings: AccessScopeSettings,
    pub requester_settings: RequesterSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_duration_settings: Option<AccessDurationSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestConditionPatchable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_sequence_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_scope_settings: Option<AccessScopeSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_settings: Option<RequesterSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_duration_settings: Option<AccessDurationSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_scope_variants_carry_only_their_ids() {
        let groups = AccessScopeSettings::Groups {
            groups: vec![IdRef::new("g1")],
        };
        assert_eq!(
            serde_json::to_value(&groups).expect("serialize"),
            json!({"type":"GROUPS","groups":[{"id":"g1"}]})
        );
        assert_eq!(
            serde_json::to_value(AccessScopeSettings::ResourceDefault).expect("serialize"),
            json!({"type":"RESOURCE_DEFAULT"})
        );
    }

    #[test]
    fn requester_specified_duration_uses_maximum_duration() {
        let duration = AccessDurationSettings::RequesterSpecifiedDuration {
            maximum_duration: "P7D".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&duration).expect("serialize"),
            json!({"type":"REQUESTER_SPECIFIED_DURATION","maximumDuration":"P7D"})
        );
        assert_eq!(duration.duration(), "P7D");
    }
}
