use super::request_condition::AccessDurationSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestOnBehalfOfSettings {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub only_for: Vec<TypeRef>,
}

/// Request settings of a resource as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestSettings {
    #[serde(default)]
    pub valid_access_scope_settings: Vec<TypeRef>,
    #[serde(default)]
    pub valid_requester_settings: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_on_behalf_of_settings: Option<RequestOnBehalfOfSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_settings: Option<RiskSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskSettings {
    pub default_setting: RiskDefaultSetting,
}

/// Outcome applied to requests that carry a separation-of-duties risk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "requestSubmissionType",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum RiskDefaultSetting {
    Restricted {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        error: Vec<String>,
    },
    AllowedWithOverrides {
        approval_sequence_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        access_duration_settings: Option<AccessDurationSettings>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        error: Vec<String>,
    },
    AllowedWithNoOverrides {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        error: Vec<String>,
    },
}

impl RiskDefaultSetting {
    pub fn submission_type(&self) -> &'static str {
        match self {
            RiskDefaultSetting::Restricted { .. } => "RESTRICTED",
            RiskDefaultSetting::AllowedWithOverrides { .. } => "ALLOWED_WITH_OVERRIDES",
            RiskDefaultSetting::AllowedWithNoOverrides { .. } => "ALLOWED_WITH_NO_OVERRIDES",
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            RiskDefaultSetting::Restricted { error }
            | RiskDefaultSetting::AllowedWithOverrides { error, .. }
            | RiskDefaultSetting::AllowedWithNoOverrides { error } => error,
        }
    }
}

/// PATCH body. `request_on_behalf_of_settings` is always serialized so that
/// `None` clears the setting on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestSettingsPatchable {
    pub request_on_behalf_of_settings: Option<RequestOnBehalfOfSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_settings: Option<RiskSettingsPatchable>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskSettingsPatchable {
    pub default_setting: RiskDefaultSettingPatchable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "requestSubmissionType",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum RiskDefaultSettingPatchable {
    Restricted,
    AllowedWithOverrides {
        approval_sequence_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        access_duration_settings: Option<AccessDurationSettings>,
    },
    AllowedWithNoOverrides,
}
