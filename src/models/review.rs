use super::common::AuditFields;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReassignment {
    pub review_ids: Vec<String>,
    pub reviewer_id: String,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub campaign_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_reviewer_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_profile: Option<ReviewerProfile>,
    #[serde(flatten)]
    pub audit: AuditFields,
}
