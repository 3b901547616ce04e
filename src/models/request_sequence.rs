use super::common::AuditFields;
use serde::{Deserialize, Serialize};

/// An approval sequence attached to a resource. Managed in the Okta admin
/// console; the API only reads and deletes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestSequence {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub compatible_resource_types: Vec<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}
