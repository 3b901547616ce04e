use super::common::AuditFields;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Requested {
    pub entry_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestedFor {
    pub external_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Answer to one of the requester fields configured on a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequesterFieldValue {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub value: FieldValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldValue {
    Duration { value: String },
    IsoDate { value: String },
    Multiselect { values: Vec<String> },
    OktaUserId { value: String },
    Select { value: String },
    Text { value: String },
}

impl FieldValue {
    pub const TYPES: [&'static str; 6] = [
        "DURATION",
        "ISO_DATE",
        "MULTISELECT",
        "OKTA_USER_ID",
        "SELECT",
        "TEXT",
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Duration { .. } => "DURATION",
            FieldValue::IsoDate { .. } => "ISO_DATE",
            FieldValue::Multiselect { .. } => "MULTISELECT",
            FieldValue::OktaUserId { .. } => "OKTA_USER_ID",
            FieldValue::Select { .. } => "SELECT",
            FieldValue::Text { .. } => "TEXT",
        }
    }

    /// Builds the variant named by `kind`. Multi-valued variants take
    /// `values`, every other variant takes `value`.
    pub fn from_parts(kind: &str, value: Option<String>, values: Vec<String>) -> Option<Self> {
        let single = || value.clone();
        match kind {
            "MULTISELECT" => Some(FieldValue::Multiselect { values }),
            "DURATION" => single().map(|value| FieldValue::Duration { value }),
            "ISO_DATE" => single().map(|value| FieldValue::IsoDate { value }),
            "OKTA_USER_ID" => single().map(|value| FieldValue::OktaUserId { value }),
            "SELECT" => single().map(|value| FieldValue::Select { value }),
            "TEXT" => single().map(|value| FieldValue::Text { value }),
            _ => None,
        }
    }

    pub fn single_value(&self) -> Option<&str> {
        match self {
            FieldValue::Duration { value }
            | FieldValue::IsoDate { value }
            | FieldValue::OktaUserId { value }
            | FieldValue::Select { value }
            | FieldValue::Text { value } => Some(value),
            FieldValue::Multiselect { .. } => None,
        }
    }

    pub fn multi_values(&self) -> Option<&[String]> {
        match self {
            FieldValue::Multiselect { values } => Some(values),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestCreatable {
    pub requested: Requested,
    pub requested_for: RequestedFor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requester_field_values: Vec<RequesterFieldValue>,
}

/// Body of an end-user request against a catalog entry; the requester is
/// the calling user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MyRequestCreatable {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requester_field_values: Vec<RequesterFieldValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<Requested>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_for: Option<RequestedFor>,
    #[serde(default)]
    pub requester_field_values: Vec<RequesterFieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub granted: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_status: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub revocation_scheduled: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_status: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub revoked: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_duration: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn multiselect_field_serializes_values_only() {
        let field = RequesterFieldValue {
            id: "f1".to_string(),
            label: Some("Teams".to_string()),
            value: FieldValue::Multiselect {
                values: vec!["a".to_string(), "b".to_string()],
            },
        };
        assert_eq!(
            serde_json::to_value(&field).expect("serialize"),
            json!({"id":"f1","label":"Teams","type":"MULTISELECT","values":["a","b"]})
        );
    }

    #[test]
    fn from_parts_requires_single_value_for_scalar_types() {
        assert_eq!(FieldValue::from_parts("TEXT", None, Vec::new()), None);
        assert_eq!(
            FieldValue::from_parts("ISO_DATE", Some("2025-01-01".to_string()), Vec::new()),
            Some(FieldValue::IsoDate {
                value: "2025-01-01".to_string()
            })
        );
        assert_eq!(FieldValue::from_parts("COLOR", None, Vec::new()), None);
    }
}
