//! Translation helpers shared by every entity.

use crate::error::Error;
use crate::models::{AuditFields, EntitlementGrant, ExternalRef, IdRef};
use crate::provider::schema::{Attribute, AttributeKind, Schema};
use crate::provider::value::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub fn format_timestamp(value: Option<OffsetDateTime>) -> Result<Value<String>, Error> {
    match value {
        Some(ts) => ts
            .format(&Rfc3339)
            .map(Value::Known)
            .map_err(|e| Error::Timestamp(e.to_string())),
        None => Ok(Value::Null),
    }
}

/// Parses a configured RFC-3339 timestamp. Unknown and null yield `None`.
pub fn parse_timestamp(path: &str, value: &Value<String>) -> Result<Option<OffsetDateTime>, Error> {
    match value.non_empty() {
        Some(raw) => OffsetDateTime::parse(raw, &Rfc3339)
            .map(Some)
            .map_err(|e| Error::validation(path, format!("invalid RFC 3339 timestamp {raw:?}: {e}"))),
        None => Ok(None),
    }
}

/// Known, non-empty string or a validation error at `path`.
pub fn required_str(path: &str, value: &Value<String>) -> Result<String, Error> {
    value
        .non_empty_owned()
        .ok_or_else(|| Error::validation(path, "value is required"))
}

/// Empty server strings read back as null so optional attributes do not diff.
pub fn optional_string(value: Option<String>) -> Value<String> {
    Value::from_option(value.filter(|s| !s.is_empty()))
}

/// Server-computed audit attributes, mirrored on every entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditState {
    pub created: Value<String>,
    pub created_by: Value<String>,
    pub last_updated: Value<String>,
    pub last_updated_by: Value<String>,
}

impl AuditState {
    /// Plan-time value: nothing is known until the server answers.
    pub fn unknown() -> Self {
        Self {
            created: Value::Unknown,
            created_by: Value::Unknown,
            last_updated: Value::Unknown,
            last_updated_by: Value::Unknown,
        }
    }

    pub fn from_audit(audit: &AuditFields) -> Result<Self, Error> {
        Ok(Self {
            created: format_timestamp(audit.created)?,
            created_by: optional_string(audit.created_by.clone()),
            last_updated: format_timestamp(audit.last_updated)?,
            last_updated_by: optional_string(audit.last_updated_by.clone()),
        })
    }
}

/// Appends the four audit attributes to a schema.
pub fn with_audit_attributes(schema: Schema) -> Schema {
    schema
        .attribute(Attribute::computed("created", AttributeKind::String))
        .attribute(Attribute::computed("created_by", AttributeKind::String))
        .attribute(Attribute::computed("last_updated", AttributeKind::String))
        .attribute(Attribute::computed("last_updated_by", AttributeKind::String))
}

/// `{ external_id, type }` reference to an app or other external resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExternalRefBlock {
    pub external_id: Value<String>,
    pub kind: Value<String>,
}

impl ExternalRefBlock {
    pub fn to_wire(&self, path: &str) -> Result<ExternalRef, Error> {
        Ok(ExternalRef {
            external_id: required_str(&format!("{path}.external_id"), &self.external_id)?,
            kind: required_str(&format!("{path}.type"), &self.kind)?,
        })
    }

    pub fn from_wire(reference: &ExternalRef) -> Self {
        Self {
            external_id: Value::Known(reference.external_id.clone()),
            kind: Value::Known(reference.kind.clone()),
        }
    }
}

/// `{ id }` nested block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdBlock {
    pub id: Value<String>,
}

impl IdBlock {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Value::Known(id.into()),
        }
    }
}

pub fn id_refs(path: &str, blocks: &[IdBlock]) -> Result<Vec<IdRef>, Error> {
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            block
                .id
                .non_empty()
                .map(IdRef::new)
                .ok_or_else(|| Error::validation(format!("{path}[{i}].id"), "id must not be empty"))
        })
        .collect()
}

pub fn id_blocks(refs: &[IdRef]) -> Vec<IdBlock> {
    refs.iter().map(|r| IdBlock::new(r.id.clone())).collect()
}

/// `{ id, values[] { id } }` nested block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrantBlock {
    pub id: Value<String>,
    pub values: Vec<IdBlock>,
}

/// Builds grants in canonical order: by id, each value set by id.
pub fn grants_from_blocks(path: &str, blocks: &[GrantBlock]) -> Result<Vec<EntitlementGrant>, Error> {
    let grants = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let id = block
                .id
                .non_empty_owned()
                .ok_or_else(|| Error::validation(format!("{path}[{i}].id"), "id must not be empty"))?;
            let values = id_refs(&format!("{path}[{i}].values"), &block.values)?;
            Ok(EntitlementGrant { id, values })
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(sort_grants(grants))
}

pub fn grant_blocks(grants: Vec<EntitlementGrant>) -> Vec<GrantBlock> {
    sort_grants(grants)
        .into_iter()
        .map(|grant| GrantBlock {
            id: Value::Known(grant.id),
            values: id_blocks(&grant.values),
        })
        .collect()
}

pub fn sort_grants(mut grants: Vec<EntitlementGrant>) -> Vec<EntitlementGrant> {
    for grant in &mut grants {
        grant.values.sort();
    }
    grants.sort_by(|a, b| a.id.cmp(&b.id));
    grants
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn timestamps_survive_format_then_parse() {
        let ts = datetime!(2024-03-01 12:30:45.5 UTC);
        let formatted = format_timestamp(Some(ts)).expect("format");
        assert_eq!(formatted.as_str(), Some("2024-03-01T12:30:45.5Z"));
        assert_eq!(parse_timestamp("start_date", &formatted).expect("parse"), Some(ts));
    }

    #[test]
    fn bad_timestamp_is_a_validation_error_not_zero_time() {
        let err = parse_timestamp("schedule_settings.start_date", &Value::from("yesterday"))
            .expect_err("invalid");
        assert!(matches!(err, Error::Validation { ref path, .. } if path == "schedule_settings.start_date"));
        assert_eq!(parse_timestamp("x", &Value::Unknown).expect("unknown"), None);
    }

    #[test]
    fn grants_are_sorted_by_id_at_both_levels() {
        let blocks = vec![
            GrantBlock {
                id: Value::from("B"),
                values: vec![IdBlock::new("2"), IdBlock::new("1")],
            },
            GrantBlock {
                id: Value::from("A"),
                values: vec![IdBlock::new("2"), IdBlock::new("1")],
            },
        ];
        let grants = grants_from_blocks("entitlements", &blocks).expect("grants");
        let ids: Vec<_> = grants.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(grants[0].values, vec![IdRef::new("1"), IdRef::new("2")]);

        let back = grant_blocks(grants.clone());
        assert_eq!(grants_from_blocks("entitlements", &back).expect("again"), grants);
    }

    #[test]
    fn empty_ids_are_rejected_with_index() {
        let err = id_refs("groups", &[IdBlock::new("g1"), IdBlock::default()]).expect_err("empty");
        assert!(matches!(err, Error::Validation { ref path, .. } if path == "groups[1].id"));
    }

    #[test]
    fn empty_server_strings_read_as_null() {
        assert!(optional_string(Some(String::new())).is_null());
        assert_eq!(optional_string(Some("x".into())), Value::from("x"));
    }
}
