//! Per-resource request settings. The remote object always exists, so the
//! resource is import-only: Create and Delete only warn.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{
    RequestOnBehalfOfSettings, RequestSettings, RequestSettingsPatchable, RiskDefaultSetting,
    RiskDefaultSettingPatchable, RiskSettingsPatchable, TypeRef,
};
use crate::provider::contract::{require_client, unsupported, Resource, Response, Verb};
use crate::provider::convert::required_str;
use crate::provider::resources::request_condition::{
    access_duration_block, access_duration_to_state, build_access_duration, AccessDurationBlock,
};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Request Settings";

pub const SUBMISSION_TYPES: &[&str] = &[
    "RESTRICTED",
    "ALLOWED_WITH_OVERRIDES",
    "ALLOWED_WITH_NO_OVERRIDES",
];

/// `id` is the id of the resource (app) the settings belong to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestSettingState {
    pub id: Value<String>,
    pub valid_access_scope_settings: Value<Vec<String>>,
    pub valid_requester_settings: Value<Vec<String>>,
    pub request_on_behalf_of_settings: Option<OnBehalfOfBlock>,
    pub risk_settings: Option<RiskSettingsBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnBehalfOfBlock {
    pub allowed: Value<bool>,
    pub only_for: Vec<TypeBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeBlock {
    pub kind: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RiskSettingsBlock {
    pub default_setting: Option<DefaultSettingBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefaultSettingBlock {
    pub request_submission_type: Value<String>,
    pub approval_sequence_id: Value<String>,
    pub access_duration_settings: Option<AccessDurationBlock>,
    pub error: Value<Vec<String>>,
}

pub fn request_setting_schema() -> Schema {
    Schema::new("Request policy of a resource. Import-only; the settings cannot be created or deleted.")
        .attribute(
            Attribute::required("id", AttributeKind::String)
                .with_description("Id of the resource the settings belong to.")
                .with_validator(Validator::NonEmpty),
        )
        .attribute(Attribute::computed(
            "valid_access_scope_settings",
            AttributeKind::list_of(AttributeKind::String),
        ))
        .attribute(Attribute::computed(
            "valid_requester_settings",
            AttributeKind::list_of(AttributeKind::String),
        ))
        .block(
            Block::single("request_on_behalf_of_settings")
                .attribute(Attribute::required("allowed", AttributeKind::Bool))
                .block(Block::list("only_for").attribute(Attribute::required("type", AttributeKind::String))),
        )
        .block(
            Block::single("risk_settings").block(
                Block::single("default_setting")
                    .attribute(
                        Attribute::required("request_submission_type", AttributeKind::String)
                            .with_validator(Validator::OneOf(SUBMISSION_TYPES)),
                    )
                    .attribute(Attribute::optional("approval_sequence_id", AttributeKind::String))
                    .attribute(Attribute::computed(
                        "error",
                        AttributeKind::list_of(AttributeKind::String),
                    ))
                    .block(access_duration_block()),
            ),
        )
}

fn build_default_setting(
    schema: &Schema,
    block: &DefaultSettingBlock,
) -> Result<RiskDefaultSettingPatchable, Error> {
    const PATH: &str = "risk_settings.default_setting";
    let type_path = format!("{PATH}.request_submission_type");
    let kind = required_str(&type_path, &block.request_submission_type)?;
    schema.check_str(&type_path, &kind)?;
    let reject_overrides = || {
        if block.approval_sequence_id.non_empty().is_some() {
            return Err(Error::validation(
                format!("{PATH}.approval_sequence_id"),
                format!("must not be set when request_submission_type is {kind}"),
            ));
        }
        if block.access_duration_settings.is_some() {
            return Err(Error::validation(
                format!("{PATH}.access_duration_settings"),
                format!("must not be set when request_submission_type is {kind}"),
            ));
        }
        Ok(())
    };
    match kind.as_str() {
        "ALLOWED_WITH_OVERRIDES" => Ok(RiskDefaultSettingPatchable::AllowedWithOverrides {
            approval_sequence_id: required_str(&format!("{PATH}.approval_sequence_id"), &block.approval_sequence_id)?,
            access_duration_settings: block
                .access_duration_settings
                .as_ref()
                .map(|duration| build_access_duration(schema, duration))
                .transpose()?,
        }),
        "ALLOWED_WITH_NO_OVERRIDES" => {
            reject_overrides()?;
            Ok(RiskDefaultSettingPatchable::AllowedWithNoOverrides)
        }
        "RESTRICTED" => {
            reject_overrides()?;
            Ok(RiskDefaultSettingPatchable::Restricted)
        }
        other => Err(Error::validation(type_path, format!("unsupported type {other:?}"))),
    }
}

/// On-behalf-of settings are only sent when requesting for others is
/// allowed; otherwise the field is nulled.
pub fn build_request_settings_patch(state: &RequestSettingState) -> Result<RequestSettingsPatchable, Error> {
    let schema = request_setting_schema();
    let request_on_behalf_of_settings = state
        .request_on_behalf_of_settings
        .as_ref()
        .filter(|block| block.allowed.get() == Some(true))
        .map(|block| {
            block
                .only_for
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    required_str(
                        &format!("request_on_behalf_of_settings.only_for[{i}].type"),
                        &entry.kind,
                    )
                    .map(|kind| TypeRef { kind })
                })
                .collect::<Result<Vec<_>, Error>>()
                .map(|only_for| RequestOnBehalfOfSettings {
                    allowed: true,
                    only_for,
                })
        })
        .transpose()?;
    let risk_settings = state
        .risk_settings
        .as_ref()
        .and_then(|risk| risk.default_setting.as_ref())
        .map(|block| build_default_setting(&schema, block))
        .transpose()?
        .map(|default_setting| RiskSettingsPatchable { default_setting });
    Ok(RequestSettingsPatchable {
        request_on_behalf_of_settings,
        risk_settings,
    })
}

pub fn apply_request_settings_to_state(state: &mut RequestSettingState, settings: &RequestSettings) {
    let kinds = |refs: &[TypeRef]| refs.iter().map(|r| r.kind.clone()).collect::<Vec<_>>();
    state.valid_access_scope_settings = Value::Known(kinds(&settings.valid_access_scope_settings));
    state.valid_requester_settings = Value::Known(kinds(&settings.valid_requester_settings));
    state.request_on_behalf_of_settings =
        settings
            .request_on_behalf_of_settings
            .as_ref()
            .map(|on_behalf| OnBehalfOfBlock {
                allowed: Value::Known(on_behalf.allowed),
                only_for: on_behalf
                    .only_for
                    .iter()
                    .map(|r| TypeBlock {
                        kind: Value::Known(r.kind.clone()),
                    })
                    .collect(),
            });
    state.risk_settings = settings.risk_settings.as_ref().map(|risk| {
        let setting = &risk.default_setting;
        let (approval_sequence_id, access_duration_settings) = match setting {
            RiskDefaultSetting::AllowedWithOverrides {
                approval_sequence_id,
                access_duration_settings,
                ..
            } => (
                Value::Known(approval_sequence_id.clone()),
                access_duration_settings.as_ref().map(access_duration_to_state),
            ),
            _ => (Value::Null, None),
        };
        RiskSettingsBlock {
            default_setting: Some(DefaultSettingBlock {
                request_submission_type: Value::known(setting.submission_type()),
                approval_sequence_id,
                access_duration_settings,
                error: Value::Known(setting.errors().to_vec()),
            }),
        }
    });
}

#[derive(Debug, Default)]
pub struct RequestSettingResource {
    client: Option<Arc<GovernanceClient>>,
}

impl RequestSettingResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn read_settings(&self, mut prior: RequestSettingState) -> Result<RequestSettingState, Error> {
        let client = require_client(&self.client)?;
        let resource_id = required_str("id", &prior.id)?;
        debug!("reading request settings of {resource_id}");
        let settings = client.get_request_settings(&resource_id).await?;
        apply_request_settings_to_state(&mut prior, &settings);
        Ok(prior)
    }

    async fn update_settings(
        &self,
        prior: RequestSettingState,
        mut plan: RequestSettingState,
    ) -> Result<RequestSettingState, Error> {
        let resource_id = required_str("id", &prior.id)?;
        let patch = build_request_settings_patch(&plan)?;
        let client = require_client(&self.client)?;
        debug!("patching request settings of {resource_id}");
        let settings = client.patch_request_settings(&resource_id, &patch).await?;
        plan.id = Value::Known(resource_id);
        apply_request_settings_to_state(&mut plan, &settings);
        Ok(plan)
    }
}

#[async_trait]
impl Resource for RequestSettingResource {
    type State = RequestSettingState;

    fn type_name_suffix(&self) -> &'static str {
        "request_setting_resource"
    }

    fn schema(&self) -> Schema {
        request_setting_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: RequestSettingState) -> Response<RequestSettingState> {
        unsupported(
            "Create",
            ENTITY,
            "request settings exist for every resource; import them instead",
            Some(plan),
        )
    }

    async fn read(&self, prior: RequestSettingState) -> Response<RequestSettingState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_settings(prior).await)
    }

    async fn update(
        &self,
        prior: RequestSettingState,
        plan: RequestSettingState,
    ) -> Response<RequestSettingState> {
        Response::from_result(Verb::Updating, ENTITY, self.update_settings(prior, plan).await)
    }

    async fn delete(&self, _prior: RequestSettingState) -> Response<RequestSettingState> {
        unsupported(
            "Delete",
            ENTITY,
            "request settings cannot be deleted; the resource is only removed from state",
            None,
        )
    }

    fn import_state(&self, id: &str) -> Response<RequestSettingState> {
        Response::ok(RequestSettingState {
            id: Value::known(id),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_default(block: DefaultSettingBlock) -> RequestSettingState {
        RequestSettingState {
            id: Value::from("0oares"),
            risk_settings: Some(RiskSettingsBlock {
                default_setting: Some(block),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn restricted_sends_only_the_restricted_variant() {
        let state = with_default(DefaultSettingBlock {
            request_submission_type: Value::from("RESTRICTED"),
            ..Default::default()
        });
        let patch = build_request_settings_patch(&state).expect("patch");
        assert_eq!(
            serde_json::to_value(&patch).expect("serialize"),
            json!({
                "requestOnBehalfOfSettings": null,
                "riskSettings": {"defaultSetting": {"requestSubmissionType": "RESTRICTED"}}
            })
        );
    }

    #[test]
    fn overrides_carry_sequence_and_duration() {
        let state = with_default(DefaultSettingBlock {
            request_submission_type: Value::from("ALLOWED_WITH_OVERRIDES"),
            approval_sequence_id: Value::from("seq1"),
            access_duration_settings: Some(AccessDurationBlock {
                kind: Value::from("ADMIN_FIXED_DURATION"),
                duration: Value::from("P1D"),
            }),
            ..Default::default()
        });
        let patch = build_request_settings_patch(&state).expect("patch");
        assert_eq!(
            serde_json::to_value(&patch.risk_settings).expect("serialize"),
            json!({"defaultSetting": {
                "requestSubmissionType": "ALLOWED_WITH_OVERRIDES",
                "approvalSequenceId": "seq1",
                "accessDurationSettings": {"type": "ADMIN_FIXED_DURATION", "duration": "P1D"}
            }})
        );
    }

    #[test]
    fn overrides_without_sequence_is_invalid() {
        let state = with_default(DefaultSettingBlock {
            request_submission_type: Value::from("ALLOWED_WITH_OVERRIDES"),
            ..Default::default()
        });
        assert!(matches!(
            build_request_settings_patch(&state),
            Err(Error::Validation { ref path, .. })
                if path == "risk_settings.default_setting.approval_sequence_id"
        ));
    }

    #[test]
    fn non_override_types_reject_override_fields() {
        let state = with_default(DefaultSettingBlock {
            request_submission_type: Value::from("ALLOWED_WITH_NO_OVERRIDES"),
            approval_sequence_id: Value::from("seq1"),
            ..Default::default()
        });
        assert!(matches!(
            build_request_settings_patch(&state),
            Err(Error::Validation { ref path, .. })
                if path == "risk_settings.default_setting.approval_sequence_id"
        ));

        let state = with_default(DefaultSettingBlock {
            request_submission_type: Value::from("RESTRICTED"),
            access_duration_settings: Some(AccessDurationBlock {
                kind: Value::from("ADMIN_FIXED_DURATION"),
                duration: Value::from("P1D"),
            }),
            ..Default::default()
        });
        assert!(matches!(
            build_request_settings_patch(&state),
            Err(Error::Validation { ref path, .. })
                if path == "risk_settings.default_setting.access_duration_settings"
        ));
    }

    #[test]
    fn on_behalf_of_is_sent_only_when_allowed() {
        let mut state = RequestSettingState {
            id: Value::from("0oares"),
            request_on_behalf_of_settings: Some(OnBehalfOfBlock {
                allowed: Value::Known(false),
                only_for: vec![TypeBlock {
                    kind: Value::from("DIRECT_REPORT"),
                }],
            }),
            ..Default::default()
        };
        let patch = build_request_settings_patch(&state).expect("patch");
        assert!(patch.request_on_behalf_of_settings.is_none());

        if let Some(block) = state.request_on_behalf_of_settings.as_mut() {
            block.allowed = Value::Known(true);
        }
        let patch = build_request_settings_patch(&state).expect("patch");
        assert_eq!(
            serde_json::to_value(&patch.request_on_behalf_of_settings).expect("serialize"),
            json!({"allowed": true, "onlyFor": [{"type": "DIRECT_REPORT"}]})
        );
    }

    #[test]
    fn apply_reads_back_inbound_errors() {
        let settings: RequestSettings = serde_json::from_value(json!({
            "validAccessScopeSettings": [{"type": "GROUPS"}],
            "validRequesterSettings": [{"type": "EVERYONE"}],
            "riskSettings": {"defaultSetting": {
                "requestSubmissionType": "ALLOWED_WITH_NO_OVERRIDES",
                "error": ["no approval sequence"]
            }}
        }))
        .expect("decode");
        let mut state = RequestSettingState::default();
        apply_request_settings_to_state(&mut state, &settings);
        assert_eq!(
            state.valid_access_scope_settings,
            Value::Known(vec!["GROUPS".to_string()])
        );
        let default = state
            .risk_settings
            .and_then(|r| r.default_setting)
            .expect("default setting");
        assert_eq!(default.request_submission_type, Value::from("ALLOWED_WITH_NO_OVERRIDES"));
        assert!(default.approval_sequence_id.is_null());
        assert_eq!(default.error, Value::Known(vec!["no approval sequence".to_string()]));
    }
}
