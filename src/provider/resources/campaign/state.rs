use crate::provider::convert::{with_audit_attributes, AuditState, IdBlock};
use crate::provider::schema::{Attribute, AttributeKind, Block, Schema, Validator};
use crate::provider::value::Value;

pub const REMEDIATION_ACTIONS: &[&str] = &["NO_ACTION", "DENY"];
pub const CAMPAIGN_TYPES: &[&str] = &["RESOURCE", "USER"];
pub const RESOURCE_SCOPE_TYPES: &[&str] = &["APPLICATION", "GROUP"];
pub const REVIEWER_TYPES: &[&str] = &[
    "USER",
    "GROUP",
    "REVIEWER_EXPRESSION",
    "RESOURCE_OWNER",
    "USER_MANAGER",
    "MULTI_LEVEL",
];
pub const PRINCIPAL_SCOPE_TYPES: &[&str] = &[
    "USERS",
    "GROUPS",
    "USER_SCOPE_EXPRESSION",
    "PREDEFINED_INACTIVE_USERS",
];
pub const LEVEL_REVIEWER_TYPES: &[&str] = &[
    "USER",
    "GROUP",
    "REVIEWER_EXPRESSION",
    "RESOURCE_OWNER",
    "USER_MANAGER",
];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CampaignState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub status: Value<String>,
    pub campaign_type: Value<String>,
    pub recurring_campaign_id: Value<String>,
    pub remediation_settings: Option<RemediationBlock>,
    pub resource_settings: Option<ResourceSettingsBlock>,
    pub reviewer_settings: Option<ReviewerSettingsBlock>,
    pub schedule_settings: Option<ScheduleBlock>,
    pub notification_settings: Option<NotificationBlock>,
    pub principal_scope_settings: Option<PrincipalScopeBlock>,
    pub audit: AuditState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemediationBlock {
    pub access_approved: Value<String>,
    pub access_revoked: Value<String>,
    pub no_response: Value<String>,
    pub auto_remediation_settings: Option<AutoRemediationBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutoRemediationBlock {
    pub include_all_indirect_assignments: Value<bool>,
    pub include_only: Vec<TypedRefBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypedRefBlock {
    pub resource_id: Value<String>,
    pub resource_type: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceSettingsBlock {
    pub kind: Value<String>,
    pub include_admin_roles: Value<bool>,
    pub include_entitlements: Value<bool>,
    pub individually_assigned_apps_only: Value<bool>,
    pub individually_assigned_groups_only: Value<bool>,
    pub only_include_out_of_policy_entitlements: Value<bool>,
    pub excluded_resources: Vec<TypedRefBlock>,
    pub target_resources: Vec<TargetResourceBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetResourceBlock {
    pub resource_id: Value<String>,
    pub resource_type: Value<String>,
    pub include_all_entitlements_and_bundles: Value<bool>,
    pub entitlement_bundles: Vec<IdBlock>,
    pub entitlements: Vec<TargetEntitlementBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetEntitlementBlock {
    pub id: Value<String>,
    pub include_all_values: Value<bool>,
    pub values: Vec<IdBlock>,
}

/// Top-level reviewer. `reviewer_levels` is only set for `MULTI_LEVEL`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewerSettingsBlock {
    pub kind: Value<String>,
    pub reviewer_id: Value<String>,
    pub reviewer_group_id: Value<String>,
    pub reviewer_scope_expression: Value<String>,
    pub fall_back_reviewer_id: Value<String>,
    pub bulk_decision_disabled: Value<bool>,
    pub justification_required: Value<bool>,
    pub reassignment_disabled: Value<bool>,
    pub self_review_disabled: Value<bool>,
    pub reviewer_levels: Vec<ReviewerLevelBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewerLevelBlock {
    pub id: Value<String>,
    pub kind: Value<String>,
    pub reviewer_id: Value<String>,
    pub reviewer_group_id: Value<String>,
    pub reviewer_scope_expression: Value<String>,
    pub fall_back_reviewer_id: Value<String>,
    pub self_review_disabled: Value<bool>,
    pub start_review: Option<StartReviewBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartReviewBlock {
    pub on_day: Value<i32>,
    pub when: Value<String>,
}

/// Dates are RFC 3339 strings in state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleBlock {
    pub kind: Value<String>,
    pub start_date: Value<String>,
    pub end_date: Value<String>,
    pub duration_in_days: Value<i32>,
    pub time_zone: Value<String>,
    pub recurrence: Option<RecurrenceBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecurrenceBlock {
    pub interval: Value<String>,
    pub ends: Value<String>,
    pub repeat_on_type: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationBlock {
    pub notify_reviewer_at_campaign_end: Value<bool>,
    pub notify_reviewer_during_midpoint_of_review: Value<bool>,
    pub notify_reviewer_when_overdue: Value<bool>,
    pub notify_reviewer_when_review_assigned: Value<bool>,
    pub notify_review_period_end: Value<bool>,
    pub reminders_reviewer_before_campaign_close_in_secs: Value<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrincipalScopeBlock {
    pub kind: Value<String>,
    pub user_ids: Value<Vec<String>>,
    pub group_ids: Value<Vec<String>>,
    pub user_scope_expression: Value<String>,
    pub predefined_inactive_users_scope: Option<InactiveUsersBlock>,
    pub excluded_user_ids: Value<Vec<String>>,
    pub include_only_active_users: Value<bool>,
    pub only_include_users_with_sod_conflicts: Value<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InactiveUsersBlock {
    pub inactive_days: Value<i32>,
}

fn string(name: &'static str) -> Attribute {
    Attribute::optional(name, AttributeKind::String)
}

fn flag(name: &'static str) -> Attribute {
    Attribute::optional(name, AttributeKind::Bool)
}

fn typed_ref_block(name: &'static str) -> Block {
    Block::list(name)
        .attribute(Attribute::required("resource_id", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(Attribute::required("resource_type", AttributeKind::String))
}

fn reviewer_fields(block: Block, types: &'static [&'static str]) -> Block {
    block
        .attribute(Attribute::required("type", AttributeKind::String).with_validator(Validator::OneOf(types)))
        .attribute(string("reviewer_id"))
        .attribute(string("reviewer_group_id"))
        .attribute(string("reviewer_scope_expression"))
        .attribute(string("fall_back_reviewer_id"))
        .attribute(flag("self_review_disabled"))
}

pub fn campaign_schema() -> Schema {
    let remediation = Block::single("remediation_settings")
        .attribute(
            Attribute::required("access_approved", AttributeKind::String)
                .with_validator(Validator::OneOf(REMEDIATION_ACTIONS)),
        )
        .attribute(
            Attribute::required("access_revoked", AttributeKind::String)
                .with_validator(Validator::OneOf(REMEDIATION_ACTIONS)),
        )
        .attribute(
            Attribute::required("no_response", AttributeKind::String)
                .with_validator(Validator::OneOf(REMEDIATION_ACTIONS)),
        )
        .block(
            Block::single("auto_remediation_settings")
                .attribute(flag("include_all_indirect_assignments"))
                .block(typed_ref_block("include_only")),
        );

    let resources = Block::single("resource_settings")
        .attribute(
            Attribute::required("type", AttributeKind::String)
                .with_validator(Validator::OneOf(RESOURCE_SCOPE_TYPES)),
        )
        .attribute(flag("include_admin_roles"))
        .attribute(flag("include_entitlements"))
        .attribute(flag("individually_assigned_apps_only"))
        .attribute(flag("individually_assigned_groups_only"))
        .attribute(flag("only_include_out_of_policy_entitlements"))
        .block(typed_ref_block("excluded_resources"))
        .block(
            Block::list("target_resources")
                .attribute(Attribute::required("resource_id", AttributeKind::String).with_validator(Validator::NonEmpty))
                .attribute(Attribute::required("resource_type", AttributeKind::String))
                .attribute(flag("include_all_entitlements_and_bundles"))
                .block(Block::id_list("entitlement_bundles"))
                .block(
                    Block::list("entitlements")
                        .attribute(Attribute::required("id", AttributeKind::String))
                        .attribute(flag("include_all_values"))
                        .block(Block::id_list("values")),
                ),
        );

    let reviewers = reviewer_fields(Block::single("reviewer_settings"), REVIEWER_TYPES)
        .attribute(flag("bulk_decision_disabled"))
        .attribute(flag("justification_required"))
        .attribute(flag("reassignment_disabled"))
        .block(
            reviewer_fields(Block::list("reviewer_levels"), LEVEL_REVIEWER_TYPES)
                .attribute(Attribute::computed("id", AttributeKind::String))
                .block(
                    Block::single("start_review")
                        .attribute(Attribute::required("on_day", AttributeKind::Int32))
                        .attribute(string("when")),
                ),
        );

    let schedule = Block::single("schedule_settings")
        .attribute(Attribute::required("type", AttributeKind::String))
        .attribute(string("start_date").with_description("RFC 3339 timestamp."))
        .attribute(string("end_date").with_description("RFC 3339 timestamp."))
        .attribute(Attribute::optional("duration_in_days", AttributeKind::Int32))
        .attribute(string("time_zone"))
        .block(
            Block::single("recurrence")
                .attribute(Attribute::required("interval", AttributeKind::String))
                .attribute(string("ends"))
                .attribute(string("repeat_on_type")),
        );

    let notifications = Block::single("notification_settings")
        .attribute(flag("notify_reviewer_at_campaign_end"))
        .attribute(flag("notify_reviewer_during_midpoint_of_review"))
        .attribute(flag("notify_reviewer_when_overdue"))
        .attribute(flag("notify_reviewer_when_review_assigned"))
        .attribute(flag("notify_review_period_end"))
        .attribute(Attribute::optional(
            "reminders_reviewer_before_campaign_close_in_secs",
            AttributeKind::list_of(AttributeKind::Int64),
        ));

    let strings = || AttributeKind::list_of(AttributeKind::String);
    let principals = Block::single("principal_scope_settings")
        .attribute(
            Attribute::required("type", AttributeKind::String)
                .with_validator(Validator::OneOf(PRINCIPAL_SCOPE_TYPES)),
        )
        .attribute(Attribute::optional("user_ids", strings()))
        .attribute(Attribute::optional("group_ids", strings()))
        .attribute(string("user_scope_expression"))
        .attribute(Attribute::optional("excluded_user_ids", strings()))
        .attribute(flag("include_only_active_users"))
        .attribute(flag("only_include_users_with_sod_conflicts"))
        .block(
            Block::single("predefined_inactive_users_scope")
                .attribute(Attribute::required("inactive_days", AttributeKind::Int32)),
        );

    let schema = Schema::new("Manages an access certification campaign.")
        .attribute(Attribute::id())
        .attribute(Attribute::required("name", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(string("description"))
        .attribute(Attribute::computed("status", AttributeKind::String))
        .attribute(
            Attribute::optional_computed("campaign_type", AttributeKind::String)
                .with_description("RESOURCE (default) or USER.")
                .with_validator(Validator::OneOf(CAMPAIGN_TYPES)),
        )
        .attribute(string("recurring_campaign_id"))
        .block(remediation)
        .block(resources)
        .block(reviewers)
        .block(schedule)
        .block(notifications)
        .block(principals);
    with_audit_attributes(schema)
}
