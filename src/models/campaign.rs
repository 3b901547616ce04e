use super::common::{AuditFields, IdRef, TypedResourceRef};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignType {
    #[default]
    Resource,
    User,
}

impl CampaignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Resource => "RESOURCE",
            CampaignType::User => "USER",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_type: Option<CampaignType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_campaign_id: Option<String>,
    pub remediation_settings: RemediationSettings,
    pub resource_settings: ResourceSettings,
    pub reviewer_settings: ReviewerSettings,
    pub schedule_settings: ScheduleSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<NotificationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_scope_settings: Option<PrincipalScopeSettings>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemediationAction {
    NoAction,
    Deny,
}

impl RemediationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationAction::NoAction => "NO_ACTION",
            RemediationAction::Deny => "DENY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NO_ACTION" => Some(RemediationAction::NoAction),
            "DENY" => Some(RemediationAction::Deny),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemediationSettings {
    pub access_approved: RemediationAction,
    pub access_revoked: RemediationAction,
    pub no_response: RemediationAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_remediation_settings: Option<AutoRemediationSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoRemediationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all_indirect_assignments: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_only: Vec<TypedResourceRef>,
}

/// Which resources a campaign reviews. The variant decides which
/// assignment filters apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ResourceScope {
    Application {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_admin_roles: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_entitlements: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        individually_assigned_apps_only: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        only_include_out_of_policy_entitlements: Option<bool>,
    },
    Group {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        individually_assigned_groups_only: Option<bool>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSettings {
    #[serde(flatten)]
    pub scope: ResourceScope,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_resources: Vec<TypedResourceRef>,
    #[serde(default)]
    pub target_resources: Vec<TargetResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetResource {
    pub resource_id: String,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all_entitlements_and_bundles: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entitlement_bundles: Vec<IdRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entitlements: Vec<TargetEntitlement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntitlement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all_values: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<IdRef>,
}

/// Who reviews. `MultiLevel` is only valid at the top level of the
/// reviewer settings, never inside a reviewer level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Reviewer {
    User { reviewer_id: String },
    Group { reviewer_group_id: String },
    ReviewerExpression { reviewer_scope_expression: String },
    ResourceOwner,
    UserManager,
    MultiLevel { reviewer_levels: Vec<ReviewerLevel> },
}

impl Reviewer {
    pub fn type_name(&self) -> &'static str {
        match self {
            Reviewer::User { .. } => "USER",
            Reviewer::Group { .. } => "GROUP",
            Reviewer::ReviewerExpression { .. } => "REVIEWER_EXPRESSION",
            Reviewer::ResourceOwner => "RESOURCE_OWNER",
            Reviewer::UserManager => "USER_MANAGER",
            Reviewer::MultiLevel { .. } => "MULTI_LEVEL",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerSettings {
    #[serde(flatten)]
    pub reviewer: Reviewer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fall_back_reviewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_decision_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reassignment_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_review_disabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerLevel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub reviewer: Reviewer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fall_back_reviewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_review_disabled: Option<bool>,
    pub start_review: StartReview,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartReview {
    pub on_day: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSettings {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_days: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub interval: String,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ends: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_on_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_reviewer_at_campaign_end: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_reviewer_during_midpoint_of_review: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_reviewer_when_overdue: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_reviewer_when_review_assigned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_review_period_end: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders_reviewer_before_campaign_close_in_secs: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalScopeSettings {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_scope_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined_inactive_users_scope: Option<InactiveUsersScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_user_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_only_active_users: Option<bool>,
    #[serde(
        rename = "onlyIncludeUsersWithSODConflicts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub only_include_users_with_sod_conflicts: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InactiveUsersScope {
    pub inactive_days: i32,
}
