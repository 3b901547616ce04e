//! Campaign state <-> wire payload.

use super::state::*;
use crate::error::Error;
use crate::models::{
    AuditFields, AutoRemediationSettings, Campaign, CampaignType, InactiveUsersScope,
    NotificationSettings, PrincipalScopeSettings, Recurrence, RemediationAction,
    RemediationSettings, ResourceScope, ResourceSettings, Reviewer, ReviewerLevel,
    ReviewerSettings, ScheduleSettings, StartReview, TargetEntitlement, TargetResource,
    TypedResourceRef,
};
use crate::provider::convert::{
    format_timestamp, id_blocks, id_refs, optional_string, parse_timestamp, required_str,
    AuditState,
};
use crate::provider::schema::Schema;
use crate::provider::value::Value;

fn required_block<'a, T>(path: &str, block: &'a Option<T>) -> Result<&'a T, Error> {
    block
        .as_ref()
        .ok_or_else(|| Error::validation(path, "block is required"))
}

fn checked_str(schema: &Schema, path: &str, value: &Value<String>) -> Result<String, Error> {
    let raw = required_str(path, value)?;
    schema.check_str(path, &raw)?;
    Ok(raw)
}

fn remediation_action(schema: &Schema, path: &str, value: &Value<String>) -> Result<RemediationAction, Error> {
    let raw = checked_str(schema, path, value)?;
    RemediationAction::parse(&raw)
        .ok_or_else(|| Error::validation(path, format!("unsupported remediation action {raw:?}")))
}

fn typed_refs(path: &str, blocks: &[TypedRefBlock]) -> Result<Vec<TypedResourceRef>, Error> {
    let mut refs = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        refs.push(TypedResourceRef {
            resource_id: required_str(&format!("{path}[{i}].resource_id"), &block.resource_id)?,
            resource_type: required_str(&format!("{path}[{i}].resource_type"), &block.resource_type)?,
        });
    }
    Ok(refs)
}

fn non_empty_ids(path: &str, ids: &Value<Vec<String>>) -> Result<Option<Vec<String>>, Error> {
    let Some(ids) = ids.as_known() else {
        return Ok(None);
    };
    if let Some(i) = ids.iter().position(String::is_empty) {
        return Err(Error::validation(format!("{path}[{i}]"), "id must not be empty"));
    }
    Ok(Some(ids.clone()))
}

fn build_remediation(schema: &Schema, block: &RemediationBlock) -> Result<RemediationSettings, Error> {
    let path = "remediation_settings";
    let auto_remediation_settings = block
        .auto_remediation_settings
        .as_ref()
        .map(|auto| {
            Ok::<_, Error>(AutoRemediationSettings {
                include_all_indirect_assignments: auto.include_all_indirect_assignments.get(),
                include_only: typed_refs(
                    &format!("{path}.auto_remediation_settings.include_only"),
                    &auto.include_only,
                )?,
            })
        })
        .transpose()?;
    Ok(RemediationSettings {
        access_approved: remediation_action(schema, &format!("{path}.access_approved"), &block.access_approved)?,
        access_revoked: remediation_action(schema, &format!("{path}.access_revoked"), &block.access_revoked)?,
        no_response: remediation_action(schema, &format!("{path}.no_response"), &block.no_response)?,
        auto_remediation_settings,
    })
}

fn reject_flag(path: &str, name: &str, value: &Value<bool>, kind: &str) -> Result<(), Error> {
    if value.is_known() {
        return Err(Error::validation(
            format!("{path}.{name}"),
            format!("must not be set when type is {kind}"),
        ));
    }
    Ok(())
}

fn build_resource_settings(schema: &Schema, block: &ResourceSettingsBlock) -> Result<ResourceSettings, Error> {
    let path = "resource_settings";
    let kind = checked_str(schema, &format!("{path}.type"), &block.kind)?;
    let scope = match kind.as_str() {
        "GROUP" => {
            reject_flag(path, "include_admin_roles", &block.include_admin_roles, &kind)?;
            reject_flag(path, "include_entitlements", &block.include_entitlements, &kind)?;
            reject_flag(path, "individually_assigned_apps_only", &block.individually_assigned_apps_only, &kind)?;
            reject_flag(
                path,
                "only_include_out_of_policy_entitlements",
                &block.only_include_out_of_policy_entitlements,
                &kind,
            )?;
            ResourceScope::Group {
                individually_assigned_groups_only: block.individually_assigned_groups_only.get(),
            }
        }
        _ => {
            reject_flag(
                path,
                "individually_assigned_groups_only",
                &block.individually_assigned_groups_only,
                &kind,
            )?;
            ResourceScope::Application {
                include_admin_roles: block.include_admin_roles.get(),
                include_entitlements: block.include_entitlements.get(),
                individually_assigned_apps_only: block.individually_assigned_apps_only.get(),
                only_include_out_of_policy_entitlements: block.only_include_out_of_policy_entitlements.get(),
            }
        }
    };

    let mut target_resources = Vec::with_capacity(block.target_resources.len());
    for (i, target) in block.target_resources.iter().enumerate() {
        let target_path = format!("{path}.target_resources[{i}]");
        let mut entitlements = Vec::with_capacity(target.entitlements.len());
        for (j, entitlement) in target.entitlements.iter().enumerate() {
            let ent_path = format!("{target_path}.entitlements[{j}]");
            entitlements.push(TargetEntitlement {
                id: required_str(&format!("{ent_path}.id"), &entitlement.id)?,
                include_all_values: entitlement.include_all_values.get(),
                values: id_refs(&format!("{ent_path}.values"), &entitlement.values)?,
            });
        }
        target_resources.push(TargetResource {
            resource_id: required_str(&format!("{target_path}.resource_id"), &target.resource_id)?,
            resource_type: required_str(&format!("{target_path}.resource_type"), &target.resource_type)?,
            include_all_entitlements_and_bundles: target.include_all_entitlements_and_bundles.get(),
            entitlement_bundles: id_refs(&format!("{target_path}.entitlement_bundles"), &target.entitlement_bundles)?,
            entitlements,
        });
    }

    Ok(ResourceSettings {
        scope,
        excluded_resources: typed_refs(&format!("{path}.excluded_resources"), &block.excluded_resources)?,
        target_resources,
    })
}

/// Discriminated reviewer fields shared by the top-level settings and each level.
struct ReviewerFields<'a> {
    kind: &'a Value<String>,
    reviewer_id: &'a Value<String>,
    reviewer_group_id: &'a Value<String>,
    reviewer_scope_expression: &'a Value<String>,
}

impl ReviewerFields<'_> {
    /// Rejects every id-like sibling except `keep`.
    fn reject_siblings(&self, path: &str, kind: &str, keep: Option<&str>) -> Result<(), Error> {
        let siblings = [
            ("reviewer_id", self.reviewer_id),
            ("reviewer_group_id", self.reviewer_group_id),
            ("reviewer_scope_expression", self.reviewer_scope_expression),
        ];
        for (name, value) in siblings {
            if Some(name) != keep && value.non_empty().is_some() {
                return Err(Error::validation(
                    format!("{path}.{name}"),
                    format!("must not be set when type is {kind}"),
                ));
            }
        }
        Ok(())
    }
}

fn build_reviewer(
    schema: &Schema,
    path: &str,
    fields: &ReviewerFields<'_>,
    levels: &[ReviewerLevelBlock],
) -> Result<Reviewer, Error> {
    let kind = checked_str(schema, &format!("{path}.type"), fields.kind)?;
    if kind != "MULTI_LEVEL" && !levels.is_empty() {
        return Err(Error::validation(
            format!("{path}.reviewer_levels"),
            "only allowed when type is MULTI_LEVEL",
        ));
    }
    let keep = match kind.as_str() {
        "USER" => Some("reviewer_id"),
        "GROUP" => Some("reviewer_group_id"),
        "REVIEWER_EXPRESSION" => Some("reviewer_scope_expression"),
        _ => None,
    };
    fields.reject_siblings(path, &kind, keep)?;
    let reviewer = match kind.as_str() {
        "USER" => Reviewer::User {
            reviewer_id: required_str(&format!("{path}.reviewer_id"), fields.reviewer_id)?,
        },
        "GROUP" => Reviewer::Group {
            reviewer_group_id: required_str(&format!("{path}.reviewer_group_id"), fields.reviewer_group_id)?,
        },
        "REVIEWER_EXPRESSION" => Reviewer::ReviewerExpression {
            reviewer_scope_expression: required_str(
                &format!("{path}.reviewer_scope_expression"),
                fields.reviewer_scope_expression,
            )?,
        },
        "RESOURCE_OWNER" => Reviewer::ResourceOwner,
        "USER_MANAGER" => Reviewer::UserManager,
        "MULTI_LEVEL" => {
            if levels.is_empty() {
                return Err(Error::validation(
                    format!("{path}.reviewer_levels"),
                    "at least one reviewer level is required when type is MULTI_LEVEL",
                ));
            }
            let reviewer_levels = levels
                .iter()
                .enumerate()
                .map(|(i, level)| build_reviewer_level(schema, &format!("{path}.reviewer_levels[{i}]"), level))
                .collect::<Result<Vec<_>, Error>>()?;
            Reviewer::MultiLevel { reviewer_levels }
        }
        other => {
            return Err(Error::validation(
                format!("{path}.type"),
                format!("unsupported reviewer type {other:?}"),
            ))
        }
    };
    Ok(reviewer)
}

fn build_reviewer_level(schema: &Schema, path: &str, block: &ReviewerLevelBlock) -> Result<ReviewerLevel, Error> {
    let fields = ReviewerFields {
        kind: &block.kind,
        reviewer_id: &block.reviewer_id,
        reviewer_group_id: &block.reviewer_group_id,
        reviewer_scope_expression: &block.reviewer_scope_expression,
    };
    let reviewer = build_reviewer(schema, path, &fields, &[])?;
    let start_path = format!("{path}.start_review");
    let start = required_block(&start_path, &block.start_review)?;
    let on_day = start
        .on_day
        .get()
        .ok_or_else(|| Error::validation(format!("{start_path}.on_day"), "value is required"))?;
    if on_day < 0 {
        return Err(Error::validation(format!("{start_path}.on_day"), "must not be negative"));
    }
    Ok(ReviewerLevel {
        id: block.id.non_empty_owned(),
        reviewer,
        fall_back_reviewer_id: block.fall_back_reviewer_id.non_empty_owned(),
        self_review_disabled: block.self_review_disabled.get(),
        start_review: StartReview {
            on_day,
            when: start.when.non_empty_owned(),
        },
    })
}

fn build_reviewer_settings(schema: &Schema, block: &ReviewerSettingsBlock) -> Result<ReviewerSettings, Error> {
    let fields = ReviewerFields {
        kind: &block.kind,
        reviewer_id: &block.reviewer_id,
        reviewer_group_id: &block.reviewer_group_id,
        reviewer_scope_expression: &block.reviewer_scope_expression,
    };
    Ok(ReviewerSettings {
        reviewer: build_reviewer(schema, "reviewer_settings", &fields, &block.reviewer_levels)?,
        fall_back_reviewer_id: block.fall_back_reviewer_id.non_empty_owned(),
        bulk_decision_disabled: block.bulk_decision_disabled.get(),
        justification_required: block.justification_required.get(),
        reassignment_disabled: block.reassignment_disabled.get(),
        self_review_disabled: block.self_review_disabled.get(),
    })
}

fn build_schedule(block: &ScheduleBlock) -> Result<ScheduleSettings, Error> {
    let path = "schedule_settings";
    let start_date = parse_timestamp(&format!("{path}.start_date"), &block.start_date)?;
    let end_date = parse_timestamp(&format!("{path}.end_date"), &block.end_date)?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            return Err(Error::validation(
                format!("{path}.end_date"),
                "must not be before start_date",
            ));
        }
    }
    let duration_in_days = block.duration_in_days.get();
    if duration_in_days.is_some_and(|days| days <= 0) {
        return Err(Error::validation(
            format!("{path}.duration_in_days"),
            "must be greater than zero",
        ));
    }
    let recurrence = block
        .recurrence
        .as_ref()
        .map(|recurrence| {
            Ok::<_, Error>(Recurrence {
                interval: required_str(&format!("{path}.recurrence.interval"), &recurrence.interval)?,
                ends: parse_timestamp(&format!("{path}.recurrence.ends"), &recurrence.ends)?,
                repeat_on_type: recurrence.repeat_on_type.non_empty_owned(),
            })
        })
        .transpose()?;
    Ok(ScheduleSettings {
        kind: required_str(&format!("{path}.type"), &block.kind)?,
        start_date,
        end_date,
        duration_in_days,
        time_zone: block.time_zone.non_empty_owned(),
        recurrence,
    })
}

fn build_notifications(block: &NotificationBlock) -> NotificationSettings {
    NotificationSettings {
        notify_reviewer_at_campaign_end: block.notify_reviewer_at_campaign_end.get(),
        notify_reviewer_during_midpoint_of_review: block.notify_reviewer_during_midpoint_of_review.get(),
        notify_reviewer_when_overdue: block.notify_reviewer_when_overdue.get(),
        notify_reviewer_when_review_assigned: block.notify_reviewer_when_review_assigned.get(),
        notify_review_period_end: block.notify_review_period_end.get(),
        reminders_reviewer_before_campaign_close_in_secs: block
            .reminders_reviewer_before_campaign_close_in_secs
            .as_known()
            .cloned(),
    }
}

fn build_principal_scope(
    schema: &Schema,
    block: &PrincipalScopeBlock,
) -> Result<PrincipalScopeSettings, Error> {
    let path = "principal_scope_settings";
    let kind = checked_str(schema, &format!("{path}.type"), &block.kind)?;
    let keep = match kind.as_str() {
        "USERS" => "user_ids",
        "GROUPS" => "group_ids",
        "USER_SCOPE_EXPRESSION" => "user_scope_expression",
        _ => "predefined_inactive_users_scope",
    };
    let siblings = [
        ("user_ids", block.user_ids.as_known().is_some_and(|ids| !ids.is_empty())),
        ("group_ids", block.group_ids.as_known().is_some_and(|ids| !ids.is_empty())),
        ("user_scope_expression", block.user_scope_expression.non_empty().is_some()),
        ("predefined_inactive_users_scope", block.predefined_inactive_users_scope.is_some()),
    ];
    for (name, set) in siblings {
        if name == keep && !set {
            return Err(Error::validation(
                format!("{path}.{name}"),
                format!("value is required when type is {kind}"),
            ));
        }
        if name != keep && set {
            return Err(Error::validation(
                format!("{path}.{name}"),
                format!("must not be set when type is {kind}"),
            ));
        }
    }
    let predefined_inactive_users_scope = block
        .predefined_inactive_users_scope
        .as_ref()
        .map(|scope| {
            let days_path = format!("{path}.predefined_inactive_users_scope.inactive_days");
            match scope.inactive_days.get() {
                Some(inactive_days) if inactive_days > 0 => Ok(InactiveUsersScope { inactive_days }),
                Some(_) => Err(Error::validation(days_path, "must be greater than zero")),
                None => Err(Error::validation(days_path, "value is required")),
            }
        })
        .transpose()?;
    Ok(PrincipalScopeSettings {
        kind,
        user_ids: non_empty_ids(&format!("{path}.user_ids"), &block.user_ids)?,
        group_ids: non_empty_ids(&format!("{path}.group_ids"), &block.group_ids)?,
        user_scope_expression: block.user_scope_expression.non_empty_owned(),
        predefined_inactive_users_scope,
        excluded_user_ids: non_empty_ids(&format!("{path}.excluded_user_ids"), &block.excluded_user_ids)?,
        include_only_active_users: block.include_only_active_users.get(),
        only_include_users_with_sod_conflicts: block.only_include_users_with_sod_conflicts.get(),
    })
}

fn build_campaign_type(schema: &Schema, value: &Value<String>) -> Result<Option<CampaignType>, Error> {
    let Some(raw) = value.non_empty() else {
        return Ok(None);
    };
    schema.check_str("campaign_type", raw)?;
    Ok(Some(match raw {
        "USER" => CampaignType::User,
        _ => CampaignType::Resource,
    }))
}

/// Validates the plan and builds the full create/replace payload.
pub fn build_campaign(state: &CampaignState) -> Result<Campaign, Error> {
    let schema = campaign_schema();
    let remediation = required_block("remediation_settings", &state.remediation_settings)?;
    let resources = required_block("resource_settings", &state.resource_settings)?;
    let reviewers = required_block("reviewer_settings", &state.reviewer_settings)?;
    let schedule = required_block("schedule_settings", &state.schedule_settings)?;
    Ok(Campaign {
        id: state.id.non_empty_owned(),
        name: checked_str(&schema, "name", &state.name)?,
        description: state.description.non_empty_owned(),
        status: None,
        campaign_type: build_campaign_type(&schema, &state.campaign_type)?,
        recurring_campaign_id: state.recurring_campaign_id.non_empty_owned(),
        remediation_settings: build_remediation(&schema, remediation)?,
        resource_settings: build_resource_settings(&schema, resources)?,
        reviewer_settings: build_reviewer_settings(&schema, reviewers)?,
        schedule_settings: build_schedule(schedule)?,
        notification_settings: state.notification_settings.as_ref().map(build_notifications),
        principal_scope_settings: state
            .principal_scope_settings
            .as_ref()
            .map(|block| build_principal_scope(&schema, block))
            .transpose()?,
        audit: AuditFields::default(),
    })
}

fn typed_ref_blocks(refs: &[TypedResourceRef]) -> Vec<TypedRefBlock> {
    refs.iter()
        .map(|r| TypedRefBlock {
            resource_id: Value::Known(r.resource_id.clone()),
            resource_type: Value::Known(r.resource_type.clone()),
        })
        .collect()
}

fn remediation_to_state(settings: &RemediationSettings) -> RemediationBlock {
    RemediationBlock {
        access_approved: Value::known(settings.access_approved.as_str()),
        access_revoked: Value::known(settings.access_revoked.as_str()),
        no_response: Value::known(settings.no_response.as_str()),
        auto_remediation_settings: settings.auto_remediation_settings.as_ref().map(|auto| {
            AutoRemediationBlock {
                include_all_indirect_assignments: Value::from_option(auto.include_all_indirect_assignments),
                include_only: typed_ref_blocks(&auto.include_only),
            }
        }),
    }
}

fn resource_settings_to_state(settings: &ResourceSettings) -> ResourceSettingsBlock {
    let mut block = ResourceSettingsBlock {
        excluded_resources: typed_ref_blocks(&settings.excluded_resources),
        target_resources: settings
            .target_resources
            .iter()
            .map(|target| TargetResourceBlock {
                resource_id: Value::Known(target.resource_id.clone()),
                resource_type: Value::Known(target.resource_type.clone()),
                include_all_entitlements_and_bundles: Value::from_option(target.include_all_entitlements_and_bundles),
                entitlement_bundles: id_blocks(&target.entitlement_bundles),
                entitlements: target
                    .entitlements
                    .iter()
                    .map(|entitlement| TargetEntitlementBlock {
                        id: Value::Known(entitlement.id.clone()),
                        include_all_values: Value::from_option(entitlement.include_all_values),
                        values: id_blocks(&entitlement.values),
                    })
                    .collect(),
            })
            .collect(),
        ..Default::default()
    };
    match &settings.scope {
        ResourceScope::Application {
            include_admin_roles,
            include_entitlements,
            individually_assigned_apps_only,
            only_include_out_of_policy_entitlements,
        } => {
            block.kind = Value::known("APPLICATION");
            block.include_admin_roles = Value::from_option(*include_admin_roles);
            block.include_entitlements = Value::from_option(*include_entitlements);
            block.individually_assigned_apps_only = Value::from_option(*individually_assigned_apps_only);
            block.only_include_out_of_policy_entitlements =
                Value::from_option(*only_include_out_of_policy_entitlements);
        }
        ResourceScope::Group {
            individually_assigned_groups_only,
        } => {
            block.kind = Value::known("GROUP");
            block.individually_assigned_groups_only = Value::from_option(*individually_assigned_groups_only);
        }
    }
    block
}

/// Discriminator plus the one meaningful sibling; the rest stay null.
struct ReviewerParts {
    kind: Value<String>,
    reviewer_id: Value<String>,
    reviewer_group_id: Value<String>,
    reviewer_scope_expression: Value<String>,
    levels: Vec<ReviewerLevelBlock>,
}

fn reviewer_parts(reviewer: &Reviewer) -> Result<ReviewerParts, Error> {
    let mut parts = ReviewerParts {
        kind: Value::known(reviewer.type_name()),
        reviewer_id: Value::Null,
        reviewer_group_id: Value::Null,
        reviewer_scope_expression: Value::Null,
        levels: Vec::new(),
    };
    match reviewer {
        Reviewer::User { reviewer_id } => parts.reviewer_id = Value::Known(reviewer_id.clone()),
        Reviewer::Group { reviewer_group_id } => {
            parts.reviewer_group_id = Value::Known(reviewer_group_id.clone())
        }
        Reviewer::ReviewerExpression {
            reviewer_scope_expression,
        } => parts.reviewer_scope_expression = Value::Known(reviewer_scope_expression.clone()),
        Reviewer::ResourceOwner | Reviewer::UserManager => {}
        Reviewer::MultiLevel { reviewer_levels } => {
            parts.levels = reviewer_levels
                .iter()
                .map(reviewer_level_to_state)
                .collect::<Result<Vec<_>, Error>>()?;
        }
    }
    Ok(parts)
}

fn reviewer_level_to_state(level: &ReviewerLevel) -> Result<ReviewerLevelBlock, Error> {
    if matches!(level.reviewer, Reviewer::MultiLevel { .. }) {
        return Err(Error::Translation(
            "reviewer level of type MULTI_LEVEL cannot be nested".to_string(),
        ));
    }
    let parts = reviewer_parts(&level.reviewer)?;
    Ok(ReviewerLevelBlock {
        id: optional_string(level.id.clone()),
        kind: parts.kind,
        reviewer_id: parts.reviewer_id,
        reviewer_group_id: parts.reviewer_group_id,
        reviewer_scope_expression: parts.reviewer_scope_expression,
        fall_back_reviewer_id: optional_string(level.fall_back_reviewer_id.clone()),
        self_review_disabled: Value::from_option(level.self_review_disabled),
        start_review: Some(StartReviewBlock {
            on_day: Value::Known(level.start_review.on_day),
            when: optional_string(level.start_review.when.clone()),
        }),
    })
}

fn reviewer_settings_to_state(settings: &ReviewerSettings) -> Result<ReviewerSettingsBlock, Error> {
    let parts = reviewer_parts(&settings.reviewer)?;
    Ok(ReviewerSettingsBlock {
        kind: parts.kind,
        reviewer_id: parts.reviewer_id,
        reviewer_group_id: parts.reviewer_group_id,
        reviewer_scope_expression: parts.reviewer_scope_expression,
        fall_back_reviewer_id: optional_string(settings.fall_back_reviewer_id.clone()),
        bulk_decision_disabled: Value::from_option(settings.bulk_decision_disabled),
        justification_required: Value::from_option(settings.justification_required),
        reassignment_disabled: Value::from_option(settings.reassignment_disabled),
        self_review_disabled: Value::from_option(settings.self_review_disabled),
        reviewer_levels: parts.levels,
    })
}

fn schedule_to_state(settings: &ScheduleSettings) -> Result<ScheduleBlock, Error> {
    let recurrence = settings
        .recurrence
        .as_ref()
        .map(|recurrence| {
            Ok::<_, Error>(RecurrenceBlock {
                interval: Value::Known(recurrence.interval.clone()),
                ends: format_timestamp(recurrence.ends)?,
                repeat_on_type: optional_string(recurrence.repeat_on_type.clone()),
            })
        })
        .transpose()?;
    Ok(ScheduleBlock {
        kind: Value::Known(settings.kind.clone()),
        start_date: format_timestamp(settings.start_date)?,
        end_date: format_timestamp(settings.end_date)?,
        duration_in_days: Value::from_option(settings.duration_in_days),
        time_zone: optional_string(settings.time_zone.clone()),
        recurrence,
    })
}

fn notifications_to_state(settings: &NotificationSettings) -> NotificationBlock {
    NotificationBlock {
        notify_reviewer_at_campaign_end: Value::from_option(settings.notify_reviewer_at_campaign_end),
        notify_reviewer_during_midpoint_of_review: Value::from_option(
            settings.notify_reviewer_during_midpoint_of_review,
        ),
        notify_reviewer_when_overdue: Value::from_option(settings.notify_reviewer_when_overdue),
        notify_reviewer_when_review_assigned: Value::from_option(settings.notify_reviewer_when_review_assigned),
        notify_review_period_end: Value::from_option(settings.notify_review_period_end),
        reminders_reviewer_before_campaign_close_in_secs: Value::from_option(
            settings.reminders_reviewer_before_campaign_close_in_secs.clone(),
        ),
    }
}

fn principal_scope_to_state(settings: &PrincipalScopeSettings) -> PrincipalScopeBlock {
    PrincipalScopeBlock {
        kind: Value::Known(settings.kind.clone()),
        user_ids: Value::from_option(settings.user_ids.clone()),
        group_ids: Value::from_option(settings.group_ids.clone()),
        user_scope_expression: optional_string(settings.user_scope_expression.clone()),
        predefined_inactive_users_scope: settings.predefined_inactive_users_scope.map(|scope| InactiveUsersBlock {
            inactive_days: Value::Known(scope.inactive_days),
        }),
        excluded_user_ids: Value::from_option(settings.excluded_user_ids.clone()),
        include_only_active_users: Value::from_option(settings.include_only_active_users),
        only_include_users_with_sod_conflicts: Value::from_option(settings.only_include_users_with_sod_conflicts),
    }
}

/// Mirrors a server campaign into state. Shared by Create, Read and Update.
pub fn apply_campaign_to_state(state: &mut CampaignState, campaign: &Campaign) -> Result<(), Error> {
    state.id = optional_string(campaign.id.clone());
    state.name = Value::Known(campaign.name.clone());
    state.description = optional_string(campaign.description.clone());
    state.status = optional_string(campaign.status.clone());
    state.campaign_type = Value::known(campaign.campaign_type.unwrap_or_default().as_str());
    state.recurring_campaign_id = optional_string(campaign.recurring_campaign_id.clone());
    state.remediation_settings = Some(remediation_to_state(&campaign.remediation_settings));
    state.resource_settings = Some(resource_settings_to_state(&campaign.resource_settings));
    state.reviewer_settings = Some(reviewer_settings_to_state(&campaign.reviewer_settings)?);
    state.schedule_settings = Some(schedule_to_state(&campaign.schedule_settings)?);
    state.notification_settings = campaign.notification_settings.as_ref().map(notifications_to_state);
    state.principal_scope_settings = campaign
        .principal_scope_settings
        .as_ref()
        .map(principal_scope_to_state);
    state.audit = AuditState::from_audit(&campaign.audit)?;
    Ok(())
}
