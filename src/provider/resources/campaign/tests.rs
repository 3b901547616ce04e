use super::*;
use crate::models::{Campaign, Reviewer};
use crate::provider::convert::{AuditState, IdBlock};
use crate::provider::Resource;
use serde_json::json;

fn plan() -> CampaignState {
    CampaignState {
        id: Value::Unknown,
        name: Value::from("Quarterly Salesforce review"),
        status: Value::Unknown,
        campaign_type: Value::Unknown,
        remediation_settings: Some(RemediationBlock {
            access_approved: Value::from("NO_ACTION"),
            access_revoked: Value::from("DENY"),
            no_response: Value::from("NO_ACTION"),
            auto_remediation_settings: None,
        }),
        resource_settings: Some(ResourceSettingsBlock {
            kind: Value::from("APPLICATION"),
            include_entitlements: Value::Known(true),
            target_resources: vec![TargetResourceBlock {
                resource_id: Value::from("0oa1"),
                resource_type: Value::from("APPLICATION"),
                entitlements: vec![TargetEntitlementBlock {
                    id: Value::from("ent1"),
                    include_all_values: Value::Null,
                    values: vec![IdBlock::new("v1")],
                }],
                ..Default::default()
            }],
            ..Default::default()
        }),
        reviewer_settings: Some(ReviewerSettingsBlock {
            kind: Value::from("USER"),
            reviewer_id: Value::from("00u1"),
            justification_required: Value::Known(true),
            ..Default::default()
        }),
        schedule_settings: Some(ScheduleBlock {
            kind: Value::from("ONE_OFF"),
            start_date: Value::from("2025-01-01T00:00:00Z"),
            end_date: Value::from("2025-01-15T00:00:00Z"),
            duration_in_days: Value::Known(14),
            time_zone: Value::from("America/New_York"),
            recurrence: None,
        }),
        audit: AuditState::unknown(),
        ..Default::default()
    }
}

fn validation_path(result: Result<Campaign, Error>) -> String {
    match result {
        Err(Error::Validation { path, .. }) => path,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn build_emits_discriminated_settings() {
    let body = build_campaign(&plan()).expect("build");
    let value = serde_json::to_value(&body).expect("serialize");
    assert_eq!(
        value["reviewerSettings"],
        json!({"type": "USER", "reviewerId": "00u1", "justificationRequired": true})
    );
    assert_eq!(value["resourceSettings"]["type"], "APPLICATION");
    assert_eq!(value["resourceSettings"]["includeEntitlements"], true);
    assert_eq!(value["scheduleSettings"]["startDate"], "2025-01-01T00:00:00Z");
    assert!(value.get("id").is_none());
    assert!(value.get("campaignType").is_none());
    assert!(value.get("status").is_none());
}

#[test]
fn end_date_before_start_date_is_rejected() {
    let mut state = plan();
    if let Some(schedule) = state.schedule_settings.as_mut() {
        schedule.end_date = Value::from("2024-12-31T00:00:00Z");
    }
    assert_eq!(validation_path(build_campaign(&state)), "schedule_settings.end_date");
}

#[test]
fn equal_start_and_end_dates_are_accepted() {
    let mut state = plan();
    if let Some(schedule) = state.schedule_settings.as_mut() {
        schedule.end_date = schedule.start_date.clone();
    }
    assert!(build_campaign(&state).is_ok());
}

#[test]
fn non_positive_duration_is_rejected() {
    let mut state = plan();
    if let Some(schedule) = state.schedule_settings.as_mut() {
        schedule.duration_in_days = Value::Known(0);
    }
    assert_eq!(
        validation_path(build_campaign(&state)),
        "schedule_settings.duration_in_days"
    );
}

#[test]
fn malformed_start_date_is_a_validation_error() {
    let mut state = plan();
    if let Some(schedule) = state.schedule_settings.as_mut() {
        schedule.start_date = Value::from("next monday");
    }
    assert_eq!(validation_path(build_campaign(&state)), "schedule_settings.start_date");
}

#[test]
fn reviewer_siblings_must_match_the_type() {
    let mut state = plan();
    if let Some(reviewers) = state.reviewer_settings.as_mut() {
        reviewers.reviewer_group_id = Value::from("00g1");
    }
    assert_eq!(
        validation_path(build_campaign(&state)),
        "reviewer_settings.reviewer_group_id"
    );
}

#[test]
fn group_scope_rejects_application_flags() {
    let mut state = plan();
    if let Some(resources) = state.resource_settings.as_mut() {
        resources.kind = Value::from("GROUP");
    }
    assert_eq!(
        validation_path(build_campaign(&state)),
        "resource_settings.include_entitlements"
    );
}

#[test]
fn empty_target_entitlement_value_id_is_rejected() {
    let mut state = plan();
    if let Some(resources) = state.resource_settings.as_mut() {
        resources.target_resources[0].entitlements[0].values = vec![IdBlock::new("")];
    }
    assert_eq!(
        validation_path(build_campaign(&state)),
        "resource_settings.target_resources[0].entitlements[0].values[0].id"
    );
}

fn with_principals(scope: PrincipalScopeBlock) -> CampaignState {
    CampaignState {
        principal_scope_settings: Some(scope),
        ..plan()
    }
}

#[test]
fn principal_scope_keeps_only_the_field_of_its_type() {
    let users = PrincipalScopeBlock {
        kind: Value::from("USERS"),
        user_ids: Value::Known(vec!["00u1".to_string()]),
        excluded_user_ids: Value::Known(vec!["00u9".to_string()]),
        ..Default::default()
    };
    let body = build_campaign(&with_principals(users.clone())).expect("build");
    assert_eq!(
        serde_json::to_value(&body.principal_scope_settings).expect("serialize"),
        json!({"type": "USERS", "userIds": ["00u1"], "excludedUserIds": ["00u9"]})
    );

    let mixed = PrincipalScopeBlock {
        group_ids: Value::Known(vec!["00g1".to_string()]),
        ..users.clone()
    };
    assert_eq!(
        validation_path(build_campaign(&with_principals(mixed))),
        "principal_scope_settings.group_ids"
    );

    let with_expression = PrincipalScopeBlock {
        user_scope_expression: Value::from("user.department == \"IT\""),
        ..users
    };
    assert_eq!(
        validation_path(build_campaign(&with_principals(with_expression))),
        "principal_scope_settings.user_scope_expression"
    );
}

#[test]
fn principal_scope_type_is_checked() {
    let bogus = PrincipalScopeBlock {
        kind: Value::from("BOGUS"),
        user_ids: Value::Known(vec!["00u1".to_string()]),
        ..Default::default()
    };
    assert_eq!(
        validation_path(build_campaign(&with_principals(bogus))),
        "principal_scope_settings.type"
    );
}

#[test]
fn principal_scope_requires_the_field_of_its_type() {
    let groups = PrincipalScopeBlock {
        kind: Value::from("GROUPS"),
        ..Default::default()
    };
    assert_eq!(
        validation_path(build_campaign(&with_principals(groups))),
        "principal_scope_settings.group_ids"
    );

    let inactive = PrincipalScopeBlock {
        kind: Value::from("PREDEFINED_INACTIVE_USERS"),
        predefined_inactive_users_scope: Some(InactiveUsersBlock {
            inactive_days: Value::Known(0),
        }),
        ..Default::default()
    };
    assert_eq!(
        validation_path(build_campaign(&with_principals(inactive))),
        "principal_scope_settings.predefined_inactive_users_scope.inactive_days"
    );
}

fn multi_level_plan() -> CampaignState {
    let mut state = plan();
    state.reviewer_settings = Some(ReviewerSettingsBlock {
        kind: Value::from("MULTI_LEVEL"),
        reviewer_levels: vec![
            ReviewerLevelBlock {
                kind: Value::from("USER_MANAGER"),
                start_review: Some(StartReviewBlock {
                    on_day: Value::Known(0),
                    when: Value::Null,
                }),
                ..Default::default()
            },
            ReviewerLevelBlock {
                kind: Value::from("GROUP"),
                reviewer_group_id: Value::from("00g1"),
                start_review: Some(StartReviewBlock {
                    on_day: Value::Known(3),
                    when: Value::from("ALL_LAST_LEVEL_REVIEWS_COMPLETE"),
                }),
                ..Default::default()
            },
        ],
        ..Default::default()
    });
    state
}

#[test]
fn multi_level_reviewer_builds_every_level() {
    let body = build_campaign(&multi_level_plan()).expect("build");
    let Reviewer::MultiLevel { reviewer_levels } = &body.reviewer_settings.reviewer else {
        panic!("expected multi level reviewer");
    };
    assert_eq!(reviewer_levels.len(), 2);
    assert_eq!(reviewer_levels[0].reviewer, Reviewer::UserManager);
    assert_eq!(
        reviewer_levels[1].reviewer,
        Reviewer::Group {
            reviewer_group_id: "00g1".into()
        }
    );
}

#[test]
fn multi_level_without_levels_is_rejected() {
    let mut state = multi_level_plan();
    if let Some(reviewers) = state.reviewer_settings.as_mut() {
        reviewers.reviewer_levels.clear();
    }
    assert_eq!(
        validation_path(build_campaign(&state)),
        "reviewer_settings.reviewer_levels"
    );
}

#[test]
fn nested_multi_level_is_rejected() {
    let mut state = multi_level_plan();
    if let Some(reviewers) = state.reviewer_settings.as_mut() {
        reviewers.reviewer_levels[1].kind = Value::from("MULTI_LEVEL");
    }
    assert_eq!(
        validation_path(build_campaign(&state)),
        "reviewer_settings.reviewer_levels[1].type"
    );
}

#[test]
fn levels_require_multi_level_type() {
    let mut state = multi_level_plan();
    if let Some(reviewers) = state.reviewer_settings.as_mut() {
        reviewers.kind = Value::from("USER_MANAGER");
    }
    assert_eq!(
        validation_path(build_campaign(&state)),
        "reviewer_settings.reviewer_levels"
    );
}

#[test]
fn missing_required_block_is_reported() {
    let mut state = plan();
    state.schedule_settings = None;
    assert_eq!(validation_path(build_campaign(&state)), "schedule_settings");
}

#[test]
fn apply_fills_computed_fields_and_defaults_the_type() {
    let mut server = build_campaign(&multi_level_plan()).expect("build");
    server.id = Some("icikc1".into());
    server.status = Some("SCHEDULED".into());
    let mut state = multi_level_plan();
    apply_campaign_to_state(&mut state, &server).expect("apply");

    assert_eq!(state.id, Value::from("icikc1"));
    assert_eq!(state.status, Value::from("SCHEDULED"));
    assert_eq!(state.campaign_type, Value::from("RESOURCE"));
    let reviewers = state.reviewer_settings.as_ref().expect("reviewers");
    assert_eq!(reviewers.reviewer_levels.len(), 2);
    assert_eq!(reviewers.reviewer_levels[1].reviewer_group_id, Value::from("00g1"));
    assert!(reviewers.reviewer_id.is_null());
    let schedule = state.schedule_settings.as_ref().expect("schedule");
    assert_eq!(schedule.start_date, Value::from("2025-01-01T00:00:00Z"));

    let mut rebuilt = build_campaign(&state).expect("rebuild");
    rebuilt.status = server.status.clone();
    rebuilt.campaign_type = None;
    assert_eq!(rebuilt, server);
}

#[test]
fn apply_leaves_other_scope_flags_null() {
    let mut state = plan();
    if let Some(resources) = state.resource_settings.as_mut() {
        resources.kind = Value::from("GROUP");
        resources.include_entitlements = Value::Null;
        resources.individually_assigned_groups_only = Value::Known(true);
    }
    let server = build_campaign(&state).expect("build");
    apply_campaign_to_state(&mut state, &server).expect("apply");
    let resources = state.resource_settings.as_ref().expect("resources");
    assert_eq!(resources.kind, Value::from("GROUP"));
    assert!(resources.include_admin_roles.is_null());
    assert_eq!(resources.individually_assigned_groups_only, Value::Known(true));
}

#[tokio::test]
async fn unconfigured_create_validates_first() {
    let resource = CampaignResource::default();
    let mut invalid = plan();
    invalid.name = Value::from("");
    let response = resource.create(invalid).await;
    let errors: Vec<_> = response.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].summary, "Invalid Attribute Value");

    let response = resource.create(plan()).await;
    let errors: Vec<_> = response.diagnostics.errors().collect();
    assert_eq!(errors[0].summary, "Unconfigured Governance Client");
}
