mod campaign;
mod collection;
mod common;
mod entitlement;
mod request;
mod request_condition;
mod request_sequence;
mod request_settings;
mod review;
mod risk_rule;

pub use campaign::{
    AutoRemediationSettings, Campaign, CampaignType, InactiveUsersScope, NotificationSettings,
    PrincipalScopeSettings, Recurrence, RemediationAction, RemediationSettings, ResourceScope,
    ResourceSettings, Reviewer, ReviewerLevel, ReviewerSettings, ScheduleSettings, StartReview,
    TargetEntitlement, TargetResource,
};
pub use collection::{
    CollectionResource, CollectionResourceCreatable, CollectionResourcePatchable,
};
pub use common::{AuditFields, DataList, EntitlementGrant, ExternalRef, IdRef, TypedResourceRef};
pub use entitlement::{Entitlement, EntitlementBundle, EntitlementValue};
pub use request::{
    FieldValue, MyRequestCreatable, Request, RequestCreatable, Requested, RequestedFor,
    RequesterFieldValue,
};
pub use request_condition::{
    AccessDurationSettings, AccessScopeSettings, RequestCondition, RequestConditionCreatable,
    RequestConditionPatchable, RequestConditionStatus, RequesterSettings,
};
pub use request_sequence::RequestSequence;
pub use request_settings::{
    RequestOnBehalfOfSettings, RequestSettings, RequestSettingsPatchable, RiskDefaultSetting,
    RiskDefaultSettingPatchable, RiskSettings, RiskSettingsPatchable, TypeRef,
};
pub use review::{Review, ReviewReassignment, ReviewerProfile};
pub use risk_rule::{
    ConflictCriteria, Criterion, CriterionEntitlement, CriterionValue, RiskRule, RiskRuleResource,
};
