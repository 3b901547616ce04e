//! One controller per governance entity.
//!
//! Each module owns its state type, schema, translation functions and the
//! [`Resource`](crate::provider::Resource) implementation.

pub mod campaign;
pub mod collection_resource;
pub mod end_user_my_requests;
pub mod entitlement;
pub mod entitlement_bundle;
pub mod request_condition;
pub mod request_sequence;
pub mod request_setting_resource;
pub mod request_v2;
pub mod review;
pub mod risk_rule;

pub use campaign::{CampaignResource, CampaignState};
pub use collection_resource::{CollectionResourceResource, CollectionResourceState};
pub use end_user_my_requests::{EndUserMyRequestsResource, MyRequestState};
pub use entitlement::{EntitlementResource, EntitlementState};
pub use entitlement_bundle::{EntitlementBundleResource, EntitlementBundleState};
pub use request_condition::{RequestConditionResource, RequestConditionState};
pub use request_sequence::{RequestSequenceResource, RequestSequenceState};
pub use request_setting_resource::{RequestSettingResource, RequestSettingState};
pub use request_v2::{RequestV2Resource, RequestV2State};
pub use review::{ReviewResource, ReviewState};
pub use risk_rule::{RiskRuleResource, RiskRuleState};
