//! Review reassignment. Reassigning is append-only on the remote side, so
//! the resource can be created and read but not changed or undone.

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::models::{Review, ReviewReassignment};
use crate::provider::contract::{require_client, unsupported, Resource, Response, Verb};
use crate::provider::convert::{optional_string, required_str, with_audit_attributes, AuditState};
use crate::provider::schema::{Attribute, AttributeKind, Schema, Validator};
use crate::provider::value::Value;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

const ENTITY: &str = "Review";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewState {
    pub id: Value<String>,
    pub campaign_id: Value<String>,
    pub reviewer_id: Value<String>,
    pub note: Value<String>,
    pub review_ids: Value<Vec<String>>,
    pub reviewer_level: Value<String>,
    pub resource_id: Value<String>,
    pub decision: Value<String>,
    pub reviewer_type: Value<String>,
    pub current_reviewer_level: Value<String>,
    pub audit: AuditState,
}

pub fn review_schema() -> Schema {
    let schema = Schema::new("Reassigns a pending review of a campaign to another reviewer.")
        .attribute(Attribute::id())
        .attribute(Attribute::required("campaign_id", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(Attribute::required("reviewer_id", AttributeKind::String).with_validator(Validator::NonEmpty))
        .attribute(Attribute::required("note", AttributeKind::String))
        .attribute(
            Attribute::required("review_ids", AttributeKind::set_of(AttributeKind::String))
                .with_validator(Validator::SizeAtLeast(1))
                .with_validator(Validator::SizeAtMost(1)),
        )
        .attribute(Attribute::optional("reviewer_level", AttributeKind::String))
        .attribute(Attribute::computed("resource_id", AttributeKind::String))
        .attribute(Attribute::computed("decision", AttributeKind::String))
        .attribute(Attribute::computed("reviewer_type", AttributeKind::String))
        .attribute(Attribute::computed("current_reviewer_level", AttributeKind::String));
    with_audit_attributes(schema)
}

pub fn build_review_reassignment(state: &ReviewState) -> Result<ReviewReassignment, Error> {
    let schema = review_schema();
    let review_ids = state
        .review_ids
        .as_known()
        .cloned()
        .ok_or_else(|| Error::validation("review_ids", "value is required"))?;
    schema.check_len("review_ids", review_ids.len())?;
    if let Some(i) = review_ids.iter().position(String::is_empty) {
        return Err(Error::validation(
            format!("review_ids[{i}]"),
            "review id must not be empty",
        ));
    }
    let campaign_id = required_str("campaign_id", &state.campaign_id)?;
    schema.check_str("campaign_id", &campaign_id)?;
    Ok(ReviewReassignment {
        review_ids,
        reviewer_id: required_str("reviewer_id", &state.reviewer_id)?,
        note: state.note.as_known().cloned().unwrap_or_default(),
        reviewer_level: state.reviewer_level.non_empty_owned(),
    })
}

pub fn apply_review_to_state(state: &mut ReviewState, review: &Review) -> Result<(), Error> {
    state.id = Value::Known(review.id.clone());
    state.campaign_id = Value::Known(review.campaign_id.clone());
    if let Some(profile) = &review.reviewer_profile {
        state.reviewer_id = Value::Known(profile.id.clone());
    }
    if !state.review_ids.is_known() {
        state.review_ids = Value::Known(vec![review.id.clone()]);
    }
    state.resource_id = optional_string(review.resource_id.clone());
    state.decision = optional_string(review.decision.clone());
    state.reviewer_type = optional_string(review.reviewer_type.clone());
    state.current_reviewer_level = optional_string(review.current_reviewer_level.clone());
    state.audit = AuditState::from_audit(&review.audit)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct ReviewResource {
    client: Option<Arc<GovernanceClient>>,
}

impl ReviewResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn reassign(&self, mut plan: ReviewState) -> Result<ReviewState, Error> {
        let body = build_review_reassignment(&plan)?;
        let campaign_id = required_str("campaign_id", &plan.campaign_id)?;
        let client = require_client(&self.client)?;
        debug!(
            "reassigning reviews {:?} of campaign {campaign_id} to {}",
            body.review_ids, body.reviewer_id
        );
        let reviews = client.reassign_reviews(&campaign_id, &body).await?;
        let review = reviews.first().ok_or_else(|| {
            Error::Translation("reassignment response did not contain any review".to_string())
        })?;
        apply_review_to_state(&mut plan, review)?;
        Ok(plan)
    }

    async fn read_review(&self, mut prior: ReviewState) -> Result<ReviewState, Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading review {id}");
        let review = client.get_review(&id).await?;
        apply_review_to_state(&mut prior, &review)?;
        Ok(prior)
    }
}

#[async_trait]
impl Resource for ReviewResource {
    type State = ReviewState;

    fn type_name_suffix(&self) -> &'static str {
        "review"
    }

    fn schema(&self) -> Schema {
        review_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: ReviewState) -> Response<ReviewState> {
        Response::from_result(Verb::Creating, ENTITY, self.reassign(plan).await)
    }

    async fn read(&self, prior: ReviewState) -> Response<ReviewState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_review(prior).await)
    }

    async fn update(&self, prior: ReviewState, _plan: ReviewState) -> Response<ReviewState> {
        unsupported(
            "Update",
            ENTITY,
            "a reassignment cannot be changed; create a new one instead",
            Some(prior),
        )
    }

    async fn delete(&self, _prior: ReviewState) -> Response<ReviewState> {
        unsupported(
            "Delete",
            ENTITY,
            "a reassignment cannot be undone; it is only removed from state",
            None,
        )
    }

    fn import_state(&self, id: &str) -> Response<ReviewState> {
        Response::ok(ReviewState {
            id: Value::known(id),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan() -> ReviewState {
        ReviewState {
            id: Value::Unknown,
            campaign_id: Value::from("icicmp1"),
            reviewer_id: Value::from("00u2"),
            note: Value::from("on leave"),
            review_ids: Value::Known(vec!["icirev1".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn reassignment_body() {
        let body = build_review_reassignment(&plan()).expect("build");
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            json!({"reviewIds": ["icirev1"], "reviewerId": "00u2", "note": "on leave"})
        );
    }

    #[test]
    fn at_most_one_review_id() {
        let mut state = plan();
        state.review_ids = Value::Known(vec!["a".into(), "b".into()]);
        assert!(matches!(
            build_review_reassignment(&state),
            Err(Error::Validation { ref path, .. }) if path == "review_ids"
        ));
        state.review_ids = Value::Known(vec![]);
        assert!(build_review_reassignment(&state).is_err());
    }

    #[test]
    fn apply_takes_reviewer_from_profile() {
        let review: Review = serde_json::from_value(json!({
            "id": "icirev1",
            "campaignId": "icicmp1",
            "decision": "UNREVIEWED",
            "reviewerProfile": {"id": "00u2", "login": "jane@example.com"}
        }))
        .expect("decode");
        let mut state = ReviewState::default();
        apply_review_to_state(&mut state, &review).expect("apply");
        assert_eq!(state.reviewer_id, Value::from("00u2"));
        assert_eq!(state.review_ids, Value::Known(vec!["icirev1".to_string()]));
        assert!(state.resource_id.is_null());
    }
}
