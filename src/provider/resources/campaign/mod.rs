//! Access certification campaigns.
//!
//! Create posts the full payload, Update replaces it with a PUT. Delete
//! treats an already removed campaign as success.

mod state;
mod translate;

#[cfg(test)]
mod tests;

pub use state::{
    campaign_schema, AutoRemediationBlock, CampaignState, InactiveUsersBlock, NotificationBlock,
    PrincipalScopeBlock, RecurrenceBlock, RemediationBlock, ResourceSettingsBlock,
    ReviewerLevelBlock, ReviewerSettingsBlock, ScheduleBlock, StartReviewBlock,
    TargetEntitlementBlock, TargetResourceBlock, TypedRefBlock,
};
pub use translate::{apply_campaign_to_state, build_campaign};

use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::provider::contract::{require_client, Resource, Response, Verb};
use crate::provider::convert::required_str;
use crate::provider::schema::Schema;
use crate::provider::value::Value;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

const ENTITY: &str = "Campaign";

#[derive(Debug, Default)]
pub struct CampaignResource {
    client: Option<Arc<GovernanceClient>>,
}

impl CampaignResource {
    pub fn new(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn create_campaign(&self, mut plan: CampaignState) -> Result<CampaignState, Error> {
        let body = build_campaign(&plan)?;
        let client = require_client(&self.client)?;
        debug!("creating campaign {}", body.name);
        let campaign = client.create_campaign(&body).await?;
        apply_campaign_to_state(&mut plan, &campaign)?;
        Ok(plan)
    }

    async fn read_campaign(&self, mut prior: CampaignState) -> Result<CampaignState, Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("reading campaign {id}");
        let campaign = client.get_campaign(&id).await?;
        apply_campaign_to_state(&mut prior, &campaign)?;
        Ok(prior)
    }

    async fn update_campaign(&self, prior: CampaignState, mut plan: CampaignState) -> Result<CampaignState, Error> {
        let id = required_str("id", &prior.id)?;
        plan.id = Value::Known(id.clone());
        let body = build_campaign(&plan)?;
        let client = require_client(&self.client)?;
        debug!("replacing campaign {id}");
        let campaign = client.replace_campaign(&id, &body).await?;
        apply_campaign_to_state(&mut plan, &campaign)?;
        Ok(plan)
    }

    async fn delete_campaign(&self, prior: &CampaignState) -> Result<(), Error> {
        let client = require_client(&self.client)?;
        let id = required_str("id", &prior.id)?;
        debug!("deleting campaign {id}");
        match client.delete_campaign(&id).await {
            Err(err) if err.is_not_found() => {
                info!("campaign {id} was already deleted");
                Ok(())
            }
            other => other,
        }
    }
}

#[async_trait]
impl Resource for CampaignResource {
    type State = CampaignState;

    fn type_name_suffix(&self) -> &'static str {
        "campaign"
    }

    fn schema(&self) -> Schema {
        campaign_schema()
    }

    fn configure(&mut self, client: Option<Arc<GovernanceClient>>) {
        self.client = client;
    }

    async fn create(&self, plan: CampaignState) -> Response<CampaignState> {
        Response::from_result(Verb::Creating, ENTITY, self.create_campaign(plan).await)
    }

    async fn read(&self, prior: CampaignState) -> Response<CampaignState> {
        let id = prior.id.as_str().unwrap_or_default().to_string();
        Response::from_read(ENTITY, &id, self.read_campaign(prior).await)
    }

    async fn update(&self, prior: CampaignState, plan: CampaignState) -> Response<CampaignState> {
        Response::from_result(Verb::Updating, ENTITY, self.update_campaign(prior, plan).await)
    }

    async fn delete(&self, prior: CampaignState) -> Response<CampaignState> {
        Response::from_delete(ENTITY, self.delete_campaign(&prior).await)
    }

    fn import_state(&self, id: &str) -> Response<CampaignState> {
        Response::ok(CampaignState {
            id: Value::known(id),
            ..Default::default()
        })
    }
}
