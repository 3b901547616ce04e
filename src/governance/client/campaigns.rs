use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::Campaign;

impl GovernanceClient {
    /// Creates a campaign. The server assigns the id and fills audit fields.
    pub async fn create_campaign(&self, campaign: &Campaign) -> Result<Campaign, Error> {
        let url = self.build_url(ApiVersion::V1, &["campaigns"])?;
        let resp = self.send(self.http.post(url).json(campaign)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign, Error> {
        let url = self.build_url(ApiVersion::V1, &["campaigns", campaign_id])?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    /// Replaces the full campaign definition.
    pub async fn replace_campaign(
        &self,
        campaign_id: &str,
        campaign: &Campaign,
    ) -> Result<Campaign, Error> {
        let url = self.build_url(ApiVersion::V1, &["campaigns", campaign_id])?;
        let resp = self.send(self.http.put(url).json(campaign)).await?;
        self.expect_json(resp).await
    }

    pub async fn delete_campaign(&self, campaign_id: &str) -> Result<(), Error> {
        let url = self.build_url(ApiVersion::V1, &["campaigns", campaign_id])?;
        let resp = self.send(self.http.delete(url)).await?;
        self.expect_empty(resp).await
    }

    /// Launches a scheduled campaign immediately.
    pub async fn launch_campaign(&self, campaign_id: &str) -> Result<(), Error> {
        let url = self.build_url(ApiVersion::V1, &["campaigns", campaign_id, "launch"])?;
        let resp = self.send(self.http.post(url)).await?;
        self.expect_empty(resp).await
    }

    /// Ends a launched campaign.
    pub async fn end_campaign(&self, campaign_id: &str) -> Result<(), Error> {
        let url = self.build_url(ApiVersion::V1, &["campaigns", campaign_id, "end"])?;
        let resp = self.send(self.http.post(url)).await?;
        self.expect_empty(resp).await
    }
}
