use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::{DataList, Review, ReviewReassignment};

impl GovernanceClient {
    /// Reassigns pending reviews of a campaign. There is no inverse call.
    pub async fn reassign_reviews(
        &self,
        campaign_id: &str,
        reassignment: &ReviewReassignment,
    ) -> Result<Vec<Review>, Error> {
        let url = self.build_url(
            ApiVersion::V1,
            &["campaigns", campaign_id, "reviews", "reassign"],
        )?;
        let resp = self.send(self.http.post(url).json(reassignment)).await?;
        let list: DataList<Review> = self.expect_json(resp).await?;
        Ok(list.data)
    }

    pub async fn get_review(&self, review_id: &str) -> Result<Review, Error> {
        let url = self.build_url(ApiVersion::V1, &["reviews", review_id])?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }
}
