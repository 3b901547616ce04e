use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::RequestSequence;

impl GovernanceClient {
    pub async fn get_request_sequence(
        &self,
        resource_id: &str,
        sequence_id: &str,
    ) -> Result<RequestSequence, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, "request-sequences", sequence_id],
        )?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    pub async fn delete_request_sequence(
        &self,
        resource_id: &str,
        sequence_id: &str,
    ) -> Result<(), Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, "request-sequences", sequence_id],
        )?;
        let resp = self.send(self.http.delete(url)).await?;
        self.expect_empty(resp).await
    }
}
