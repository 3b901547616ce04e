use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::{RequestSettings, RequestSettingsPatchable};

impl GovernanceClient {
    pub async fn get_request_settings(&self, resource_id: &str) -> Result<RequestSettings, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, "request-settings"],
        )?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    pub async fn patch_request_settings(
        &self,
        resource_id: &str,
        patch: &RequestSettingsPatchable,
    ) -> Result<RequestSettings, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, "request-settings"],
        )?;
        let resp = self.send(self.http.patch(url).json(patch)).await?;
        self.expect_json(resp).await
    }
}
