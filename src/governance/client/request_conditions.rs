use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::{RequestCondition, RequestConditionCreatable, RequestConditionPatchable};

const CONDITIONS: &str = "request-conditions";

impl GovernanceClient {
    /// Creates a request condition on a resource. New conditions are `INACTIVE`.
    pub async fn create_request_condition(
        &self,
        resource_id: &str,
        condition: &RequestConditionCreatable,
    ) -> Result<RequestCondition, Error> {
        let url = self.build_url(ApiVersion::V2, &["resources", resource_id, CONDITIONS])?;
        let resp = self.send(self.http.post(url).json(condition)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_request_condition(
        &self,
        resource_id: &str,
        condition_id: &str,
    ) -> Result<RequestCondition, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, CONDITIONS, condition_id],
        )?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    pub async fn patch_request_condition(
        &self,
        resource_id: &str,
        condition_id: &str,
        patch: &RequestConditionPatchable,
    ) -> Result<RequestCondition, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, CONDITIONS, condition_id],
        )?;
        let resp = self.send(self.http.patch(url).json(patch)).await?;
        self.expect_json(resp).await
    }

    pub async fn activate_request_condition(
        &self,
        resource_id: &str,
        condition_id: &str,
    ) -> Result<RequestCondition, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, CONDITIONS, condition_id, "activate"],
        )?;
        let resp = self.send(self.http.post(url)).await?;
        self.expect_json(resp).await
    }

    pub async fn deactivate_request_condition(
        &self,
        resource_id: &str,
        condition_id: &str,
    ) -> Result<RequestCondition, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, CONDITIONS, condition_id, "deactivate"],
        )?;
        let resp = self.send(self.http.post(url)).await?;
        self.expect_json(resp).await
    }

    /// Deletes an `INACTIVE` condition. The server rejects deleting active ones.
    pub async fn delete_request_condition(
        &self,
        resource_id: &str,
        condition_id: &str,
    ) -> Result<(), Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["resources", resource_id, CONDITIONS, condition_id],
        )?;
        let resp = self.send(self.http.delete(url)).await?;
        self.expect_empty(resp).await
    }
}
