use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::{MyRequestCreatable, Request, RequestCreatable};

impl GovernanceClient {
    /// Submits an access request on behalf of `requested_for`.
    pub async fn create_request(&self, request: &RequestCreatable) -> Result<Request, Error> {
        let url = self.build_url(ApiVersion::V2, &["requests"])?;
        let resp = self.send(self.http.post(url).json(request)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_request(&self, request_id: &str) -> Result<Request, Error> {
        let url = self.build_url(ApiVersion::V2, &["requests", request_id])?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    /// Submits a request for a catalog entry as the calling end user.
    pub async fn create_my_request(
        &self,
        entry_id: &str,
        request: &MyRequestCreatable,
    ) -> Result<Request, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["my", "catalog", "entries", entry_id, "requests"],
        )?;
        let resp = self.send(self.http.post(url).json(request)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_my_request(&self, entry_id: &str, request_id: &str) -> Result<Request, Error> {
        let url = self.build_url(
            ApiVersion::V2,
            &["my", "catalog", "entries", entry_id, "requests", request_id],
        )?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }
}
