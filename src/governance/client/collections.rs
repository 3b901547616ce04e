use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::{CollectionResource, CollectionResourceCreatable, CollectionResourcePatchable};

impl GovernanceClient {
    /// Adds a batch of resources to a collection; the response lists them in
    /// request order.
    pub async fn add_collection_resources(
        &self,
        collection_id: &str,
        resources: &[CollectionResourceCreatable],
    ) -> Result<Vec<CollectionResource>, Error> {
        let url = self.build_url(ApiVersion::V1, &["collections", collection_id, "resources"])?;
        let resp = self.send(self.http.post(url).json(resources)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_collection_resource(
        &self,
        collection_id: &str,
        resource_id: &str,
    ) -> Result<CollectionResource, Error> {
        let url = self.build_url(
            ApiVersion::V1,
            &["collections", collection_id, "resources", resource_id],
        )?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    pub async fn replace_collection_resource(
        &self,
        collection_id: &str,
        resource_id: &str,
        patch: &CollectionResourcePatchable,
    ) -> Result<CollectionResource, Error> {
        let url = self.build_url(
            ApiVersion::V1,
            &["collections", collection_id, "resources", resource_id],
        )?;
        let resp = self.send(self.http.put(url).json(patch)).await?;
        self.expect_json(resp).await
    }

    pub async fn remove_collection_resource(
        &self,
        collection_id: &str,
        resource_id: &str,
    ) -> Result<(), Error> {
        let url = self.build_url(
            ApiVersion::V1,
            &["collections", collection_id, "resources", resource_id],
        )?;
        let resp = self.send(self.http.delete(url)).await?;
        self.expect_empty(resp).await
    }
}
