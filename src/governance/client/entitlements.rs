use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::{Entitlement, EntitlementBundle};

impl GovernanceClient {
    pub async fn create_entitlement(&self, entitlement: &Entitlement) -> Result<Entitlement, Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlements"])?;
        let resp = self.send(self.http.post(url).json(entitlement)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_entitlement(&self, entitlement_id: &str) -> Result<Entitlement, Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlements", entitlement_id])?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    /// Replaces an entitlement. Values without an id are created; values
    /// omitted from the body are removed.
    pub async fn replace_entitlement(
        &self,
        entitlement_id: &str,
        entitlement: &Entitlement,
    ) -> Result<Entitlement, Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlements", entitlement_id])?;
        let resp = self.send(self.http.put(url).json(entitlement)).await?;
        self.expect_json(resp).await
    }

    pub async fn delete_entitlement(&self, entitlement_id: &str) -> Result<(), Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlements", entitlement_id])?;
        let resp = self.send(self.http.delete(url)).await?;
        self.expect_empty(resp).await
    }

    pub async fn create_entitlement_bundle(
        &self,
        bundle: &EntitlementBundle,
    ) -> Result<EntitlementBundle, Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlement-bundles"])?;
        let resp = self.send(self.http.post(url).json(bundle)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_entitlement_bundle(&self, bundle_id: &str) -> Result<EntitlementBundle, Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlement-bundles", bundle_id])?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    pub async fn replace_entitlement_bundle(
        &self,
        bundle_id: &str,
        bundle: &EntitlementBundle,
    ) -> Result<EntitlementBundle, Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlement-bundles", bundle_id])?;
        let resp = self.send(self.http.put(url).json(bundle)).await?;
        self.expect_json(resp).await
    }

    pub async fn delete_entitlement_bundle(&self, bundle_id: &str) -> Result<(), Error> {
        let url = self.build_url(ApiVersion::V1, &["entitlement-bundles", bundle_id])?;
        let resp = self.send(self.http.delete(url)).await?;
        self.expect_empty(resp).await
    }
}
