//! Provider-level registration of every governance controller.

use crate::config::ProviderConfig;
use crate::error::Error;
use crate::governance::GovernanceClient;
use crate::provider::contract::{error_diagnostics, Resource, Verb};
use crate::provider::diagnostics::Diagnostics;
use crate::provider::resources::{
    CampaignResource, CollectionResourceResource, EndUserMyRequestsResource, EntitlementBundleResource,
    EntitlementResource, RequestConditionResource, RequestSequenceResource, RequestSettingResource,
    RequestV2Resource, ReviewResource, RiskRuleResource,
};
use crate::provider::schema::Schema;
use log::{info, warn};
use std::sync::Arc;

/// Owns the shared client and hands configured controllers to the host.
#[derive(Debug, Default, Clone)]
pub struct GovernanceProvider {
    client: Option<Arc<GovernanceClient>>,
}

impl GovernanceProvider {
    /// Prefix of every resource type name.
    pub const TYPE_NAME: &'static str = "okta";

    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already built client, for example one pointed at a test server.
    pub fn with_client(client: Arc<GovernanceClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Builds the shared client from the resolved provider block.
    ///
    /// On failure the provider stays unconfigured and every controller
    /// reports an unconfigured client.
    pub fn configure(&mut self, config: &ProviderConfig) -> Diagnostics {
        match self.try_configure(config) {
            Ok(()) => Diagnostics::new(),
            Err(err) => {
                warn!("provider configuration failed: {err}");
                self.client = None;
                let mut diagnostics = Diagnostics::new();
                diagnostics.add_error("Unable to Configure Provider", err.to_string());
                diagnostics
            }
        }
    }

    fn try_configure(&mut self, config: &ProviderConfig) -> Result<(), Error> {
        let client = config.build_client()?;
        info!("configured governance client for {}", client.base_url());
        self.client = Some(Arc::new(client));
        Ok(())
    }

    pub fn client(&self) -> Option<&Arc<GovernanceClient>> {
        self.client.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Returns a controller wired to the shared client.
    pub fn resource<R: Resource + Default>(&self) -> R {
        let mut resource = R::default();
        resource.configure(self.client.clone());
        resource
    }

    pub fn resource_type_names(&self) -> Vec<String> {
        self.schemas().into_iter().map(|(name, _)| name).collect()
    }

    /// `(type_name, schema)` for every registered controller.
    pub fn schemas(&self) -> Vec<(String, Schema)> {
        vec![
            entry(&CampaignResource::default()),
            entry(&EntitlementResource::default()),
            entry(&EntitlementBundleResource::default()),
            entry(&RequestConditionResource::default()),
            entry(&RequestSettingResource::default()),
            entry(&RequestSequenceResource::default()),
            entry(&RequestV2Resource::default()),
            entry(&ReviewResource::default()),
            entry(&RiskRuleResource::default()),
            entry(&CollectionResourceResource::default()),
            entry(&EndUserMyRequestsResource::default()),
        ]
    }

    pub fn schema(&self, type_name: &str) -> Option<Schema> {
        self.schemas()
            .into_iter()
            .find(|(name, _)| name == type_name)
            .map(|(_, schema)| schema)
    }

    /// Diagnostics for a host request that names an unregistered type.
    pub fn unknown_type(&self, verb: Verb, type_name: &str) -> Diagnostics {
        error_diagnostics(
            verb,
            type_name,
            &Error::Config(format!("config error: unknown resource type {type_name:?}")),
        )
    }
}

fn entry<R: Resource>(resource: &R) -> (String, Schema) {
    (
        resource.metadata(GovernanceProvider::TYPE_NAME),
        resource.schema(),
    )
}
