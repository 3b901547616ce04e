mod client;
pub(crate) mod common;

pub use client::{GovernanceClient, GovernanceClientBuilder};
pub use common::ApiVersion;
