#![forbid(unsafe_code)]

mod build_url;
mod client_defaults;
mod config;
mod error;
pub mod governance;
pub mod models;
pub mod provider;

pub use config::ProviderConfig;
pub use error::{ApiError, Error, ErrorCause, ErrorEnvelope};
pub use governance::{ApiVersion, GovernanceClient, GovernanceClientBuilder};
pub use provider::{
    AttributePath, Diagnostic, Diagnostics, GovernanceProvider, Resource, Response, Schema,
    Severity, Value, Verb,
};
