//! Reconciliation engine: the host-facing side of the crate.

pub mod contract;
pub mod convert;
pub mod diagnostics;
pub mod registry;
pub mod resources;
pub mod schema;
pub mod value;

pub use contract::{parse_import_id, Resource, Response, Verb};
pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, Severity};
pub use registry::GovernanceProvider;
pub use schema::{Attribute, AttributeKind, AttributeMode, Block, Nesting, Schema, Validator};
pub use value::Value;
