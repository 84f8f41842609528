//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod http_method;
mod ids;
mod lookup;
mod project_context;

pub use http_method::{HttpMethod, InvalidHttpMethod};
pub use ids::{ComputeArn, GatewayId, NodeId};
pub use lookup::{Lookup, LookupError, LookupKind};
pub use project_context::ProjectContext;
