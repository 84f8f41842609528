//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PublishUseCase` - Create-or-update each function and its routing
//! - `ListUseCase` - Local or remote function listing with invoke URLs

pub mod list;
pub mod publish;

pub use list::{ListSource, ListUseCase, ListedFunction};
pub use publish::{FunctionReport, PublishError, PublishOptions, PublishReport, PublishUseCase};
