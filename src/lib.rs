//! gantry - publish serverless functions behind an HTTP gateway
//!
//! For every local function, gantry ensures a compute unit holding its code
//! and the routing that exposes it: a gateway per project, a routing node per
//! function, a verb binding and the backend wiring to the compute unit. Each
//! piece is looked up first and only created when missing, so publishing is
//! safe to repeat.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{ListUseCase, PublishOptions, PublishReport, PublishUseCase};
pub use error::{ConfigError, GantryError, GantryResult};
