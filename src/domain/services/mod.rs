//! Domain Services
//!
//! - `inventory` - read-only remote lookups
//! - `reconciler` - create-or-reuse per entity kind, and the routing chain
//! - `endpoint` - invoke URL / integration URI formatting

pub mod endpoint;
pub mod inventory;
pub mod reconciler;

pub use endpoint::{integration_uri, invoke_url};
pub use inventory::RemoteInventory;
pub use reconciler::{ReconcileError, ReconcileResult, ReconcileStep, Reconciler};
