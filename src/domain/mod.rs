//! Domain Layer
//!
//! The reconciliation core: pure logic over provider ports, no direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - Function and the publish state machine
//! - `value_objects/` - HTTP method, remote ids, lookup outcome, project context
//! - `services/` - Remote inventory, reconciler, endpoint formatting
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - remote calls go through `ComputeService` / `RoutingService`
//! 2. **Absence is not failure** - lookups return `Found | NotFound | Failed`
//! 3. **Ports & Adapters** - all I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
