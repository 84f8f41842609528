//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `providers/` - Remote providers (AWS, in-memory)
//! - `repositories/` - Local function discovery and the publish journal
//! - `events/` - Publish event sinks (console, NDJSON)
//! - `packager` - Zip packaging of compiled binaries

pub mod events;
pub mod packager;
pub mod providers;
pub mod repositories;

// Re-export for convenience
pub use events::{ConsoleEventSink, IconSet, JsonEventSink};
pub use packager::ZipPackager;
pub use providers::{InMemoryCloud, ProviderCall};
pub use repositories::{FsFunctionRepository, InMemoryJournal, TomlJournalRepository};
