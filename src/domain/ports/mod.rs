//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod function_repository;
pub mod packager;
pub mod provider;
pub mod publish_events;
pub mod publish_journal;

pub use function_repository::FunctionRepository;
pub use packager::{Archive, PackageError, Packager};
pub use provider::{
    Authorization, BackendKind, BackendWiring, ComputeService, ComputeUnit, ComputeUnitSpec,
    GatewaySummary, Page, ProviderError, ProviderResult, RoutingNode, RoutingService, VerbBinding,
};
pub use publish_events::{NoopEventSink, PublishEvent, PublishEventSink};
pub use publish_journal::{JournalError, JournalResult, PublishJournal};
