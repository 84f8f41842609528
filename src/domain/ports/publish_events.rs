//! Publish Event Port
//!
//! Provides an observable interface for publish operations.
//! Enables progress reporting, JSON event streams, and debugging.

use crate::domain::entities::{PublishOutcome, PublishPath, PublishStage};
use crate::domain::value_objects::HttpMethod;

/// Event emitted during publish operations
#[derive(Debug, Clone)]
pub enum PublishEvent {
    /// Batch started
    Started { project: String, function_count: usize },

    /// A function's pipeline started
    FunctionStarted { function: String, method: HttpMethod },

    /// Create/update decision made
    PathChosen { function: String, path: PublishPath },

    /// Archive built
    Packaged {
        function: String,
        bytes: usize,
        sha256: String,
    },

    /// A publish stage was completed
    StageCompleted { function: String, stage: PublishStage },

    /// Function published
    FunctionPublished {
        function: String,
        outcome: PublishOutcome,
    },

    /// Function pipeline stopped with an error
    FunctionFailed { function: String, error: String },

    /// Batch completed
    Completed { published: usize, failed: usize },
}

/// Trait for receiving publish events
///
/// Implementations can be:
/// - ConsoleEventSink: human-readable progress
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PublishEventSink: Send + Sync {
    /// Handle a publish event
    fn on_event(&self, event: PublishEvent);

    /// Check if this sink wants per-stage events
    ///
    /// Summary-only sinks may return false.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PublishEventSink for NoopEventSink {
    fn on_event(&self, _event: PublishEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
