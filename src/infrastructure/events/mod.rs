//! Event Sink Implementations
//!
//! Provides concrete implementations of PublishEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: Human-readable progress

mod console;
mod json;

pub use console::{ConsoleEventSink, IconSet};
pub use json::JsonEventSink;
