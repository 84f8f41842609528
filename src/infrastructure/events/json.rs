//! JSON Event Sink
//!
//! Outputs publish events as NDJSON for CI/automation consumption.

use crate::domain::entities::PublishPath;
use crate::domain::ports::{PublishEvent, PublishEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PublishEventSink for JsonEventSink {
    fn on_event(&self, event: PublishEvent) {
        let json = match event {
            PublishEvent::Started {
                project,
                function_count,
            } => serde_json::json!({
                "event": "start",
                "command": "publish",
                "project": project,
                "function_count": function_count,
            }),

            PublishEvent::FunctionStarted { function, method } => serde_json::json!({
                "event": "function_start",
                "command": "publish",
                "function": function,
                "method": method.as_str(),
            }),

            PublishEvent::PathChosen { function, path } => {
                let (name, from) = match path {
                    PublishPath::Update => ("update", None),
                    PublishPath::Resume { from } => ("resume", Some(from.as_str())),
                    PublishPath::Create => ("create", None),
                };
                serde_json::json!({
                    "event": "path",
                    "command": "publish",
                    "function": function,
                    "path": name,
                    "from": from,
                })
            }

            PublishEvent::Packaged {
                function,
                bytes,
                sha256,
            } => serde_json::json!({
                "event": "packaged",
                "command": "publish",
                "function": function,
                "bytes": bytes,
                "sha256": sha256,
            }),

            PublishEvent::StageCompleted { function, stage } => serde_json::json!({
                "event": "stage",
                "command": "publish",
                "function": function,
                "stage": stage.as_str(),
            }),

            PublishEvent::FunctionPublished { function, outcome } => serde_json::json!({
                "event": "function_published",
                "command": "publish",
                "function": function,
                "outcome": outcome.label(),
                "arn": outcome.arn().as_str(),
                "url": outcome.url(),
            }),

            PublishEvent::FunctionFailed { function, error } => serde_json::json!({
                "event": "function_failed",
                "command": "publish",
                "function": function,
                "error": error,
            }),

            PublishEvent::Completed { published, failed } => {
                let status = if failed == 0 { "success" } else { "partial" };
                serde_json::json!({
                    "event": "complete",
                    "command": "publish",
                    "status": status,
                    "published": published,
                    "failed": failed,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
