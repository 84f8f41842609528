//! Console Event Sink
//!
//! Human-readable publish progress. Icons fall back to ASCII when stdout is
//! not a terminal or the terminal cannot render unicode.

use std::io::{self, Write};
use std::sync::Mutex;

use is_terminal::IsTerminal;

use crate::domain::ports::{PublishEvent, PublishEventSink};

/// Status glyphs used in human output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSet {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub progress: &'static str,
    pub arrow: &'static str,
}

impl IconSet {
    pub const UNICODE: IconSet = IconSet {
        success: "✓",
        error: "✗",
        warning: "⚠",
        progress: "●",
        arrow: "↳",
    };

    pub const ASCII: IconSet = IconSet {
        success: "[OK]",
        error: "[FAIL]",
        warning: "[WARN]",
        progress: "[..]",
        arrow: "->",
    };

    /// Pick the set that suits stdout
    pub fn detect() -> Self {
        let dumb = std::env::var("TERM")
            .map(|t| t.eq_ignore_ascii_case("dumb"))
            .unwrap_or(false);
        if io::stdout().is_terminal() && !dumb {
            Self::UNICODE
        } else {
            Self::ASCII
        }
    }
}

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    icons: IconSet,
    verbose: bool,
}

impl ConsoleEventSink {
    pub fn stdout(verbose: bool) -> Self {
        Self::with_writer(io::stdout(), IconSet::detect(), verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, icons: IconSet, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            icons,
            verbose,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

impl PublishEventSink for ConsoleEventSink {
    fn on_event(&self, event: PublishEvent) {
        let icons = self.icons;
        match event {
            PublishEvent::Started {
                project,
                function_count,
            } => self.line(format!(
                "Publishing {} function(s) in {}",
                function_count, project
            )),
            PublishEvent::FunctionStarted { function, method } => {
                self.line(format!("{} {} ({})", icons.progress, function, method))
            }
            PublishEvent::PathChosen { path, .. } => {
                self.line(format!("  {} {}", icons.arrow, path))
            }
            PublishEvent::Packaged { bytes, sha256, .. } if self.verbose => self.line(format!(
                "  {} packaged {} bytes (sha256 {})",
                icons.arrow,
                bytes,
                &sha256[..sha256.len().min(12)]
            )),
            PublishEvent::StageCompleted { stage, .. } if self.verbose => {
                self.line(format!("  {} {}", icons.arrow, stage))
            }
            PublishEvent::FunctionPublished { function, outcome } => {
                let text = match outcome.url() {
                    Some(url) => format!(
                        "{} {} {} {}",
                        icons.success,
                        function,
                        outcome.label(),
                        url
                    ),
                    None => format!("{} {} {}", icons.success, function, outcome.label()),
                };
                self.line(text)
            }
            PublishEvent::FunctionFailed { function, error } => {
                self.line(format!("{} {}: {}", icons.error, function, error))
            }
            PublishEvent::Completed { published, failed } => {
                self.line(format!("Published {}, failed {}", published, failed))
            }
            PublishEvent::Packaged { .. } | PublishEvent::StageCompleted { .. } => {}
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}
