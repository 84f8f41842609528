//! Project context
//!
//! The resolved, validated configuration of one project, handed to every
//! component that needs it instead of living in global state.

use std::path::PathBuf;

/// Everything a publish or listing needs to know about the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Project name, also the gateway display name
    pub name: String,
    /// Project root (holds `gantry.toml`, `cmd/`, `bin/`)
    pub root: PathBuf,
    /// Provider region
    pub region: String,
    /// Execution role; only required when a compute unit must be created
    pub role: Option<String>,
    /// Runtime identifier for new compute units
    pub runtime: String,
    /// Handler / archive entry name override
    pub handler: Option<String>,
    /// Gateway stage used when building invoke URLs
    pub stage: String,
}

impl ProjectContext {
    pub const DEFAULT_RUNTIME: &'static str = "provided.al2023";
    pub const DEFAULT_STAGE: &'static str = "default";
    /// Entry point every `provided*` custom runtime executes
    pub const CUSTOM_RUNTIME_ENTRY: &'static str = "bootstrap";

    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            region: region.into(),
            role: None,
            runtime: Self::DEFAULT_RUNTIME.to_string(),
            handler: None,
            stage: Self::DEFAULT_STAGE.to_string(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Handler (and archive entry) name for a function: the override, else
    /// `bootstrap` on custom runtimes, else the function name
    pub fn handler_for<'a>(&'a self, function: &'a str) -> &'a str {
        match self.handler.as_deref() {
            Some(handler) => handler,
            None if self.runtime.starts_with("provided") => Self::CUSTOM_RUNTIME_ENTRY,
            None => function,
        }
    }
}
