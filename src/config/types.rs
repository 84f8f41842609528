//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{HttpMethod, ProjectContext};
use crate::error::ConfigError;

/// Per-function settings (`[functions.<name>]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// HTTP method the function is exposed under (case-insensitive)
    #[serde(default)]
    pub method: Option<String>,
}

/// Contents of `gantry.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name; defaults to the project directory name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    /// Execution role for newly created compute units
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub runtime: Option<String>,

    #[serde(default)]
    pub handler: Option<String>,

    #[serde(default)]
    pub stage: Option<String>,

    /// Exit non-zero when any function fails
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub functions: BTreeMap<String, FunctionConfig>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProjectConfig {
    /// Resolve into the context handed to every component.
    ///
    /// Fails only on a missing region; the role is checked later, and only
    /// when a compute unit has to be created.
    pub fn to_context(&self, root: &Path) -> Result<ProjectContext, ConfigError> {
        let region = non_empty(self.region.clone()).ok_or(ConfigError::MissingRegion)?;

        let name = non_empty(self.name.clone())
            .or_else(|| {
                root.file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "gantry".to_string());

        let mut context = ProjectContext::new(name, root, region);
        if let Some(role) = non_empty(self.role.clone()) {
            context = context.with_role(role);
        }
        if let Some(runtime) = non_empty(self.runtime.clone()) {
            context = context.with_runtime(runtime);
        }
        if let Some(handler) = non_empty(self.handler.clone()) {
            context = context.with_handler(handler);
        }
        if let Some(stage) = non_empty(self.stage.clone()) {
            context = context.with_stage(stage);
        }
        Ok(context)
    }

    /// Method overrides declared under `[functions.<name>]`
    pub fn method_overrides(&self, path: &Path) -> Result<BTreeMap<String, HttpMethod>, ConfigError> {
        let mut methods = BTreeMap::new();
        for (name, function) in &self.functions {
            if let Some(method) = &function.method {
                let parsed = method.parse::<HttpMethod>().map_err(|e| ConfigError::Malformed {
                    path: path.to_path_buf(),
                    message: format!("functions.{}.method: {}", name, e),
                })?;
                methods.insert(name.clone(), parsed);
            }
        }
        Ok(methods)
    }
}
