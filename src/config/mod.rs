//! Configuration module for gantry
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GANTRY_*)
//! 3. Project file (`gantry.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_project, load_with_warnings, with_env_overrides, ConfigWarning, CONFIG_FILE,
};
pub use types::{FunctionConfig, ProjectConfig};
