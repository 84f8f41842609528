//! Error types for gantry
//!
//! Library layers return typed `thiserror` errors; the binary wraps them in
//! `anyhow` at the edge.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gantry operations
pub type GantryResult<T> = Result<T, GantryError>;

/// Main error type for gantry operations
#[derive(Error, Debug)]
pub enum GantryError {
    /// Project configuration is missing or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A named function has no directory under `cmd/`
    #[error("function '{name}' not found in {dir}")]
    FunctionNotFound { name: String, dir: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The provider client could not be set up
    #[error("provider initialisation failed: {message}")]
    ProviderInit { message: String },
}

/// Configuration problems; all of them stop work before any remote write
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("project file not found: {path}")]
    Missing { path: PathBuf },

    #[error("invalid project file {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("no region configured (set `region` in gantry.toml or GANTRY_REGION)")]
    MissingRegion,

    /// Creating a compute unit needs an execution role
    #[error("no execution role configured; cannot create '{function}' (set `role` in gantry.toml or GANTRY_ROLE)")]
    MissingRole { function: String },
}
