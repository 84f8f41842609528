//! Publish errors

use thiserror::Error;

use crate::domain::entities::PublishStage;
use crate::domain::ports::{PackageError, ProviderError};
use crate::domain::services::{ReconcileError, ReconcileStep};
use crate::domain::value_objects::LookupError;
use crate::error::ConfigError;

/// Why a single function failed to publish
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The existence probe failed; nothing was written
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error("cannot {operation} compute unit '{function}': {source}")]
    Compute {
        operation: &'static str,
        function: String,
        #[source]
        source: ProviderError,
    },

    /// Creation raced with another publish
    #[error("compute unit '{function}' already exists; re-run to update it")]
    Conflict { function: String },

    /// Routing failed after the compute unit was created. The unit is kept
    /// and the progress journaled.
    #[error("'{function}' partially published (last completed: {completed}): {source}")]
    Partial {
        function: String,
        completed: PublishStage,
        #[source]
        source: ReconcileError,
    },
}

impl PublishError {
    pub fn is_config(&self) -> bool {
        matches!(self, PublishError::Config(_))
    }

    /// Routing step that failed, for partial publishes
    pub fn failed_step(&self) -> Option<ReconcileStep> {
        match self {
            PublishError::Partial { source, .. } => Some(source.step()),
            _ => None,
        }
    }
}
