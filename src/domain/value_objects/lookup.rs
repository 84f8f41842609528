//! Lookup outcome
//!
//! Every remote inventory query answers with one of three tags. Absence is a
//! legitimate answer, not an error, and a failed query is never absence.

use std::fmt;

use thiserror::Error;

use crate::domain::ports::ProviderError;

/// Kind of remote entity a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Gateway,
    RoutingNode,
    VerbBinding,
    ComputeUnit,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Gateway => "gateway",
            LookupKind::RoutingNode => "routing node",
            LookupKind::VerbBinding => "verb binding",
            LookupKind::ComputeUnit => "compute unit",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lookup failed for a reason other than absence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} lookup for '{key}' failed: {source}")]
pub struct LookupError {
    pub kind: LookupKind,
    pub key: String,
    #[source]
    pub source: ProviderError,
}

/// Tagged result of a remote inventory query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Failed(LookupError),
}

impl<T> Lookup<T> {
    /// Classify a provider response: `NotFound` errors become absence,
    /// every other error stays an error.
    pub fn from_provider(
        kind: LookupKind,
        key: impl Into<String>,
        result: Result<T, ProviderError>,
    ) -> Self {
        match result {
            Ok(value) => Lookup::Found(value),
            Err(ProviderError::NotFound { .. }) => Lookup::NotFound,
            Err(source) => Lookup::Failed(LookupError {
                kind,
                key: key.into(),
                source,
            }),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Failed(err) => Lookup::Failed(err),
        }
    }

    /// Collapse into `Result<Option<T>>` so callers can use `?`
    pub fn into_result(self) -> Result<Option<T>, LookupError> {
        match self {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::NotFound => Ok(None),
            Lookup::Failed(err) => Err(err),
        }
    }
}
