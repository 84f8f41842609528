//! Publish Result
//!
//! Result types for publish operations.

use crate::domain::entities::{PublishOutcome, PublishPath};
use crate::domain::value_objects::HttpMethod;

use super::error::PublishError;

/// Outcome of one function in a batch
#[derive(Debug)]
pub struct FunctionReport {
    pub function: String,
    pub method: HttpMethod,
    /// Branch taken; absent when the function failed before deciding
    pub path: Option<PublishPath>,
    pub result: Result<PublishOutcome, PublishError>,
}

impl FunctionReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn outcome(&self) -> Option<&PublishOutcome> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&PublishError> {
        self.result.as_ref().err()
    }
}

/// Result of a publish batch
#[derive(Debug, Default)]
pub struct PublishReport {
    pub project: String,
    pub functions: Vec<FunctionReport>,
    pub strict: bool,
}

impl PublishReport {
    pub fn new(project: impl Into<String>, strict: bool) -> Self {
        Self {
            project: project.into(),
            functions: Vec::new(),
            strict,
        }
    }

    pub fn published(&self) -> usize {
        self.functions.iter().filter(|f| f.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.functions.len() - self.published()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn get(&self, function: &str) -> Option<&FunctionReport> {
        self.functions.iter().find(|f| f.function == function)
    }

    /// Process exit code: failures only count in strict mode
    pub fn exit_code(&self) -> i32 {
        if self.strict && !self.is_success() {
            1
        } else {
            0
        }
    }
}
