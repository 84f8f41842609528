//! Publish Options

use crate::domain::value_objects::HttpMethod;

/// Options for the publish use case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Method for every function in the batch, overriding their declared one
    pub method: Option<HttpMethod>,
    /// Any failed function makes the batch fail
    pub strict: bool,
}

impl PublishOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
