//! Function entity - a locally built function that can be published

use std::path::{Path, PathBuf};

use crate::domain::value_objects::HttpMethod;

/// A function discovered in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Name, unique within the project; also the compute unit name
    /// and the routing path part
    pub name: String,
    /// Path of the compiled binary
    pub binary_path: PathBuf,
    /// Method the function is exposed under
    pub method: HttpMethod,
}

impl Function {
    pub fn new(name: impl Into<String>, binary_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            binary_path: binary_path.into(),
            method: HttpMethod::default(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}
