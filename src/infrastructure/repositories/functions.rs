//! File System Function Repository
//!
//! Discovers functions as the subdirectories of `<project>/cmd/`. Each
//! function's compiled binary is expected at `<project>/bin/<name>`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::entities::Function;
use crate::domain::ports::FunctionRepository;
use crate::domain::value_objects::HttpMethod;
use crate::error::GantryError;

pub const SOURCE_DIR: &str = "cmd";
pub const BINARY_DIR: &str = "bin";

pub struct FsFunctionRepository {
    root: PathBuf,
    methods: BTreeMap<String, HttpMethod>,
}

impl FsFunctionRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Per-function method overrides; functions not listed keep `GET`
    pub fn with_methods(mut self, methods: BTreeMap<String, HttpMethod>) -> Self {
        self.methods = methods;
        self
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    fn function(&self, name: &str) -> Function {
        let function = Function::new(name, self.root.join(BINARY_DIR).join(name));
        match self.methods.get(name) {
            Some(method) => function.with_method(*method),
            None => function,
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

impl FunctionRepository for FsFunctionRepository {
    fn list(&self) -> Result<Vec<Function>> {
        let dir = self.source_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if !path.is_dir() || is_hidden(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names.iter().map(|name| self.function(name)).collect())
    }

    fn get(&self, name: &str) -> Result<Function> {
        let dir = self.source_dir();
        if !dir.join(name).is_dir() {
            return Err(GantryError::FunctionNotFound {
                name: name.to_string(),
                dir,
            }
            .into());
        }
        Ok(self.function(name))
    }
}
