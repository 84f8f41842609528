//! FunctionRepository port - discovers the project's local functions

use anyhow::Result;

use crate::domain::entities::Function;

pub trait FunctionRepository {
    /// All local functions, sorted by name
    fn list(&self) -> Result<Vec<Function>>;

    /// A single function by name
    fn get(&self, name: &str) -> Result<Function>;
}

impl<T: FunctionRepository + ?Sized> FunctionRepository for &T {
    fn list(&self) -> Result<Vec<Function>> {
        (**self).list()
    }

    fn get(&self, name: &str) -> Result<Function> {
        (**self).get(name)
    }
}
