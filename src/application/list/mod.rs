//! List Module
//!
//! Lists the project's functions with their invoke URLs, either from the
//! local `cmd/` tree or from the remote gateway's routing nodes.

mod use_case;

pub use use_case::{ListSource, ListUseCase, ListedFunction};
