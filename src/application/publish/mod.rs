//! Publish Module
//!
//! Orchestrates publishing local functions as HTTP endpoints.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`PublishOptions`)
//! - `result` - Result types (`PublishReport`, `FunctionReport`)
//! - `error` - Per-function failure (`PublishError`)
//! - `use_case` - Core use case logic (`PublishUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use gantry::application::publish::{PublishOptions, PublishUseCase};
//!
//! let use_case = PublishUseCase::new(context, inventory, packager, journal);
//! let report = use_case.execute(&functions, &PublishOptions::default());
//! ```

mod error;
mod options;
mod result;
mod use_case;

pub use error::PublishError;
pub use options::PublishOptions;
pub use result::{FunctionReport, PublishReport};
pub use use_case::PublishUseCase;
