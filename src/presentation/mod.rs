//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Loads the project and creates use cases (dependency injection)
//! - `output` - Output rendering
//!
//! ## Usage
//!
//! ```ignore
//! use gantry::presentation::factory;
//!
//! let project = factory::load_project(Path::new("."))?;
//! let cloud = factory::connect(&project)?;
//! let report = factory::create_publish_use_case(&project, &cloud)
//!     .execute(&functions, &options);
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use factory::{create_list_use_case, create_publish_use_case, load_project, Project};
