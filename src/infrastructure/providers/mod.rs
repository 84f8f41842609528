//! Provider implementations
//!
//! - `memory` - in-process provider with call recording and failure injection
//! - `aws` - Lambda + API Gateway (feature `aws`)

#[cfg(feature = "aws")]
pub mod aws;
pub mod memory;

#[cfg(feature = "aws")]
pub use aws::AwsCloud;
pub use memory::{InMemoryCloud, ProviderCall};
