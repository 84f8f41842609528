//! Domain Entities
//!
//! Core entities with identity: local functions and the publish state machine.

mod function;
mod publish;

pub use function::Function;
pub use publish::{PublishOutcome, PublishPath, PublishProgress, PublishStage};
