//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod functions;
mod journal;

pub use functions::{FsFunctionRepository, BINARY_DIR, SOURCE_DIR};
pub use journal::{InMemoryJournal, TomlJournalRepository, JOURNAL_PATH};
