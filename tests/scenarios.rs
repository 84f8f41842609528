//! Scenario tests for gantry.
//!
//! Each scenario runs a real project directory (config, sources, binaries,
//! journal file) through the factory against the in-memory provider.
//!
//! Run with: cargo test --test scenarios

mod common;

#[path = "scenarios/first_publish.rs"]
mod first_publish;

#[path = "scenarios/republish.rs"]
mod republish;

#[path = "scenarios/interrupted_publish.rs"]
mod interrupted_publish;

#[path = "scenarios/listing.rs"]
mod listing;
