//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --project) are inherited by all subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::HttpMethod;

/// gantry - publish serverless functions behind an HTTP gateway
#[derive(Parser, Debug)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root holding gantry.toml, cmd/ and bin/
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update compute units and their HTTP routes
    Publish {
        /// Functions to publish (default: all functions under cmd/)
        names: Vec<String>,

        /// Publish every function under cmd/
        #[arg(long, conflicts_with = "names")]
        all: bool,

        /// HTTP method for every published function
        #[arg(long, value_enum, ignore_case = true)]
        method: Option<HttpMethod>,

        /// Exit non-zero if any function fails
        #[arg(long)]
        strict: bool,
    },

    /// List functions and their invoke URLs
    List {
        /// List functions found under cmd/ (default)
        #[arg(long, conflicts_with = "remote")]
        local: bool,

        /// List routes published on the project gateway
        #[arg(long)]
        remote: bool,
    },
}
