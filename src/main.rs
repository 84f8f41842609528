//! gantry CLI - publish serverless functions behind an HTTP gateway
//!
//! Usage: gantry [--json] [-v...] [--project DIR] <COMMAND>
//!
//! Commands:
//!   publish  Create or update compute units and their HTTP routes
//!   list     List functions and their invoke URLs

mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gantry::presentation::cli::{Cli, Commands};
use gantry::presentation::output::{render_error, OutputFormat};

use commands::publish::PublishArgs;

/// Logs go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "gantry=debug,warn",
        _ => "gantry=trace,info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = OutputFormat::from_flag(cli.json);

    let result = match cli.command {
        Commands::Publish {
            names,
            all,
            method,
            strict,
        } => commands::publish::run(
            &cli.project,
            PublishArgs {
                names,
                all,
                method,
                strict,
            },
            cli.json,
            cli.verbose,
        ),
        Commands::List { remote, .. } => commands::list::run(&cli.project, remote, cli.json),
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            match format {
                OutputFormat::Json => println!("{}", render_error(&err, format)),
                OutputFormat::Text => eprintln!("{}", render_error(&err, format)),
            }
            ExitCode::FAILURE
        }
    }
}
