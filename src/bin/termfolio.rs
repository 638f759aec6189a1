//! Termfolio CLI Binary
//!
//! Command-line interface for building and browsing virtual filesystem trees.

use clap::Parser;
use std::process;
use termfolio::logging::init_logging;
use termfolio::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let mut context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    context.apply_logging_overrides(&cli);

    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
