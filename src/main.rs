//! Broadband Compare - command line front end
//!
//! Compares a location's broadband speeds with the national averages of a CSV dataset.

mod cli;

use clap::Parser;
use cli::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", cli::describe(&err));
            ExitCode::from(cli::exit_status(&err))
        }
    }
}
