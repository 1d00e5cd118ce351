//! labform CLI.

use clap::Parser;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command};
use crate::commands::{print_report, run_schema, run_validate};
use crate::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Command::Validate(args) => {
            match run_validate(&args).and_then(|report| {
                print_report(&report, args.format)?;
                Ok(report.valid)
            }) {
                Ok(true) => 0,
                Ok(false) => 1,
                Err(error) => {
                    eprintln!("error: {:#}", error);
                    2
                }
            }
        }
        Command::Schema => {
            run_schema();
            0
        }
    };
    std::process::exit(exit_code);
}
