//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "labform",
    version,
    about = "Validate investigation records against their form-layout rules",
    long_about = "Validate a batch of investigation (lab-test) records before submission.\n\n\
                  Checks mandatory fields, minimum length, numeric range, exact length\n\
                  and unit selection, and reports each record's annotations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a batch file (YAML or JSON).
    Validate(ValidateArgs),

    /// Print the JSON Schema batch files must match.
    Schema,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the batch file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validate as a lab technician (overrides the batch file).
    #[arg(long = "lab-technician")]
    pub lab_technician: bool,

    /// Run in community mode (overrides the config file).
    #[arg(long)]
    pub community: bool,

    /// Validator configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
