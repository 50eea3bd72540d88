use anyhow::Result;
use clap::{Parser, Subcommand};

mod builtin;
mod commands;

use commands::check::{execute_check, CheckArgs};
use commands::run::{execute_run, RunArgs};

/// Capstan Command Line Interface
///
/// Validate and run capability registries described by configuration files.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check(CheckArgs),

    /// Bootstrap a registry from a configuration file and report its capabilities
    Run(RunArgs),

    /// List the built-in capability types
    Types,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => execute_check(&args),
        Commands::Run(args) => execute_run(&args),
        Commands::Types => {
            for capability_type in builtin::factories().types() {
                println!("{}", capability_type);
            }
            Ok(())
        }
    }
}
