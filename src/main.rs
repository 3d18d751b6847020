mod acquisition;
mod cli;
mod dataset;
mod report;
mod validate;
mod variables;

use std::process::ExitCode;

use acquisition::Location;
use clap::Parser;
use cli::{command, Cli, Commands};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file, thresholds } => command::validate(&file, thresholds.as_deref()),
        Commands::Plan {
            date,
            lat,
            lon,
            location,
            variables,
            output_dir,
        } => command::plan(
            date,
            Location {
                latitude: lat,
                longitude: lon,
            },
            &location,
            variables,
            output_dir,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
