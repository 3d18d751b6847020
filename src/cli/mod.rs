//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{command, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a NetCDF file for missing and out-of-range values
    Validate {
        /// NetCDF file to check
        #[arg(default_value = "data_for_task.nc")]
        file: PathBuf,
        /// TOML file replacing or adding variable ranges
        #[arg(long)]
        thresholds: Option<PathBuf>,
    },
    /// Print the retrieval requests for one day of data around a location
    Plan {
        /// Day to retrieve (YYYY-MM-DD)
        #[arg(long, default_value = "2024-07-15")]
        date: NaiveDate,
        /// Latitude of the box centre
        #[arg(long, default_value_t = 31.78, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the box centre
        #[arg(long, default_value_t = 35.22, allow_negative_numbers = true)]
        lon: f64,
        /// Location label used in target file names
        #[arg(long, default_value = "jerusalem")]
        location: String,
        /// Variable to retrieve, repeatable (defaults to the surface set)
        #[arg(long = "variable")]
        variables: Vec<String>,
        /// Directory the files would be saved to (defaults to home)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

// -- Tests -------------------------------------------------------------------
