//! Validate a NetCDF file and print the report.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    cli::{create_progress_bar, create_spinner},
    dataset::{self, Dataset},
    report,
    validate::{validate_variable, ReportRow},
    variables::{DefinitionTable, ThresholdTable},
};

pub fn validate(file: &Path, thresholds: Option<&Path>) -> Result<()> {
    let report = run(file, thresholds)?;

    print!("{}", report);
    println!("\n✅ Validation complete");

    Ok(())
}

// Loads, checks and renders; the report depends only on the file and thresholds
fn run(file: &Path, thresholds: Option<&Path>) -> Result<String> {
    let thresholds = load_thresholds(thresholds)?;
    let definitions = DefinitionTable::builtin();

    let spinner = create_spinner(format!("Loading {}...", file.display()));
    let loaded = dataset::open(file);
    spinner.finish_and_clear();

    let dataset = loaded.with_context(|| format!("failed to load `{}`", file.display()))?;
    println!("✅ Dataset loaded successfully");
    info!("{} data variables in `{}`", dataset.len(), file.display());
    if dataset.is_empty() {
        warn!("`{}` contains no data variables", file.display());
    }

    let rows = check_variables(&dataset, &thresholds, &definitions);

    Ok(report::render(&rows))
}

fn load_thresholds(path: Option<&Path>) -> Result<ThresholdTable> {
    let table = ThresholdTable::builtin();

    let table = match path {
        Some(path) => table
            .overlay_file(path)
            .with_context(|| format!("invalid threshold file `{}`", path.display()))?,
        None => table,
    };
    debug!("{} variable ranges configured", table.len());

    Ok(table)
}

// One row per variable in dataset order, warning about variables without a range
fn check_variables(
    dataset: &Dataset,
    thresholds: &ThresholdTable,
    definitions: &DefinitionTable,
) -> Vec<ReportRow> {
    let bar = create_progress_bar(dataset.len() as u64, "Checking variables".to_string());
    let mut rows = Vec::with_capacity(dataset.len());

    for variable in &dataset.variables {
        debug!("checking `{}` {}", variable.name, variable.shape());

        let row = validate_variable(variable, thresholds, definitions);
        if row.range.is_none() {
            bar.suspend(|| println!("{}", missing_range_warning(&row.name)));
        }

        rows.push(row);
        bar.inc(1);
    }
    bar.finish_and_clear();

    rows
}

fn missing_range_warning(name: &str) -> String {
    format!("⚠️ Range for '{}' was not specified, 'out_of_range' set to N/A", name)
}

// -- Tests -------------------------------------------------------------------
