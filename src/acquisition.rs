//! Builds the per-variable retrieval requests for ERA5 single-level data.
//!
//! One request is issued per variable so each lands in its own NetCDF file,
//! for a single day of hourly data in a 1°×1° box around a location.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

pub const DATASET: &str = "reanalysis-era5-single-levels";

/// Variables fetched when none are given.
pub fn default_variables() -> Vec<String> {
    [
        "2m_temperature",
        "2m_dewpoint_temperature",
        "surface_pressure",
        "mean_sea_level_pressure",
        "10m_u_component_of_wind",
        "10m_v_component_of_wind",
        "total_precipitation",
    ]
    .iter()
    .map(|v| v.to_string())
    .collect()
}

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("no variables requested")]
    NoVariables,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body understood by the climate data store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalRequest {
    pub product_type: Vec<String>,
    pub variable: Vec<String>,
    pub year: Vec<String>,
    pub month: Vec<String>,
    pub day: Vec<String>,
    pub time: Vec<String>,
    pub data_format: String,
    pub download_format: String,
    /// North, west, south, east.
    pub area: [f64; 4],
}

#[derive(Debug, Clone)]
pub struct Retrieval {
    pub request: RetrievalRequest,
    pub target: PathBuf,
}

/// One retrieval per variable, in the order given.
pub fn plan(
    date: NaiveDate,
    location: Location,
    label: &str,
    variables: &[String],
    output_dir: &Path,
) -> Result<Vec<Retrieval>, PlanError> {
    if variables.is_empty() {
        return Err(PlanError::NoVariables);
    }
    let area = bounding_box(location)?;

    let retrievals = variables
        .iter()
        .map(|variable| Retrieval {
            request: RetrievalRequest {
                product_type: vec!["reanalysis".to_string()],
                variable: vec![variable.clone()],
                year: vec![date.year().to_string()],
                month: vec![format!("{:02}", date.month())],
                day: vec![format!("{:02}", date.day())],
                time: hours(),
                data_format: "netcdf".to_string(),
                download_format: "unarchived".to_string(),
                area,
            },
            target: output_dir.join(target_file_name(label, variable)),
        })
        .collect();

    Ok(retrievals)
}

/// A 1°×1° box centred on the location, clipped to [-90, 90] and [-180, 180].
pub fn bounding_box(location: Location) -> Result<[f64; 4], PlanError> {
    let Location {
        latitude,
        longitude,
    } = location;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(PlanError::Latitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(PlanError::Longitude(longitude));
    }

    Ok([
        round2((latitude + 0.5).min(90.0)),
        round2((longitude - 0.5).max(-180.0)),
        round2((latitude - 0.5).max(-90.0)),
        round2((longitude + 0.5).min(180.0)),
    ])
}

pub fn target_file_name(label: &str, variable: &str) -> String {
    format!("era5_{}_{}.nc", label.to_lowercase().replace(' ', "_"), variable)
}

fn hours() -> Vec<String> {
    (0..24).map(|h| format!("{:02}:00", h)).collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// -- Tests -------------------------------------------------------------------
