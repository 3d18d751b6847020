//! Print the retrieval requests for a day of ERA5 data around a location.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use log::info;

use crate::acquisition::{self, default_variables, Location};

use super::default_output_dir;

pub fn plan(
    date: NaiveDate,
    location: Location,
    label: &str,
    variables: Vec<String>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let variables = if variables.is_empty() {
        default_variables()
    } else {
        variables
    };
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => default_output_dir()?,
    };

    let retrievals = acquisition::plan(date, location, label, &variables, &output_dir)?;
    info!("{} retrievals from {}", retrievals.len(), acquisition::DATASET);

    for retrieval in &retrievals {
        println!(
            "⬇️ {} → {}",
            retrieval.request.variable.join(","),
            retrieval.target.display()
        );
        println!("{}", serde_json::to_string_pretty(&retrieval.request)?);
    }

    println!(
        "✅ {} requests planned for {} around {}",
        retrievals.len(),
        date,
        label
    );

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn jerusalem() -> Location {
        Location {
            latitude: 31.78,
            longitude: 35.22,
        }
    }

    #[test]
    fn should_plan_default_variables() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();

        let result = plan(date, jerusalem(), "jerusalem", vec![], Some(PathBuf::from(".")));

        assert!(result.is_ok());
    }

    #[test]
    fn should_fail_on_invalid_location() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let location = Location {
            latitude: -91.0,
            longitude: 0.0,
        };

        let err = plan(date, location, "nowhere", vec![], Some(PathBuf::from("."))).unwrap_err();

        assert_eq!(
            err.downcast_ref::<acquisition::PlanError>(),
            Some(&acquisition::PlanError::Latitude(-91.0))
        );
    }
}
