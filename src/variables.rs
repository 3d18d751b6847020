//! Static tables for the ERA5 pressure-level variables: plausible ranges and
//! display names.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Inclusive physically plausible interval. A value violates it when
/// `v < low || v > high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub fn new(low: f64, high: f64) -> Self {
        Range { low, high }
    }

    /// NaN is never out of range; it is counted as missing instead.
    pub fn is_violated_by(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }

        value < self.low || value > self.high
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read threshold file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse threshold file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid range for `{name}`: [{low}, {high}]")]
    InvalidRange { name: String, low: f64, high: f64 },
}

/// Short name to plausible range.
#[derive(Debug, Clone)]
pub struct ThresholdTable(BTreeMap<String, Range>);

impl ThresholdTable {
    /// Typical ranges for the ERA5 pressure-level variables.
    pub fn builtin() -> Self {
        let mut table = BTreeMap::new();
        table.insert("d".to_string(), Range::new(-1e-3, 1e-3)); // 1/s
        table.insert("cc".to_string(), Range::new(0.0, 1.0)); // fraction
        table.insert("z".to_string(), Range::new(-1e4, 1e6)); // m^2/s^2
        table.insert("o3".to_string(), Range::new(0.0, 1e-4)); // kg/kg
        table.insert("pv".to_string(), Range::new(-1e-4, 1e-4)); // K m^2 / (kg s)
        table.insert("r".to_string(), Range::new(0.0, 100.0)); // %
        table.insert("ciwc".to_string(), Range::new(0.0, 1e-2)); // kg/kg
        table.insert("clwc".to_string(), Range::new(0.0, 1e-2)); // kg/kg
        table.insert("q".to_string(), Range::new(0.0, 1.0)); // kg/kg
        table.insert("crwc".to_string(), Range::new(0.0, 1e-2)); // kg/kg
        table.insert("cswc".to_string(), Range::new(0.0, 1e-2)); // kg/kg
        table.insert("t".to_string(), Range::new(200.0, 350.0)); // K
        table.insert("u".to_string(), Range::new(-150.0, 150.0)); // m/s
        table.insert("v".to_string(), Range::new(-150.0, 150.0)); // m/s
        table.insert("w".to_string(), Range::new(-5.0, 5.0)); // Pa/s
        table.insert("vo".to_string(), Range::new(-1e-2, 1e-2)); // 1/s

        ThresholdTable(table)
    }

    pub fn get(&self, name: &str) -> Option<Range> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Replaces or adds the ranges given in a TOML file:
    ///
    /// ```toml
    /// [thresholds]
    /// t = [180.0, 340.0]
    /// ```
    pub fn overlay_file(self, path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.overlay_str(&text)
    }

    fn overlay_str(mut self, text: &str) -> Result<Self, ConfigError> {
        let overrides: ThresholdFile = toml::from_str(text)?;

        for (name, (low, high)) in overrides.thresholds {
            if low.is_nan() || high.is_nan() || low > high {
                return Err(ConfigError::InvalidRange { name, low, high });
            }
            self.0.insert(name, Range::new(low, high));
        }

        Ok(self)
    }
}

#[derive(Debug, Deserialize)]
struct ThresholdFile {
    #[serde(default)]
    thresholds: BTreeMap<String, (f64, f64)>,
}

/// Short name to human readable description, for the report only.
#[derive(Debug, Clone)]
pub struct DefinitionTable(BTreeMap<&'static str, &'static str>);

impl DefinitionTable {
    pub fn builtin() -> Self {
        let mut table = BTreeMap::new();
        table.insert("d", "Divergence");
        table.insert("cc", "Cloud cover");
        table.insert("z", "Geopotential");
        table.insert("o3", "Ozone mass mixing ratio");
        table.insert("pv", "Potential vorticity");
        table.insert("r", "Relative humidity");
        table.insert("ciwc", "Cloud ice water content");
        table.insert("clwc", "Cloud liquid water content");
        table.insert("q", "Specific humidity");
        table.insert("crwc", "Cloud rain water content");
        table.insert("cswc", "Cloud snow water content");
        table.insert("t", "Temperature");
        table.insert("u", "Eastward wind");
        table.insert("v", "Northward wind");
        table.insert("w", "Vertical velocity");
        table.insert("vo", "Relative vorticity");

        DefinitionTable(table)
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.0.get(name).copied()
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn should_define_all_pressure_level_variables() {
        let thresholds = ThresholdTable::builtin();
        let definitions = DefinitionTable::builtin();

        assert_eq!(thresholds.len(), 16);
        for name in thresholds.0.keys() {
            assert!(definitions.get(name).is_some(), "no definition for {}", name);
        }
        assert_eq!(thresholds.get("t"), Some(Range::new(200.0, 350.0)));
        assert_eq!(definitions.get("vo"), Some("Relative vorticity"));
        assert_eq!(thresholds.get("xyz"), None);
    }

    #[test]
    fn should_include_bounds() {
        let range = Range::new(200.0, 350.0);

        assert!(!range.is_violated_by(200.0));
        assert!(!range.is_violated_by(350.0));
        assert!(range.is_violated_by(199.9));
        assert!(range.is_violated_by(500.0));
    }

    #[test]
    fn should_not_count_nan_as_violation() {
        let range = Range::new(0.0, 1.0);

        assert!(!range.is_violated_by(f64::NAN));
    }

    #[test]
    fn should_overlay_thresholds() {
        let text = r#"
            [thresholds]
            t = [180.0, 340.0]
            sp = [50000.0, 110000.0]
        "#;
        let table = ThresholdTable::builtin().overlay_str(text).unwrap();

        assert_eq!(table.len(), 17);
        assert_eq!(table.get("t"), Some(Range::new(180.0, 340.0)));
        assert_eq!(table.get("sp"), Some(Range::new(50000.0, 110000.0)));
        assert_eq!(table.get("u"), Some(Range::new(-150.0, 150.0)));
    }

    #[test]
    fn should_reject_inverted_range() {
        let text = "[thresholds]\nt = [350.0, 200.0]\n";
        let result = ThresholdTable::builtin().overlay_str(text);

        assert!(matches!(result, Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn should_reject_malformed_file() {
        let text = "[thresholds]\nt = \"hot\"\n";
        let result = ThresholdTable::builtin().overlay_str(text);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn should_read_overlay_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("thresholds.toml");
        fs::write(&path, "[thresholds]\nw = [-10.0, 10.0]\n").unwrap();

        let table = ThresholdTable::builtin().overlay_file(&path).unwrap();

        assert_eq!(table.get("w"), Some(Range::new(-10.0, 10.0)));
    }

    #[test]
    fn should_keep_path_of_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = ThresholdTable::builtin().overlay_file(&path).unwrap_err();

        match err {
            ConfigError::Read { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {}", other),
        }
    }
}
