//! Gridded dataset loaded from a NetCDF file.

pub mod decode;
pub mod reader;

use std::path::PathBuf;

use thiserror::Error;

pub use reader::open;

/// Failure to get data out of the input file. Always fatal.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("input file `{0}` does not exist")]
    NotFound(PathBuf),
    #[error("cannot open `{path}` as NetCDF: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },
    #[error("cannot read variable `{name}`: {source}")]
    Read {
        name: String,
        #[source]
        source: netcdf::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
}

/// A data variable with its values decoded to `f64`, missing entries as NaN.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub dimensions: Vec<Dimension>,
    pub values: Vec<f64>,
}

impl Variable {
    /// Number of elements: the product of the dimension lengths (1 for a scalar).
    pub fn total(&self) -> usize {
        self.dimensions.iter().map(|d| d.len).product()
    }

    pub fn shape(&self) -> String {
        let dims: Vec<String> = self
            .dimensions
            .iter()
            .map(|d| format!("{}={}", d.name, d.len))
            .collect();

        format!("({})", dims.join(", "))
    }
}

/// The data variables of a file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub variables: Vec<Variable>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

// -- Tests -------------------------------------------------------------------
