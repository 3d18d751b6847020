pub mod plan;
pub mod validate;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
pub use plan::plan;
pub use validate::validate;

/// Where retrieved files go when no directory is given.
pub fn default_output_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("cannot determine the home directory"))
}
