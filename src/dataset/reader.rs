//! Reads the data variables of a NetCDF file.

use std::{collections::HashSet, path::Path};

use log::{debug, warn};
use netcdf::{types::NcVariableType, AttributeValue};

use super::{
    decode::{decode, Packing},
    DataAccessError, Dataset, Dimension, Variable,
};

/// Opens a NetCDF file and decodes every numeric data variable, in file order.
///
/// Coordinate variables are left out: a 1-D variable named after its own
/// dimension, or any variable listed in another variable's `coordinates`
/// attribute.
pub fn open(path: &Path) -> Result<Dataset, DataAccessError> {
    if !path.exists() {
        return Err(DataAccessError::NotFound(path.to_path_buf()));
    }

    let file = netcdf::open(path).map_err(|source| DataAccessError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let coordinates = coordinate_names(&file)?;
    let mut variables = Vec::new();

    for var in file.variables() {
        let name = var.name();
        let dimensions: Vec<Dimension> = var
            .dimensions()
            .iter()
            .map(|d| Dimension {
                name: d.name(),
                len: d.len(),
            })
            .collect();

        if is_coordinate(&name, &dimensions, &coordinates) {
            debug!("`{}` is a coordinate variable, skipping", name);
            continue;
        }

        if !is_numeric(&var.vartype()) {
            warn!("`{}` is not numeric, skipping", name);
            continue;
        }

        let total: usize = dimensions.iter().map(|d| d.len).product();
        let values = read_values(&var, &name, total)?;
        debug!("read `{}`: {} values", name, values.len());

        variables.push(Variable {
            name,
            dimensions,
            values,
        });
    }

    Ok(Dataset { variables })
}

fn read_values(
    var: &netcdf::Variable<'_>,
    name: &str,
    total: usize,
) -> Result<Vec<f64>, DataAccessError> {
    let read_error = |source: netcdf::Error| DataAccessError::Read {
        name: name.to_string(),
        source,
    };

    if total == 0 {
        return Ok(vec![]);
    }

    let packing = packing(var).map_err(read_error)?;
    debug!("`{}` packing: {:?}", name, packing);

    let mut values = var.get_values::<f64, _>(..).map_err(read_error)?;
    decode(&mut values, &packing);

    Ok(values)
}

fn packing(var: &netcdf::Variable<'_>) -> Result<Packing, netcdf::Error> {
    let mut packing = Packing::default();

    for attribute in ["_FillValue", "missing_value"] {
        if let Some(values) = numeric_attribute(var, attribute)? {
            packing.fill_values.extend(values);
        }
    }
    if let Some(scale) = numeric_attribute(var, "scale_factor")?.and_then(|v| v.first().copied()) {
        packing.scale_factor = scale;
    }
    if let Some(offset) = numeric_attribute(var, "add_offset")?.and_then(|v| v.first().copied()) {
        packing.add_offset = offset;
    }

    Ok(packing)
}

fn numeric_attribute(
    var: &netcdf::Variable<'_>,
    name: &str,
) -> Result<Option<Vec<f64>>, netcdf::Error> {
    match var.attribute(name) {
        Some(attribute) => Ok(as_numbers(attribute.value()?)),
        None => Ok(None),
    }
}

fn as_numbers(value: AttributeValue) -> Option<Vec<f64>> {
    let numbers = match value {
        AttributeValue::Uchar(v) => vec![f64::from(v)],
        AttributeValue::Uchars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Schar(v) => vec![f64::from(v)],
        AttributeValue::Schars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ushort(v) => vec![f64::from(v)],
        AttributeValue::Ushorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Short(v) => vec![f64::from(v)],
        AttributeValue::Shorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Uint(v) => vec![f64::from(v)],
        AttributeValue::Uints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Int(v) => vec![f64::from(v)],
        AttributeValue::Ints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ulonglong(v) => vec![v as f64],
        AttributeValue::Ulonglongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Longlong(v) => vec![v as f64],
        AttributeValue::Longlongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Float(v) => vec![f64::from(v)],
        AttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Double(v) => vec![v],
        AttributeValue::Doubles(v) => v,
        _ => return None,
    };

    Some(numbers)
}

// Names listed in any variable's `coordinates` attribute
fn coordinate_names(file: &netcdf::File) -> Result<HashSet<String>, DataAccessError> {
    let mut names = HashSet::new();

    for var in file.variables() {
        let Some(attribute) = var.attribute("coordinates") else {
            continue;
        };
        let value = attribute.value().map_err(|source| DataAccessError::Read {
            name: var.name(),
            source,
        })?;
        if let AttributeValue::Str(list) = value {
            names.extend(list.split_whitespace().map(str::to_string));
        }
    }

    Ok(names)
}

fn is_coordinate(name: &str, dimensions: &[Dimension], coordinates: &HashSet<String>) -> bool {
    let is_index = dimensions.len() == 1 && dimensions[0].name == name;

    is_index || coordinates.contains(name)
}

// Only integer and floating types convert to f64; char, string, enum,
// compound, opaque and vlen variables do not
fn is_numeric(vartype: &NcVariableType) -> bool {
    matches!(vartype, NcVariableType::Int(_) | NcVariableType::Float(_))
}

// -- Tests -------------------------------------------------------------------
