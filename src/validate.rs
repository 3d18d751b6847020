//! Completeness and range statistics per variable.

use crate::{
    dataset::Variable,
    variables::{DefinitionTable, Range, ThresholdTable},
};

/// One line of the validation report. `None` means undefined and renders as
/// `N/A`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub definition: Option<String>,
    pub range: Option<Range>,
    pub total: usize,
    pub missing: usize,
    pub missing_pct: Option<f64>,
    pub out_of_range: Option<usize>,
    pub out_pct: Option<f64>,
}

pub fn validate_variable(
    variable: &Variable,
    thresholds: &ThresholdTable,
    definitions: &DefinitionTable,
) -> ReportRow {
    let total = variable.total();
    let missing = variable.values.iter().filter(|v| v.is_nan()).count();
    let range = thresholds.get(&variable.name);

    let out_of_range =
        range.map(|r| variable.values.iter().filter(|&&v| r.is_violated_by(v)).count());

    ReportRow {
        name: variable.name.clone(),
        definition: definitions.get(&variable.name).map(str::to_string),
        range,
        total,
        missing,
        missing_pct: percentage(missing, total),
        out_of_range,
        out_pct: out_of_range.and_then(|count| percentage(count, total)),
    }
}

// Undefined for an empty variable rather than dividing by zero
fn percentage(count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }

    Some(100.0 * count as f64 / total as f64)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dimension;

    fn variable(name: &str, values: Vec<f64>) -> Variable {
        Variable {
            name: name.to_string(),
            dimensions: vec![Dimension {
                name: "x".to_string(),
                len: values.len(),
            }],
            values,
        }
    }

    fn check(v: &Variable) -> ReportRow {
        validate_variable(v, &ThresholdTable::builtin(), &DefinitionTable::builtin())
    }

    #[test]
    fn should_count_missing_and_out_of_range_temperature() {
        let row = check(&variable("t", vec![210.0, 500.0, f64::NAN, 290.0]));

        assert_eq!(row.definition.as_deref(), Some("Temperature"));
        assert_eq!(row.total, 4);
        assert_eq!(row.missing, 1);
        assert_eq!(row.missing_pct, Some(25.0));
        assert_eq!(row.out_of_range, Some(1));
        assert_eq!(row.out_pct, Some(25.0));
    }

    #[test]
    fn should_leave_out_of_range_undefined_without_threshold() {
        let row = check(&variable("xyz", vec![1.0, 2.0, 3.0]));

        assert_eq!(row.definition, None);
        assert_eq!(row.range, None);
        assert_eq!(row.total, 3);
        assert_eq!(row.missing, 0);
        assert_eq!(row.missing_pct, Some(0.0));
        assert_eq!(row.out_of_range, None);
        assert_eq!(row.out_pct, None);
    }

    #[test]
    fn should_not_divide_by_zero_on_empty_variable() {
        let row = check(&variable("t", vec![]));

        assert_eq!(row.total, 0);
        assert_eq!(row.missing, 0);
        assert_eq!(row.missing_pct, None);
        assert_eq!(row.out_of_range, Some(0));
        assert_eq!(row.out_pct, None);
    }

    #[test]
    fn should_not_count_missing_as_out_of_range() {
        let row = check(&variable("r", vec![f64::NAN, f64::NAN, 150.0, -1.0, 50.0]));

        assert_eq!(row.missing, 2);
        assert_eq!(row.out_of_range, Some(2));
        assert_eq!(row.out_pct, Some(40.0));
    }

    #[test]
    fn should_count_every_element_of_multidimensional_variable() {
        let v = Variable {
            name: "u".to_string(),
            dimensions: vec![
                Dimension {
                    name: "time".to_string(),
                    len: 2,
                },
                Dimension {
                    name: "level".to_string(),
                    len: 3,
                },
            ],
            values: vec![0.0, 10.0, f64::NAN, 151.0, -151.0, 150.0],
        };
        let row = check(&v);

        assert_eq!(row.total, 6);
        assert_eq!(row.missing, 1);
        assert_eq!(row.out_of_range, Some(2));
        assert!((row.missing_pct.unwrap() - 100.0 / 6.0).abs() < 1e-12);
    }
}
