//! Fixed-width text rendering of the validation report.

use crate::validate::ReportRow;

const UNDEFINED: &str = "N/A";
const RULE_WIDTH: usize = 100;

/// Renders the report title, header, rule and one line per row.
pub fn render(rows: &[ReportRow]) -> String {
    let mut out = String::new();

    out.push_str("\nDATA VALIDATION REPORT \n");
    out.push_str(&header());
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }

    out
}

fn header() -> String {
    format!(
        "{:<10} {:<30} {:>10} {:>10} {:>12} {:>15} {:>10}",
        "Variable", "Definition", "Total", "Missing", "% Missing", "Out-of-range", "% Out"
    )
}

fn render_row(row: &ReportRow) -> String {
    let definition = row.definition.as_deref().unwrap_or(UNDEFINED);

    format!(
        "{:<10} {:<30} {:>10} {:>10} {:>12} {:>15} {:>10}",
        row.name,
        definition,
        row.total,
        row.missing,
        percentage_cell(row.missing_pct),
        count_cell(row.out_of_range),
        percentage_cell(row.out_pct),
    )
}

fn count_cell(count: Option<usize>) -> String {
    count.map_or_else(|| UNDEFINED.to_string(), |c| c.to_string())
}

fn percentage_cell(pct: Option<f64>) -> String {
    pct.map_or_else(|| UNDEFINED.to_string(), |p| format!("{:.1}", p))
}

// -- Tests -------------------------------------------------------------------
