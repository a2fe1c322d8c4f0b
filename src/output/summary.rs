use std::fmt::Write;

use comfy_table::Cell;

use crate::download::RunReport;

use super::styling::{heading, muted, success};
use super::tables::{create_table, cyan_header, format_size, size_cell};

/// Prints the archives written by a run to stderr.
pub fn print_summary(report: &RunReport) {
    eprintln!("{}", render_summary(report));
}

/// Renders one row per written archive followed by a one-line total.
pub fn render_summary(report: &RunReport) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "📦 {}",
        heading(format!("Artifacts for run {}", report.run_id))
    );

    if report.total() == 0 {
        let _ = writeln!(output, "  {}", muted("No artifacts found"));
        return output;
    }

    let mut table = create_table();
    table.set_header(cyan_header(&["Artifact", "Size", "Path"]));

    for artifact in &report.written {
        table.add_row(vec![
            Cell::new(&artifact.name),
            size_cell(artifact.bytes),
            Cell::new(artifact.path.display()),
        ]);
    }

    let _ = writeln!(output, "{table}");
    let _ = writeln!(
        output,
        "  {}",
        success(format!(
            "{} written ({})",
            report.total(),
            format_size(report.total_bytes())
        ))
    );

    output
}
