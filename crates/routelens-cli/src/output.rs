//! Output sink: renders a [`ScanResult`] as json, a table, or a summary.

use std::fmt::Write as _;

use routelens_analysis::routes::{aggregate, Route, ScanResult, ScanStatistics};
use serde::Serialize;

use crate::args::OutputFormat;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a ScanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<&'a ScanStatistics>,
}

/// Render `result`. `statistics` is only consulted by the json format;
/// the summary computes its own.
pub fn render(
    result: &ScanResult,
    statistics: Option<&ScanStatistics>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => render_json(result, statistics),
        OutputFormat::Table => Ok(render_table(&result.routes)),
        OutputFormat::Summary => Ok(render_summary(result, &aggregate(&result.routes))),
    }
}

fn render_json(result: &ScanResult, statistics: Option<&ScanStatistics>) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(&JsonReport { result, statistics })?;
    out.push('\n');
    Ok(out)
}

const TABLE_HEADERS: [&str; 4] = ["METHOD", "PATH", "FILE", "INPUTS"];

fn render_table(routes: &[Route]) -> String {
    let rows: Vec<[String; 4]> = routes
        .iter()
        .map(|route| {
            [
                route.method.clone(),
                route.path.clone(),
                format!("{}:{}", route.file, route.line),
                describe_inputs(route),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &TABLE_HEADERS.map(String::from), &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = format!(
        "{:<w0$}  {:<w1$}  {:<w2$}  {}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `body: email, name; params: id`, or `-` when nothing was found.
fn describe_inputs(route: &Route) -> String {
    let parts: Vec<String> = route
        .expected_inputs
        .categories()
        .map(|(category, fields)| {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            format!("{}: {}", category, fields.join(", "))
        })
        .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join("; ")
    }
}

fn render_summary(result: &ScanResult, stats: &ScanStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} routes in {} files ({} files scanned, {} unreadable)",
        stats.total_routes,
        stats.files_with_routes_count,
        result.scanned_file_count,
        result.errors.len()
    );
    if result.partial {
        let _ = writeln!(out, "scan was cancelled; results are partial");
    }

    if !stats.method_counts.is_empty() {
        let _ = writeln!(out, "\nMethods:");
        for (method, count) in &stats.method_counts {
            let _ = writeln!(out, "  {:<8} {}", method, count);
        }
    }
    if !stats.framework_counts.is_empty() {
        let _ = writeln!(out, "\nDeclared on:");
        for (framework, count) in &stats.framework_counts {
            let _ = writeln!(out, "  {:<8} {}", framework, count);
        }
    }

    let _ = writeln!(out, "\nRoutes reading:");
    let _ = writeln!(out, "  params   {}", stats.routes_with_param_inputs);
    let _ = writeln!(out, "  body     {}", stats.routes_with_body_inputs);
    let _ = writeln!(out, "  query    {}", stats.routes_with_query_inputs);

    if !result.errors.is_empty() {
        let _ = writeln!(out, "\nErrors:");
        for error in &result.errors {
            let _ = writeln!(out, "  {}", error);
        }
    }
    out
}
