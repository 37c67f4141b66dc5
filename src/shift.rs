use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use state_shift::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::shift::config_reader::*;

pub mod config_reader;
mod io_common;
pub mod io_csv;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ShiftError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Line {lineno} of {path} is too short"))]
    CsvLineTooShort { path: String, lineno: usize },
    #[snafu(display("Missing column {column} in {path}"))]
    CsvMissingColumn { path: String, column: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Cannot read the current directory"))]
    CurrentDir { source: std::io::Error },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Unknown sort mode {mode:?}: expected alphabetical, margin, dem or gop"))]
    InvalidSortMode { mode: String },
    #[snafu(display("Unknown display count {count:?}: expected 5, 10, 20, 30 or all"))]
    InvalidDisplayCount { count: String },
    #[snafu(display("Both --year-a and --year-b are required when no configuration is given"))]
    MissingSources {},
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type ShiftResult<T> = Result<T, ShiftError>;

fn shift_to_json(s: &StateShift) -> JSValue {
    json!({
        "state": s.state,
        "dem_shift": s.dem_shift,
        "gop_shift": s.gop_shift,
        "total_shift": s.total_shift,
        "margin_shift": s.margin_shift,
        "dem_pct_2020": s.dem_pct_2020,
        "dem_pct_2024": s.dem_pct_2024,
        "gop_pct_2020": s.gop_pct_2020,
        "gop_pct_2024": s.gop_pct_2024,
    })
}

fn build_summary_js(
    oc: &OutputConfig,
    result: &AggregationResult,
    selected: &[String],
) -> JSValue {
    let results: Vec<JSValue> = selected
        .iter()
        .filter_map(|s| result.get(s))
        .map(shift_to_json)
        .collect();
    json!({
        "config": oc,
        "allStates": result.all_state_names,
        "selectedStates": selected,
        "excludedStates": result.excluded_states(),
        "results": results,
    })
}

fn resolve_path(root: &Path, file_path: &str) -> String {
    let p: PathBuf = [root, Path::new(file_path)].iter().collect();
    p.as_path().display().to_string()
}

/// Reads the two data sources, runs the comparison and returns the summary.
///
/// Relative paths are resolved against `root`.
pub fn run_comparison(config: &ShiftConfig, root: &Path) -> ShiftResult<JSValue> {
    let oc = config.output_config()?;
    let sort_mode = config.display.sort_mode()?;
    let display_count = config.display.display_count()?;
    info!("config: {:?}", oc);

    let counties_a =
        io_csv::read_county_csv(&resolve_path(root, &config.sources.year_a.file_path))?;
    let counties_b =
        io_csv::read_county_csv(&resolve_path(root, &config.sources.year_b.file_path))?;

    let result = aggregate(&counties_a, &counties_b);
    let excluded = result.excluded_states();
    if !excluded.is_empty() {
        warn!(
            "{:?} states could not be compared (no votes in one of the years): {:?}",
            excluded.len(),
            excluded
        );
    }

    let selected = select_states(&result, sort_mode, display_count);
    for row in chart_rows(&result, &selected) {
        info!(
            "{:>24} margin {:+.2} dem {:+} gop {:+}",
            row.state, row.margin_shift, row.dem_shift, row.gop_shift
        );
    }

    Ok(build_summary_js(&oc, &result, &selected))
}

/// Writes the summary to the given location, or to the standard output.
pub fn write_summary(summary: &JSValue, out: Option<&str>) -> ShiftResult<String> {
    let pretty_js = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, &pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(pretty_js)
}

/// Checks the summary against a reference summary and prints the differences.
pub fn check_reference(pretty_js: &str, reference_path: &str) -> ShiftResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_ref != pretty_js {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_ref.as_str(), pretty_js, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

/// Runs the comparison, writes the summary and checks it against the reference if any.
///
/// `out` takes precedence over the output path of the configuration.
pub fn run_with_config(
    config: &ShiftConfig,
    root: &Path,
    out: Option<&str>,
    reference_path: Option<&str>,
) -> ShiftResult<()> {
    let summary = run_comparison(config, root)?;
    let out_path: Option<String> = match out {
        Some(x) => Some(x.to_string()),
        None => config
            .output_settings
            .output_path
            .as_deref()
            .map(|p| match p {
                "" | "stdout" => p.to_string(),
                _ => resolve_path(root, p),
            }),
    };
    let pretty_js = write_summary(&summary, out_path.as_deref())?;
    if let Some(p) = reference_path {
        check_reference(&pretty_js, p)?;
    }
    Ok(())
}
