use std::path::Path;

use log::warn;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads a vote count. Anything that is not a finite number counts as zero.
pub fn parse_votes(cell: &str, file_name: &str, lineno: usize, column: &str) -> f64 {
    let s = cell.trim();
    match s.parse::<f64>() {
        Ok(x) if x.is_finite() => x,
        _ => {
            if !s.is_empty() {
                warn!(
                    "{}:{}: column {}: could not read {:?} as a number, counting 0",
                    file_name, lineno, column, cell
                );
            }
            0.0
        }
    }
}
