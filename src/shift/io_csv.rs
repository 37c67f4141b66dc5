// Primitives for reading the county CSV files.

use std::fs::File;

use csv::StringRecord;
use log::{debug, info};
use snafu::prelude::*;
use state_shift::CountyRecord;

use crate::shift::{
    io_common::{parse_votes, simplify_file_name},
    *,
};

pub const STATE_NAME: &str = "state_name";
pub const VOTES_DEM: &str = "votes_dem";
pub const VOTES_GOP: &str = "votes_gop";
pub const TOTAL_VOTES: &str = "total_votes";

// Positions of the required columns in a file.
struct Columns {
    state_name: usize,
    votes_dem: usize,
    votes_gop: usize,
    total_votes: usize,
}

pub fn read_county_csv(path: &str) -> ShiftResult<Vec<CountyRecord>> {
    let file_name = simplify_file_name(path);
    info!("Attempting to read county file {:?}", path);
    let (mut rdr, columns) = get_records(path)?;

    let mut res: Vec<CountyRecord> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_county_csv: {:?} {:?}", lineno, line);
        let cell = |col: usize| get_cell(&line, col, path, lineno);
        let county = CountyRecord {
            state_name: cell(columns.state_name)?.trim().to_string(),
            votes_dem: parse_votes(cell(columns.votes_dem)?, &file_name, lineno, VOTES_DEM),
            votes_gop: parse_votes(cell(columns.votes_gop)?, &file_name, lineno, VOTES_GOP),
            total_votes: parse_votes(cell(columns.total_votes)?, &file_name, lineno, TOTAL_VOTES),
        };
        res.push(county);
    }
    info!("Read {:?} county records from {:?}", res.len(), file_name);
    Ok(res)
}

fn get_cell<'a>(
    line: &'a StringRecord,
    col: usize,
    path: &str,
    lineno: usize,
) -> ShiftResult<&'a str> {
    line.get(col).context(CsvLineTooShortSnafu { path, lineno })
}

fn get_records(path: &str) -> ShiftResult<(csv::Reader<File>, Columns)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let header: StringRecord = rdr.headers().context(CsvOpenSnafu { path })?.clone();
    debug!("get_records: header: {:?}", header);
    let find = |name: &str| -> ShiftResult<usize> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .context(CsvMissingColumnSnafu { path, column: name })
    };
    let columns = Columns {
        state_name: find(STATE_NAME)?,
        votes_dem: find(VOTES_DEM)?,
        votes_gop: find(VOTES_GOP)?,
        total_votes: find(TOTAL_VOTES)?,
    };
    Ok((rdr, columns))
}
