// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One row of raw vote counts for a county in one election year.
///
/// Numbers are kept as floats: the source files are not guaranteed to hold
/// integers, and a value that is not finite is counted as zero when summed.
#[derive(PartialEq, Debug, Clone)]
pub struct CountyRecord {
    pub state_name: String,
    pub votes_dem: f64,
    pub votes_gop: f64,
    pub total_votes: f64,
}

impl CountyRecord {
    pub fn new(state_name: &str, votes_dem: f64, votes_gop: f64, total_votes: f64) -> CountyRecord {
        CountyRecord {
            state_name: state_name.to_string(),
            votes_dem,
            votes_gop,
            total_votes,
        }
    }
}

/// The two election years being compared.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Year {
    /// The earlier election (reported in the `*_2020` fields).
    A,
    /// The later election (reported in the `*_2024` fields).
    B,
}

// ******** Output data structures *********

/// Per-state, per-year sums over all the counties of the state.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct StateTotals {
    pub dem_votes: f64,
    pub gop_votes: f64,
    pub total_votes: f64,
}

impl StateTotals {
    pub const EMPTY: StateTotals = StateTotals {
        dem_votes: 0.0,
        gop_votes: 0.0,
        total_votes: 0.0,
    };
}

/// The comparison between the two years for a single state.
///
/// Raw shifts are year B minus year A. The percentages are the share of each
/// party within its own year, between 0 and 100.
#[derive(PartialEq, Debug, Clone)]
pub struct StateShift {
    pub state: String,
    pub dem_shift: f64,
    pub gop_shift: f64,
    pub total_shift: f64,
    /// Percentage-point change of the Democratic share. Positive values are
    /// a shift towards the Democrats.
    pub margin_shift: f64,
    pub dem_pct_2020: f64,
    pub dem_pct_2024: f64,
    pub gop_pct_2020: f64,
    pub gop_pct_2024: f64,
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct AggregationResult {
    /// Only the states with votes recorded in both years.
    pub state_shifts: std::collections::HashMap<String, StateShift>,
    /// Every state name seen in either year, sorted.
    pub all_state_names: Vec<String>,
}

impl AggregationResult {
    pub fn get(&self, state: &str) -> Option<&StateShift> {
        self.state_shifts.get(state)
    }

    /// The states that appear in the data but could not be compared.
    pub fn excluded_states(&self) -> Vec<String> {
        self.all_state_names
            .iter()
            .filter(|s| !self.state_shifts.contains_key(*s))
            .cloned()
            .collect()
    }
}

/// A row of the bar charts drawn for the selected states.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartRow {
    pub state: String,
    pub margin_shift: f64,
    pub dem_shift: f64,
    pub gop_shift: f64,
}

/// Errors raised by the checked entry points of the builder.
///
/// The aggregation itself never fails.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AggregationErrors {
    EmptyDataset(Year),
}

impl Error for AggregationErrors {}

impl Display for AggregationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationErrors::EmptyDataset(y) => {
                write!(f, "AggregationError: no county record for year {:?}", y)
            }
        }
    }
}

// ********* Selection **********

// The options follow the controls of the comparison dashboard: a sort mode
// and a fixed set of display counts.

/// The metric used to rank the states.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ShiftMetric {
    MarginShift,
    DemShift,
    GopShift,
}

impl ShiftMetric {
    pub fn value(&self, shift: &StateShift) -> f64 {
        match self {
            ShiftMetric::MarginShift => shift.margin_shift,
            ShiftMetric::DemShift => shift.dem_shift,
            ShiftMetric::GopShift => shift.gop_shift,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SortMode {
    Alphabetical,
    /// Descending order of the absolute value of the metric.
    ByMetric(ShiftMetric),
}

impl SortMode {
    pub const ALL_MODES: [SortMode; 4] = [
        SortMode::Alphabetical,
        SortMode::ByMetric(ShiftMetric::MarginShift),
        SortMode::ByMetric(ShiftMetric::DemShift),
        SortMode::ByMetric(ShiftMetric::GopShift),
    ];

    /// Parses the short names used in configuration files: `alphabetical`,
    /// `margin`, `dem` and `gop`.
    pub fn parse(s: &str) -> Option<SortMode> {
        match s {
            "alphabetical" => Some(SortMode::Alphabetical),
            "margin" => Some(SortMode::ByMetric(ShiftMetric::MarginShift)),
            "dem" => Some(SortMode::ByMetric(ShiftMetric::DemShift)),
            "gop" => Some(SortMode::ByMetric(ShiftMetric::GopShift)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortMode::Alphabetical => "alphabetical",
            SortMode::ByMetric(ShiftMetric::MarginShift) => "margin",
            SortMode::ByMetric(ShiftMetric::DemShift) => "dem",
            SortMode::ByMetric(ShiftMetric::GopShift) => "gop",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum DisplayCount {
    Top(usize),
    All,
}

impl DisplayCount {
    pub const TIERS: [DisplayCount; 5] = [
        DisplayCount::Top(5),
        DisplayCount::Top(10),
        DisplayCount::Top(20),
        DisplayCount::Top(30),
        DisplayCount::All,
    ];

    /// Only the fixed tiers are accepted.
    pub fn parse(s: &str) -> Option<DisplayCount> {
        match s {
            "all" => Some(DisplayCount::All),
            x => {
                let n = x.parse::<usize>().ok()?;
                DisplayCount::TIERS
                    .iter()
                    .find(|t| **t == DisplayCount::Top(n))
                    .cloned()
            }
        }
    }

    pub fn limit(&self, num_states: usize) -> usize {
        match self {
            DisplayCount::Top(n) => *n,
            DisplayCount::All => num_states,
        }
    }

    pub fn name(&self) -> String {
        match self {
            DisplayCount::Top(n) => n.to_string(),
            DisplayCount::All => "all".to_string(),
        }
    }
}
