mod config;
use log::{debug, info, warn};

use std::collections::{BTreeSet, HashMap};

pub use crate::config::*;

pub mod builder;
pub mod manual;

/// Runs the state-level comparison between two years of county results.
///
/// Arguments:
/// * `counties_a` the county rows of the earlier election
/// * `counties_b` the county rows of the later election
///
/// The states that do not have a positive number of votes in both years are
/// left out of the shifts but are still reported in `all_state_names`.
/// This function does not fail.
pub fn aggregate(counties_a: &[CountyRecord], counties_b: &[CountyRecord]) -> AggregationResult {
    info!(
        "aggregate: processing {:?} + {:?} county records",
        counties_a.len(),
        counties_b.len()
    );
    let totals_a = group_and_sum(counties_a);
    let totals_b = group_and_sum(counties_b);

    let universe: BTreeSet<&String> = totals_a.keys().chain(totals_b.keys()).collect();
    let all_state_names: Vec<String> = universe.into_iter().cloned().collect();

    let mut state_shifts: HashMap<String, StateShift> = HashMap::new();
    for state in all_state_names.iter() {
        let a = totals_a.get(state).unwrap_or(&StateTotals::EMPTY);
        let b = totals_b.get(state).unwrap_or(&StateTotals::EMPTY);
        if let Some(shift) = compute_shift(state, a, b) {
            state_shifts.insert(state.clone(), shift);
        }
    }

    info!(
        "aggregate: {:?} states, {:?} compared",
        all_state_names.len(),
        state_shifts.len()
    );
    AggregationResult {
        state_shifts,
        all_state_names,
    }
}

/// Sums the votes of all the counties of each state.
pub fn group_and_sum(counties: &[CountyRecord]) -> HashMap<String, StateTotals> {
    let mut res: HashMap<String, StateTotals> = HashMap::new();
    for c in counties.iter() {
        let totals = res.entry(c.state_name.clone()).or_default();
        totals.dem_votes += finite_or_zero(c.votes_dem);
        totals.gop_votes += finite_or_zero(c.votes_gop);
        totals.total_votes += finite_or_zero(c.total_votes);
    }
    debug!("group_and_sum: {:?} rows -> {:?} states", counties.len(), res.len());
    res
}

/// Compares the totals of one state between the two years.
///
/// Returns None if either year has no votes, or if the sums are too large to
/// be compared.
pub fn compute_shift(state: &str, a: &StateTotals, b: &StateTotals) -> Option<StateShift> {
    if a.total_votes == 0.0 || b.total_votes == 0.0 {
        debug!(
            "compute_shift: {}: skipping, total votes {:?} -> {:?}",
            state, a.total_votes, b.total_votes
        );
        return None;
    }
    let dem_pct_2020 = share(a.dem_votes, a.total_votes);
    let dem_pct_2024 = share(b.dem_votes, b.total_votes);
    let gop_pct_2020 = share(a.gop_votes, a.total_votes);
    let gop_pct_2024 = share(b.gop_votes, b.total_votes);
    let shift = StateShift {
        state: state.to_string(),
        dem_shift: b.dem_votes - a.dem_votes,
        gop_shift: b.gop_votes - a.gop_votes,
        total_shift: b.total_votes - a.total_votes,
        margin_shift: dem_pct_2024 - dem_pct_2020,
        dem_pct_2020,
        dem_pct_2024,
        gop_pct_2020,
        gop_pct_2024,
    };
    // Sums of finite counts may still overflow.
    let values = [
        shift.dem_shift,
        shift.gop_shift,
        shift.total_shift,
        shift.margin_shift,
        shift.dem_pct_2020,
        shift.dem_pct_2024,
        shift.gop_pct_2020,
        shift.gop_pct_2024,
    ];
    if values.iter().all(|x| x.is_finite()) {
        Some(shift)
    } else {
        warn!("compute_shift: {}: skipping, vote counts overflow", state);
        None
    }
}

// Percentage of votes over total. Dividing first only when scaling overflows
// keeps round values exact.
fn share(votes: f64, total: f64) -> f64 {
    let x = 100.0 * votes / total;
    if x.is_finite() {
        x
    } else {
        votes / total * 100.0
    }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// The `n` states with the largest absolute value of the metric.
///
/// The states that have no shift entry are not candidates. Ties keep the
/// alphabetical order.
pub fn top_n_by_abs_shift(result: &AggregationResult, metric: ShiftMetric, n: usize) -> Vec<String> {
    let mut candidates: Vec<(&String, f64)> = result
        .all_state_names
        .iter()
        .filter_map(|s| result.get(s).map(|shift| (s, metric.value(shift).abs())))
        .collect();
    // Stable sort: the input is already in alphabetical order.
    candidates.sort_by(|(_, x), (_, y)| y.total_cmp(x));
    candidates
        .into_iter()
        .take(n)
        .map(|(s, _)| s.clone())
        .collect()
}

/// The first `n` states in alphabetical order, including the ones without a
/// shift entry.
pub fn alphabetical(result: &AggregationResult, n: usize) -> Vec<String> {
    result.all_state_names.iter().take(n).cloned().collect()
}

pub fn select_states(
    result: &AggregationResult,
    sort_mode: SortMode,
    count: DisplayCount,
) -> Vec<String> {
    let n = count.limit(result.all_state_names.len());
    let res = match sort_mode {
        SortMode::Alphabetical => alphabetical(result, n),
        SortMode::ByMetric(metric) => top_n_by_abs_shift(result, metric, n),
    };
    debug!(
        "select_states: mode {:?} count {:?}: {:?}",
        sort_mode, count, res
    );
    res
}

/// The bars to draw for the selected states, in the order of the selection.
pub fn chart_rows(result: &AggregationResult, selected: &[String]) -> Vec<ChartRow> {
    let rows: Vec<ChartRow> = selected
        .iter()
        .filter_map(|s| result.get(s))
        .map(|shift| ChartRow {
            state: shift.state.clone(),
            margin_shift: shift.margin_shift,
            dem_shift: shift.dem_shift,
            gop_shift: shift.gop_shift,
        })
        .collect();
    if rows.len() < selected.len() {
        info!(
            "chart_rows: {:?} selected states have no comparison",
            selected.len() - rows.len()
        );
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn rec(state: &str, dem: f64, gop: f64, total: f64) -> CountyRecord {
        CountyRecord::new(state, dem, gop, total)
    }

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ohio_shift_and_texas_exclusion() {
        init();
        let a = vec![rec("Ohio", 40.0, 60.0, 100.0), rec("Texas", 20.0, 30.0, 50.0)];
        let b = vec![rec("Ohio", 55.0, 45.0, 100.0)];
        let res = aggregate(&a, &b);

        let ohio = res.get("Ohio").unwrap();
        assert_eq!(ohio.dem_shift, 15.0);
        assert_eq!(ohio.gop_shift, -15.0);
        assert_eq!(ohio.total_shift, 0.0);
        assert_eq!(ohio.dem_pct_2020, 40.0);
        assert_eq!(ohio.dem_pct_2024, 55.0);
        assert_eq!(ohio.gop_pct_2020, 60.0);
        assert_eq!(ohio.gop_pct_2024, 45.0);
        assert_eq!(ohio.margin_shift, 15.0);

        assert!(res.get("Texas").is_none());
        assert_eq!(res.all_state_names, names(&["Ohio", "Texas"]));
        assert_eq!(res.excluded_states(), names(&["Texas"]));
    }

    #[test]
    fn zero_total_in_one_year_is_excluded() {
        init();
        let a = vec![rec("Maine", 10.0, 10.0, 20.0), rec("Vermont", 5.0, 5.0, 10.0)];
        let b = vec![rec("Maine", 0.0, 0.0, 0.0), rec("Vermont", 6.0, 4.0, 10.0)];
        let res = aggregate(&a, &b);
        assert!(res.get("Maine").is_none());
        assert!(res.get("Vermont").is_some());
        assert_eq!(res.all_state_names, names(&["Maine", "Vermont"]));
    }

    #[test]
    fn state_only_in_later_year_is_excluded() {
        let res = aggregate(&[], &[rec("Utah", 1.0, 2.0, 3.0)]);
        assert!(res.state_shifts.is_empty());
        assert_eq!(res.all_state_names, names(&["Utah"]));
    }

    #[test]
    fn counties_are_summed() {
        init();
        let split = vec![
            rec("Iowa", 10.0, 20.0, 31.0),
            rec("Iowa", 5.0, 7.0, 12.0),
            rec("Iowa", 1.0, 1.0, 2.0),
        ];
        let merged = vec![rec("Iowa", 16.0, 28.0, 45.0)];
        let b = vec![rec("Iowa", 20.0, 20.0, 40.0)];
        assert_eq!(aggregate(&split, &b), aggregate(&merged, &b));

        let totals = group_and_sum(&split);
        assert_eq!(
            totals.get("Iowa"),
            Some(&StateTotals {
                dem_votes: 16.0,
                gop_votes: 28.0,
                total_votes: 45.0
            })
        );
    }

    #[test]
    fn row_order_does_not_matter() {
        let a = vec![
            rec("Ohio", 3.0, 4.0, 8.0),
            rec("Iowa", 1.0, 1.0, 2.0),
            rec("Ohio", 7.0, 1.0, 9.0),
        ];
        let b = vec![rec("Iowa", 2.0, 1.0, 3.0), rec("Ohio", 9.0, 9.0, 20.0)];
        let mut a2 = a.clone();
        a2.reverse();
        let mut b2 = b.clone();
        b2.reverse();
        assert_eq!(aggregate(&a, &b), aggregate(&a2, &b2));
        assert_eq!(aggregate(&a, &b), aggregate(&a, &b));
    }

    #[test]
    fn identical_shares_have_no_margin_shift() {
        let a = vec![rec("Idaho", 30.0, 70.0, 100.0)];
        let b = vec![rec("Idaho", 60.0, 140.0, 200.0)];
        let res = aggregate(&a, &b);
        let idaho = res.get("Idaho").unwrap();
        assert_eq!(idaho.margin_shift, 0.0);
        assert_eq!(idaho.margin_shift, idaho.dem_pct_2024 - idaho.dem_pct_2020);
        assert_eq!(idaho.total_shift, 100.0);
    }

    #[test]
    fn percentages_are_bounded() {
        let a = vec![
            rec("A", 0.0, 10.0, 10.0),
            rec("B", 10.0, 0.0, 10.0),
            rec("C", 3.0, 4.0, 9.0),
        ];
        let b = vec![
            rec("A", 10.0, 0.0, 10.0),
            rec("B", 0.0, 10.0, 10.0),
            rec("C", 1.0, 1.0, 7.0),
        ];
        let res = aggregate(&a, &b);
        for s in res.state_shifts.values() {
            for pct in [s.dem_pct_2020, s.dem_pct_2024, s.gop_pct_2020, s.gop_pct_2024] {
                assert!((0.0..=100.0).contains(&pct), "{:?}", s);
            }
            assert!((-100.0..=100.0).contains(&s.margin_shift));
        }
        assert_eq!(res.get("A").unwrap().margin_shift, 100.0);
        assert_eq!(res.get("B").unwrap().margin_shift, -100.0);
    }

    #[test]
    fn non_finite_values_count_as_zero() {
        init();
        let a = vec![
            rec("Nevada", f64::NAN, 5.0, 10.0),
            rec("Nevada", 4.0, f64::INFINITY, 10.0),
        ];
        let b = vec![rec("Nevada", 10.0, 10.0, 20.0), rec("Nevada", 1.0, 1.0, f64::NAN)];
        let res = aggregate(&a, &b);
        let nv = res.get("Nevada").unwrap();
        assert_eq!(nv.dem_shift, 7.0);
        assert_eq!(nv.gop_shift, 6.0);
        assert_eq!(nv.total_shift, 0.0);
        assert_eq!(nv.dem_pct_2020, 20.0);
        assert!(nv.margin_shift.is_finite());

        // A state whose only total is not a number has no comparison.
        let res = aggregate(&[rec("Nevada", 1.0, 1.0, f64::NAN)], &b);
        assert!(res.get("Nevada").is_none());
    }

    #[test]
    fn overflowing_sums_are_excluded() {
        init();
        let a = vec![
            rec("Ohio", 1e308, 1.0, 1e308),
            rec("Ohio", 1e308, 1.0, 1e308),
            rec("Iowa", 1e308, 1.0, 1e308),
        ];
        let b = vec![rec("Ohio", 1.0, 1.0, 2.0), rec("Iowa", 1.0, 1.0, 2.0)];
        let res = aggregate(&a, &b);
        assert!(res.get("Ohio").is_none());
        assert_eq!(res.all_state_names, names(&["Iowa", "Ohio"]));

        // Large but finite counts are still compared.
        let iowa = res.get("Iowa").unwrap();
        assert_eq!(iowa.dem_pct_2020, 100.0);
        assert_eq!(iowa.dem_pct_2024, 50.0);
        assert_eq!(iowa.margin_shift, -50.0);
        for s in res.state_shifts.values() {
            assert!(s.dem_shift.is_finite() && s.total_shift.is_finite());
        }
    }

    #[test]
    fn state_names_are_sorted_ordinally() {
        let a = vec![rec("ohio", 1.0, 1.0, 2.0), rec("Ohio", 1.0, 1.0, 2.0)];
        let b = vec![rec("Alaska", 1.0, 1.0, 2.0)];
        let res = aggregate(&a, &b);
        assert_eq!(res.all_state_names, names(&["Alaska", "Ohio", "ohio"]));
    }

    fn sample() -> AggregationResult {
        let a = vec![
            rec("Alabama", 40.0, 60.0, 100.0),
            rec("Colorado", 50.0, 50.0, 100.0),
            rec("Delaware", 50.0, 50.0, 100.0),
            rec("Florida", 45.0, 55.0, 100.0),
            rec("Georgia", 10.0, 10.0, 20.0),
        ];
        let b = vec![
            rec("Alabama", 35.0, 65.0, 100.0),
            rec("Brooklyn", 1.0, 1.0, 2.0),
            rec("Colorado", 60.0, 40.0, 100.0),
            rec("Delaware", 40.0, 60.0, 100.0),
            rec("Florida", 45.0, 55.0, 100.0),
        ];
        aggregate(&a, &b)
    }

    #[test]
    fn top_n_skips_states_without_shift() {
        init();
        let res = sample();
        assert_eq!(
            top_n_by_abs_shift(&res, ShiftMetric::MarginShift, 10),
            names(&["Colorado", "Delaware", "Alabama", "Florida"])
        );
        assert_eq!(
            top_n_by_abs_shift(&res, ShiftMetric::MarginShift, 1),
            names(&["Colorado"])
        );
        assert_eq!(
            top_n_by_abs_shift(&res, ShiftMetric::GopShift, 2),
            names(&["Colorado", "Delaware"])
        );
        assert!(top_n_by_abs_shift(&res, ShiftMetric::DemShift, 0).is_empty());
    }

    #[test]
    fn alphabetical_keeps_all_names() {
        let res = sample();
        assert_eq!(
            alphabetical(&res, 3),
            names(&["Alabama", "Brooklyn", "Colorado"])
        );
        assert_eq!(alphabetical(&res, 100).len(), 6);
    }

    #[test]
    fn select_and_chart() {
        let res = sample();
        let sel = select_states(&res, SortMode::Alphabetical, DisplayCount::Top(5));
        assert_eq!(
            sel,
            names(&["Alabama", "Brooklyn", "Colorado", "Delaware", "Florida"])
        );
        let rows = chart_rows(&res, &sel);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].state, "Alabama");
        assert_eq!(rows[0].margin_shift, -5.0);
        assert_eq!(rows[0].gop_shift, 5.0);

        let sel = select_states(
            &res,
            SortMode::ByMetric(ShiftMetric::DemShift),
            DisplayCount::All,
        );
        assert_eq!(sel, names(&["Colorado", "Delaware", "Alabama", "Florida"]));
    }

    #[test]
    fn parse_display_options() {
        assert_eq!(DisplayCount::parse("10"), Some(DisplayCount::Top(10)));
        assert_eq!(DisplayCount::parse("all"), Some(DisplayCount::All));
        assert_eq!(DisplayCount::parse("7"), None);
        assert_eq!(DisplayCount::parse("ten"), None);
        for m in SortMode::ALL_MODES {
            assert_eq!(SortMode::parse(m.name()), Some(m));
        }
        for t in DisplayCount::TIERS {
            assert_eq!(DisplayCount::parse(&t.name()), Some(t));
        }
        assert_eq!(SortMode::parse("Margin"), None);
    }
}
