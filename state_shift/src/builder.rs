pub use crate::config::*;

/// A builder for collecting county rows before running the comparison.
///
/// It is convenient when the rows of both years come from several sources.
///
/// ```
/// pub use state_shift::builder::Builder;
/// pub use state_shift::{CountyRecord, Year};
/// # use state_shift::AggregationErrors;
///
/// let mut builder = Builder::new();
/// builder.add_county(Year::A, CountyRecord::new("Ohio", 40.0, 60.0, 100.0));
/// builder.add_county(Year::B, CountyRecord::new("Ohio", 55.0, 45.0, 100.0));
///
/// let result = builder.build_checked()?;
/// assert_eq!(result.get("Ohio").map(|s| s.margin_shift), Some(15.0));
///
/// # Ok::<(), AggregationErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _counties_a: Vec<CountyRecord>,
    pub(crate) _counties_b: Vec<CountyRecord>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn add_county(&mut self, year: Year, county: CountyRecord) {
        match year {
            Year::A => self._counties_a.push(county),
            Year::B => self._counties_b.push(county),
        }
    }

    pub fn add_counties(&mut self, year: Year, counties: &[CountyRecord]) {
        for c in counties {
            self.add_county(year, c.clone());
        }
    }

    pub fn counties(&self, year: Year) -> &[CountyRecord] {
        match year {
            Year::A => &self._counties_a,
            Year::B => &self._counties_b,
        }
    }

    /// Runs the aggregation on all the rows added so far.
    pub fn build(&self) -> AggregationResult {
        crate::aggregate(&self._counties_a, &self._counties_b)
    }

    /// Same as `build`, but refuses to run if one of the years has no rows at all.
    pub fn build_checked(&self) -> Result<AggregationResult, AggregationErrors> {
        if self._counties_a.is_empty() {
            return Err(AggregationErrors::EmptyDataset(Year::A));
        }
        if self._counties_b.is_empty() {
            return Err(AggregationErrors::EmptyDataset(Year::B));
        }
        Ok(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_checked_requires_both_years() {
        let mut b = Builder::new();
        assert_eq!(
            b.build_checked(),
            Err(AggregationErrors::EmptyDataset(Year::A))
        );
        b.add_counties(
            Year::A,
            &[
                CountyRecord::new("Ohio", 1.0, 1.0, 2.0),
                CountyRecord::new("Ohio", 1.0, 3.0, 4.0),
            ],
        );
        assert_eq!(
            b.build_checked(),
            Err(AggregationErrors::EmptyDataset(Year::B))
        );
        // The unchecked path simply reports nothing to compare.
        let res = b.build();
        assert!(res.state_shifts.is_empty());
        assert_eq!(res.all_state_names, vec!["Ohio".to_string()]);

        b.add_county(Year::B, CountyRecord::new("Ohio", 3.0, 3.0, 6.0));
        let res = b.build_checked().unwrap();
        assert_eq!(res.get("Ohio").unwrap().dem_shift, 1.0);
        assert_eq!(b.counties(Year::A).len(), 2);
    }
}
