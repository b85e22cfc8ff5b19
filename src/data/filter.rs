use super::model::{IceSeries, Observation};

// ---------------------------------------------------------------------------
// Selection – the three user inputs of one interaction event
// ---------------------------------------------------------------------------

/// What the user currently wants to see: one region and an inclusive year
/// range. One instance per interaction event.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub region: String,
    pub year_min: i32,
    pub year_max: i32,
}

impl Selection {
    pub fn matches(&self, obs: &Observation) -> bool {
        obs.region == self.region && (self.year_min..=self.year_max).contains(&obs.year())
    }
}

/// Return the observations passing the selection, in series order.
///
/// The result owns its data; nothing aliases back into the series. An empty
/// result (including `year_min > year_max`) is valid and renders as an
/// empty plot.
pub fn apply(series: &IceSeries, selection: &Selection) -> Vec<Observation> {
    series
        .observations
        .iter()
        .filter(|obs| selection.matches(obs))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(year: i32, month: u32, region: &str) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            region: region.to_string(),
            extent: Some(10.0),
        }
    }

    fn series() -> IceSeries {
        IceSeries::from_observations(vec![
            obs(1990, 1, "Arctic"),
            obs(1990, 1, "Antarctica"),
            obs(1995, 6, "Arctic"),
            obs(2000, 9, "Arctic"),
        ])
    }

    #[test]
    fn retains_exactly_the_matching_subset() {
        let s = series();
        let sel = Selection {
            region: "Arctic".to_string(),
            year_min: 1990,
            year_max: 1995,
        };
        let filtered = apply(&s, &sel);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|o| sel.matches(o)));
        // Subset of the source series.
        assert!(filtered.iter().all(|o| s.observations.contains(o)));
    }

    #[test]
    fn preserves_chronological_order() {
        let sel = Selection {
            region: "Arctic".to_string(),
            year_min: 1990,
            year_max: 2000,
        };
        let filtered = apply(&series(), &sel);
        let years: Vec<i32> = filtered.iter().map(|o| o.year()).collect();
        assert_eq!(years, vec![1990, 1995, 2000]);
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let sel = Selection {
            region: "Arctic".to_string(),
            year_min: 2010,
            year_max: 2020,
        };
        assert!(apply(&series(), &sel).is_empty());
    }

    #[test]
    fn inverted_year_range_yields_empty() {
        let sel = Selection {
            region: "Arctic".to_string(),
            year_min: 2000,
            year_max: 1990,
        };
        assert!(apply(&series(), &sel).is_empty());
    }
}
