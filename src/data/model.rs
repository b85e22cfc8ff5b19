use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Observation – one normalized monthly measurement
// ---------------------------------------------------------------------------

/// The sentinel the source archive writes for an unrecorded measurement.
pub const MISSING_SENTINEL: f64 = -9999.0;

/// One monthly sea-ice-extent measurement, normalized from a source row.
///
/// `date` is always the first of the month since the source granularity is
/// monthly. `extent` is in millions of square kilometers; `None` replaces
/// the −9999 sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub region: String,
    pub extent: Option<f64>,
}

impl Observation {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

// ---------------------------------------------------------------------------
// IceSeries – the complete merged dataset
// ---------------------------------------------------------------------------

/// The full normalized series with pre-computed region labels and year
/// bounds. Built once at startup, never mutated afterwards; the filter and
/// trend layers only read it and produce their own derived sequences.
#[derive(Debug, Clone, Default)]
pub struct IceSeries {
    /// All observations, sorted ascending by (year, month).
    pub observations: Vec<Observation>,
    /// Distinct region labels in order of first appearance.
    pub regions: Vec<String>,
    year_bounds: Option<(i32, i32)>,
}

impl IceSeries {
    /// Merge raw observations into the canonical series: sort ascending by
    /// (year, month) and drop duplicate (region, year, month) entries so
    /// exactly one observation per key remains.
    pub fn from_observations(mut observations: Vec<Observation>) -> Self {
        observations.sort_by(|a, b| {
            (a.year(), a.month(), &a.region).cmp(&(b.year(), b.month(), &b.region))
        });

        let before = observations.len();
        observations.dedup_by(|a, b| {
            a.region == b.region && a.year() == b.year() && a.month() == b.month()
        });
        if observations.len() < before {
            log::warn!(
                "dropped {} duplicate (region, year, month) observations",
                before - observations.len()
            );
        }

        let mut regions: Vec<String> = Vec::new();
        for obs in &observations {
            if !regions.iter().any(|r| r == &obs.region) {
                regions.push(obs.region.clone());
            }
        }

        let year_bounds = match (observations.first(), observations.last()) {
            (Some(first), Some(last)) => Some((first.year(), last.year())),
            _ => None,
        };

        IceSeries {
            observations,
            regions,
            year_bounds,
        }
    }

    /// (min, max) of observed years, `None` for an empty series.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Plot ordinals – dates on the x axis
// ---------------------------------------------------------------------------

/// Map a date onto the plot x axis (days from the Common Era). Also the
/// numeric ordinal the linear trend regresses against.
pub fn date_ordinal(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_ordinal`], for axis labels.
pub fn ordinal_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(year: i32, month: u32, region: &str, extent: Option<f64>) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            region: region.to_string(),
            extent,
        }
    }

    #[test]
    fn from_observations_sorts_by_year_then_month() {
        let series = IceSeries::from_observations(vec![
            obs(2001, 3, "Arctic", Some(14.0)),
            obs(2000, 12, "Arctic", Some(12.0)),
            obs(2001, 1, "Arctic", Some(13.0)),
        ]);
        let keys: Vec<(i32, u32)> = series
            .observations
            .iter()
            .map(|o| (o.year(), o.month()))
            .collect();
        assert_eq!(keys, vec![(2000, 12), (2001, 1), (2001, 3)]);
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn duplicate_region_months_collapse_to_one() {
        let series = IceSeries::from_observations(vec![
            obs(1990, 6, "Arctic", Some(11.5)),
            obs(1990, 6, "Arctic", Some(11.7)),
            obs(1990, 6, "Antarctica", Some(13.0)),
        ]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn year_bounds_span_first_and_last() {
        let series = IceSeries::from_observations(vec![
            obs(1979, 1, "Arctic", Some(15.4)),
            obs(2023, 12, "Arctic", Some(12.1)),
        ]);
        assert_eq!(series.year_bounds(), Some((1979, 2023)));
        assert_eq!(IceSeries::default().year_bounds(), None);
    }

    #[test]
    fn regions_keep_first_seen_order() {
        let series = IceSeries::from_observations(vec![
            obs(1980, 1, "Antarctica", Some(5.0)),
            obs(1980, 2, "Arctic", Some(15.0)),
            obs(1980, 3, "Antarctica", Some(4.0)),
        ]);
        assert_eq!(series.regions, vec!["Antarctica", "Arctic"]);
    }

    #[test]
    fn ordinal_round_trips_through_date() {
        let date = NaiveDate::from_ymd_opt(2012, 9, 1).unwrap();
        assert_eq!(ordinal_date(date_ordinal(date)), Some(date));
    }
}
