use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{date_ordinal, Observation};

// ---------------------------------------------------------------------------
// Trend modes
// ---------------------------------------------------------------------------

/// Which overlay to compute on top of the filtered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendMode {
    #[default]
    None,
    Yearly,
    Linear,
}

/// A computed overlay, ready to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrendError {
    #[error("a linear trend needs at least two recorded measurements, found {0}")]
    DegenerateFit(usize),
}

// ---------------------------------------------------------------------------
// Trend engine
// ---------------------------------------------------------------------------

/// Compute the overlay for a filtered series. Purely functional: the input
/// is never modified and the result owns all of its points.
///
/// A degenerate linear fit is reported as an error so the caller can show
/// the plot without an overlay instead of drawing a fabricated line.
pub fn compute_trend(
    filtered: &[Observation],
    mode: TrendMode,
) -> Result<Option<TrendSeries>, TrendError> {
    match mode {
        TrendMode::None => Ok(None),
        TrendMode::Yearly => Ok(yearly_means(filtered)),
        TrendMode::Linear => linear_fit(filtered).map(Some),
    }
}

/// Per-calendar-year mean of the non-missing extents, plotted at the
/// midpoint of the year (July 1). Years with no recorded values are
/// omitted rather than zero-filled.
fn yearly_means(filtered: &[Observation]) -> Option<TrendSeries> {
    let mut by_year: BTreeMap<i32, (f64, u32)> = BTreeMap::new();
    for obs in filtered {
        if let Some(extent) = obs.extent {
            let (sum, count) = by_year.entry(obs.year()).or_insert((0.0, 0));
            *sum += extent;
            *count += 1;
        }
    }

    let points: Vec<[f64; 2]> = by_year
        .into_iter()
        .filter_map(|(year, (sum, count))| {
            let midpoint = NaiveDate::from_ymd_opt(year, 7, 1)?;
            Some([date_ordinal(midpoint), sum / count as f64])
        })
        .collect();

    if points.is_empty() {
        return None;
    }
    Some(TrendSeries {
        label: "Yearly Trend".to_string(),
        points,
    })
}

/// Ordinary-least-squares fit of extent against the date ordinal, evaluated
/// at each retained (non-missing) date in their original order.
fn linear_fit(filtered: &[Observation]) -> Result<TrendSeries, TrendError> {
    let samples: Vec<(f64, f64)> = filtered
        .iter()
        .filter_map(|obs| obs.extent.map(|extent| (date_ordinal(obs.date), extent)))
        .collect();

    if samples.len() < 2 {
        return Err(TrendError::DegenerateFit(samples.len()));
    }

    let n = samples.len() as f64;
    let x_mean = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = samples.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in &samples {
        covariance += (x - x_mean) * (y - y_mean);
        variance += (x - x_mean) * (x - x_mean);
    }
    if variance == 0.0 {
        // All points on one date; the merge invariant makes this unreachable
        // for a single region, but a fit over it would still be undefined.
        return Err(TrendError::DegenerateFit(samples.len()));
    }

    let slope = covariance / variance;
    let intercept = y_mean - slope * x_mean;

    let points = samples
        .iter()
        .map(|(x, _)| [*x, slope * x + intercept])
        .collect();

    Ok(TrendSeries {
        label: "Linear Trend".to_string(),
        points,
    })
}

// ---------------------------------------------------------------------------
// RenderBundle – what one interaction event hands to the plot
// ---------------------------------------------------------------------------

/// The plot-ready output of one interaction event: the filtered base series
/// plus at most one overlay. Rebuilt fresh on every input change.
#[derive(Debug, Clone, Default)]
pub struct RenderBundle {
    /// (date ordinal, extent) points; missing measurements are dropped so
    /// the line breaks where data is absent.
    pub base: Vec<[f64; 2]>,
    pub overlay: Option<TrendSeries>,
}

impl RenderBundle {
    pub fn new(filtered: &[Observation], overlay: Option<TrendSeries>) -> Self {
        let base = filtered
            .iter()
            .filter_map(|obs| obs.extent.map(|extent| [date_ordinal(obs.date), extent]))
            .collect();
        RenderBundle { base, overlay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(year: i32, month: u32, extent: Option<f64>) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            region: "Arctic".to_string(),
            extent,
        }
    }

    #[test]
    fn none_mode_yields_no_overlay() {
        let filtered = vec![obs(2010, 1, Some(5.0))];
        assert_eq!(compute_trend(&filtered, TrendMode::None), Ok(None));
    }

    #[test]
    fn yearly_mean_averages_recorded_values_and_omits_empty_years() {
        let filtered = vec![
            obs(2010, 1, Some(5.0)),
            obs(2010, 7, Some(7.0)),
            obs(2011, 1, None),
        ];
        let trend = compute_trend(&filtered, TrendMode::Yearly)
            .unwrap()
            .unwrap();
        assert_eq!(trend.label, "Yearly Trend");
        // 2011 has zero recorded values and is omitted entirely.
        assert_eq!(trend.points.len(), 1);
        let midpoint = date_ordinal(NaiveDate::from_ymd_opt(2010, 7, 1).unwrap());
        assert_eq!(trend.points[0], [midpoint, 6.0]);
    }

    #[test]
    fn yearly_mean_over_missing_only_series_yields_no_overlay() {
        let filtered = vec![obs(2010, 1, None), obs(2011, 1, None)];
        assert_eq!(compute_trend(&filtered, TrendMode::Yearly), Ok(None));
    }

    #[test]
    fn linear_fit_with_one_recorded_point_is_degenerate() {
        let filtered = vec![obs(2010, 1, Some(5.0)), obs(2010, 2, None)];
        assert_eq!(
            compute_trend(&filtered, TrendMode::Linear),
            Err(TrendError::DegenerateFit(1))
        );
    }

    #[test]
    fn linear_fit_recovers_an_exact_line() {
        // Extents constructed to lie exactly on y = 0.01 * x + 2 in date
        // ordinals, so the fitted line must reproduce them.
        let dates = [(2000, 1), (2000, 6), (2001, 3), (2002, 9)];
        let filtered: Vec<Observation> = dates
            .iter()
            .map(|&(y, m)| {
                let date = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
                Observation {
                    date,
                    region: "Arctic".to_string(),
                    extent: Some(0.01 * date_ordinal(date) + 2.0),
                }
            })
            .collect();

        let trend = compute_trend(&filtered, TrendMode::Linear)
            .unwrap()
            .unwrap();
        assert_eq!(trend.label, "Linear Trend");
        assert_eq!(trend.points.len(), filtered.len());
        for (point, obs) in trend.points.iter().zip(&filtered) {
            assert_eq!(point[0], date_ordinal(obs.date));
            assert!((point[1] - obs.extent.unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn linear_fit_skips_missing_and_keeps_date_order() {
        let filtered = vec![
            obs(2000, 1, Some(10.0)),
            obs(2000, 2, None),
            obs(2000, 3, Some(9.0)),
            obs(2000, 4, Some(8.0)),
        ];
        let trend = compute_trend(&filtered, TrendMode::Linear)
            .unwrap()
            .unwrap();
        assert_eq!(trend.points.len(), 3);
        assert!(trend.points.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn render_bundle_drops_missing_from_the_base_series() {
        let filtered = vec![
            obs(2000, 1, Some(10.0)),
            obs(2000, 2, None),
            obs(2000, 3, Some(9.0)),
        ];
        let bundle = RenderBundle::new(&filtered, None);
        assert_eq!(bundle.base.len(), 2);
        assert!(bundle.overlay.is_none());
    }
}
