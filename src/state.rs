use crate::data::filter::{self, Selection};
use crate::data::model::IceSeries;
use crate::data::trend::{compute_trend, RenderBundle, TrendMode};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `series` is the immutable dataset injected at startup; every input change
/// synchronously re-runs filter + trend and replaces `bundle`. Nothing else
/// is cached across interaction events.
pub struct AppState {
    /// The normalized series, read-only for the process lifetime.
    pub series: IceSeries,

    /// Current region + year-range selection.
    pub selection: Selection,

    /// Current overlay mode.
    pub trend_mode: TrendMode,

    /// Plot-ready output of the latest recomputation.
    pub bundle: RenderBundle,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state: first region, full observed year range, no
    /// overlay.
    pub fn new(series: IceSeries) -> Self {
        let (year_min, year_max) = series.year_bounds().unwrap_or((0, 0));
        let region = series.regions.first().cloned().unwrap_or_default();

        let mut state = AppState {
            series,
            selection: Selection {
                region,
                year_min,
                year_max,
            },
            trend_mode: TrendMode::default(),
            bundle: RenderBundle::default(),
            status_message: None,
        };
        state.recompute();
        state
    }

    /// Re-run filter + trend for the current inputs. A degenerate trend is
    /// downgraded to "no overlay" with a status message; it never aborts
    /// the session.
    pub fn recompute(&mut self) {
        let filtered = filter::apply(&self.series, &self.selection);

        self.status_message = None;
        let overlay = match compute_trend(&filtered, self.trend_mode) {
            Ok(overlay) => overlay,
            Err(e) => {
                log::debug!("trend unavailable: {e}");
                self.status_message = Some(e.to_string());
                None
            }
        };

        self.bundle = RenderBundle::new(&filtered, overlay);
    }

    /// Observations passing the current filter (recorded or missing).
    pub fn visible_count(&self) -> usize {
        self.series
            .observations
            .iter()
            .filter(|obs| self.selection.matches(obs))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;
    use chrono::NaiveDate;

    fn obs(year: i32, month: u32, region: &str, extent: Option<f64>) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            region: region.to_string(),
            extent,
        }
    }

    fn state() -> AppState {
        AppState::new(IceSeries::from_observations(vec![
            obs(2010, 1, "Arctic", Some(14.0)),
            obs(2010, 7, "Arctic", Some(8.0)),
            obs(2011, 1, "Arctic", Some(13.5)),
            obs(2010, 1, "Antarctica", Some(4.0)),
        ]))
    }

    #[test]
    fn initial_selection_covers_the_full_series() {
        let state = state();
        assert_eq!(state.selection.region, "Arctic");
        assert_eq!(state.selection.year_min, 2010);
        assert_eq!(state.selection.year_max, 2011);
        assert_eq!(state.bundle.base.len(), 3);
        assert!(state.bundle.overlay.is_none());
    }

    #[test]
    fn changing_inputs_rebuilds_the_bundle() {
        let mut state = state();
        state.selection.year_max = 2010;
        state.trend_mode = TrendMode::Yearly;
        state.recompute();
        assert_eq!(state.bundle.base.len(), 2);
        let overlay = state.bundle.overlay.as_ref().unwrap();
        assert_eq!(overlay.points[0][1], 11.0);
    }

    #[test]
    fn degenerate_linear_fit_degrades_to_no_overlay() {
        let mut state = state();
        state.selection.year_max = 2010;
        state.selection.year_min = 2010;
        state.selection.region = "Antarctica".to_string();
        state.trend_mode = TrendMode::Linear;
        state.recompute();
        assert!(state.bundle.overlay.is_none());
        assert!(state.status_message.is_some());
        // The base series still renders.
        assert_eq!(state.bundle.base.len(), 1);
    }

    #[test]
    fn empty_series_still_builds_a_state() {
        let state = AppState::new(IceSeries::default());
        assert!(state.bundle.base.is_empty());
        assert_eq!(state.visible_count(), 0);
    }
}
