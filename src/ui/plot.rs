use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::data::model::ordinal_date;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Extent plot (central panel)
// ---------------------------------------------------------------------------

/// Render the extent series and, when present, the trend overlay.
pub fn extent_plot(ui: &mut Ui, state: &AppState) {
    if state.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No cached data found – restart after downloading the archive.");
        });
        return;
    }

    Plot::new("extent_plot")
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Extent (Millions of square Kilometers)")
        .x_axis_formatter(|mark, _range| {
            ordinal_date(mark.value)
                .map(|date| date.format("%Y-%m").to_string())
                .unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let base: PlotPoints = PlotPoints::from(state.bundle.base.clone());
            plot_ui.line(
                Line::new(base)
                    .name(&state.selection.region)
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );

            if let Some(overlay) = &state.bundle.overlay {
                let points: PlotPoints = PlotPoints::from(overlay.points.clone());
                plot_ui.line(
                    Line::new(points)
                        .name(&overlay.label)
                        .color(Color32::RED)
                        .width(2.0),
                );
            }
        });
}
