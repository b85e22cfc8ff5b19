use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::trend::TrendMode;
use crate::state::AppState;

const DESCRIPTION: &str = "The sea ice extent is the expanse of sea covered by ice at a \
    greater than 15% concentration. This simple dashboard makes it possible to observe \
    the change in sea ice extent over time in both the Arctic and Antarctic regions. \
    Notice the strong cyclic nature driven by seasonal temperature patterns.";

// ---------------------------------------------------------------------------
// Right side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the control panel: region, year range, and trend selection.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sea Ice Extent in the Arctic and Antarctic Regions");
    ui.add_space(8.0);
    ui.label(DESCRIPTION);
    ui.separator();

    let Some((first_year, last_year)) = state.series.year_bounds() else {
        ui.label("No observations loaded.");
        return;
    };
    // Clone so we can mutate state inside the loop.
    let regions = state.series.regions.clone();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Region");
            for region in &regions {
                changed |= ui
                    .radio_value(&mut state.selection.region, region.clone(), region)
                    .changed();
            }
            ui.separator();

            ui.strong("Choose the years you would like to display");
            // The two sliders clamp against each other so the range can
            // never invert from the UI.
            let upper = state.selection.year_max;
            changed |= ui
                .add(egui::Slider::new(&mut state.selection.year_min, first_year..=upper).text("From"))
                .changed();
            let lower = state.selection.year_min;
            changed |= ui
                .add(egui::Slider::new(&mut state.selection.year_max, lower..=last_year).text("To"))
                .changed();
            ui.separator();

            ui.strong("Display Trend");
            changed |= ui
                .radio_value(&mut state.trend_mode, TrendMode::None, "None")
                .changed();
            changed |= ui
                .radio_value(&mut state.trend_mode, TrendMode::Yearly, "Yearly")
                .changed();
            changed |= ui
                .radio_value(&mut state.trend_mode, TrendMode::Linear, "Linear")
                .changed();
        });

    if changed {
        state.recompute();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("icewatch").strong());
        ui.separator();

        ui.label(format!(
            "{} observations loaded, {} in view",
            state.series.len(),
            state.visible_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
