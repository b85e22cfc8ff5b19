use eframe::egui;

use crate::data::model::IceSeries;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IcewatchApp {
    pub state: AppState,
}

impl IcewatchApp {
    pub fn new(series: IceSeries) -> Self {
        IcewatchApp {
            state: AppState::new(series),
        }
    }
}

impl eframe::App for IcewatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Right side panel: selection controls ----
        egui::SidePanel::right("control_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::extent_plot(ui, &self.state);
        });
    }
}
