mod app;
mod archive;
mod data;
mod state;
mod ui;

use app::IcewatchApp;
use archive::CacheStatus;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let cache_dir = archive::default_cache_dir();
    match archive::ensure_cached(&cache_dir) {
        Ok(CacheStatus::Ready) => {}
        Ok(CacheStatus::Declined) => {
            eprintln!("You need to download the data for the dashboard to work...");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("cache setup failed: {e:#}");
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }

    // Loaded once; the running session never reloads or mutates it.
    let series = match data::loader::load_dir(&cache_dir) {
        Ok(series) => series,
        Err(e) => {
            log::error!("loading cached data failed: {e:#}");
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Icewatch – Sea Ice Extent",
        options,
        Box::new(|_cc| Ok(Box::new(IcewatchApp::new(series)))),
    )
}
