mod actions;
mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PressureCurvesApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config::APP_TITLE)
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PressureCurvesApp::default()))),
    )
}
