mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::LightCurveApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();
    log::debug!("{config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TESS Light Curve Generator (eleanor products via MAST)",
        options,
        Box::new(move |_cc| Ok(Box::new(LightCurveApp::new(&config)))),
    )
}
