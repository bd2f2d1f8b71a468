use eframe::egui;

use crate::config::AppConfig;
use crate::data::fetch::LightCurveSource;
use crate::data::mast::MastSource;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LightCurveApp {
    pub state: AppState,
    source: Box<dyn LightCurveSource>,
    marker_radius: f32,
}

impl LightCurveApp {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::new(&config.ui),
            source: Box::new(MastSource::new(&config.mast)),
            marker_radius: config.ui.marker_radius,
        }
    }
}

impl eframe::App for LightCurveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: controls ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::controls(ui, &mut self.state, self.source.as_ref());
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::light_curve_plot(ui, &self.state.renderer, self.marker_radius);
        });

        panels::notification(ctx, &mut self.state);
    }
}
