use eframe::egui::{Ui, RichText};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::variant_color;
use crate::data::filter::select_window;
use crate::data::model::{DisplayWindow, FluxVariant, ObservationSeries};
use crate::error::RenderError;

pub const X_AXIS_LABEL: &str = "Time [BJD - 2457000]";
pub const Y_AXIS_LABEL: &str = "Normalized Flux";

// ---------------------------------------------------------------------------
// Plot handle
// ---------------------------------------------------------------------------

/// One finished render: the window-filtered points plus everything needed to
/// draw them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPlot {
    /// Increments on every successful render; keys the egui plot id so a new
    /// plot starts without the old one's zoom and pan.
    pub generation: u64,
    pub title: String,
    pub label: String,
    pub variant: FluxVariant,
    pub window: DisplayWindow,
    pub points: Vec<[f64; 2]>,
    /// Length of the series the points were taken from.
    pub total: usize,
}

/// Owns the single live plot. A failed render leaves it untouched.
#[derive(Debug, Default)]
pub struct PlotRenderer {
    current: Option<RenderedPlot>,
    generation: u64,
}

impl PlotRenderer {
    pub fn render(
        &mut self,
        series: &ObservationSeries,
        window: &DisplayWindow,
        label: &str,
        title: &str,
    ) -> Result<&RenderedPlot, RenderError> {
        let points = select_window(series, window)?;

        self.generation += 1;
        let plot = RenderedPlot {
            generation: self.generation,
            title: title.to_string(),
            label: label.to_string(),
            variant: series.variant(),
            window: *window,
            points,
            total: series.len(),
        };
        log::debug!(
            "plot #{}: {} of {} points in [{}, {}]",
            plot.generation,
            plot.points.len(),
            plot.total,
            window.min(),
            window.max()
        );
        Ok(&*self.current.insert(plot))
    }

    pub fn current(&self) -> Option<&RenderedPlot> {
        self.current.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Light curve plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current light curve in the central panel.
pub fn light_curve_plot(ui: &mut Ui, renderer: &PlotRenderer, marker_radius: f32) {
    let plot = match renderer.current() {
        Some(p) => p,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Enter a TIC ID and press Generate Light Curve");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&plot.title).heading().strong());
    });

    // NaN flux survives normalisation; matplotlib skips it, so do we.
    let points: PlotPoints = plot
        .points
        .iter()
        .filter(|[t, f]| t.is_finite() && f.is_finite())
        .copied()
        .collect();

    Plot::new(("light_curve", plot.generation))
        .legend(Legend::default())
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .show_grid(true)
        .include_x(plot.window.min())
        .include_x(plot.window.max())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let markers = Points::new(points)
                .name(&plot.label)
                .color(variant_color(plot.variant))
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(marker_radius);
            plot_ui.points(markers);
        });
}
