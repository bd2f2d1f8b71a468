use crate::config::UiConfig;
use crate::data::fetch::{fetch, LightCurveSource};
use crate::data::model::{DisplayWindow, FluxVariant, ObservationSeries};
use crate::error::{ActionError, FetchError, RenderError};
use crate::ui::plot::PlotRenderer;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A modal message waiting to be dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: &'static str,
    pub message: String,
}

impl From<&ActionError> for Notification {
    fn from(err: &ActionError) -> Self {
        Self {
            title: err.title(),
            message: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// TIC ID text field.
    pub tic_input: String,

    /// Selected flux channel.
    pub variant: FluxVariant,

    /// BJD range text fields.
    pub bjd_min: String,
    pub bjd_max: String,

    /// Last successfully fetched light curve. `None` makes Refresh inert.
    pub series: Option<ObservationSeries>,

    /// Owner of the single live plot.
    pub renderer: PlotRenderer,

    /// Error waiting to be acknowledged.
    pub notification: Option<Notification>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tic_input: String::new(),
            variant: FluxVariant::default(),
            bjd_min: String::new(),
            bjd_max: String::new(),
            series: None,
            renderer: PlotRenderer::default(),
            notification: None,
        }
    }
}

impl AppState {
    /// Start-up state. An unknown default channel in the config is reported
    /// and replaced by Corrected Flux.
    pub fn new(ui: &UiConfig) -> Self {
        let mut state = Self::default();
        match ui.default_variant.parse::<FluxVariant>() {
            Ok(v) => state.variant = v,
            Err(e) => {
                log::warn!("config ui.default_variant: {e}");
                state.notify(&ActionError::from(e));
            }
        }
        state
    }

    /// Fetch the light curve for the current TIC ID and channel, reset the
    /// BJD range to the new series and plot it.
    pub fn generate(&mut self, source: &dyn LightCurveSource) -> Result<(), ActionError> {
        let series = match fetch(source, &self.tic_input, self.variant) {
            Ok(s) => s,
            Err(e @ FetchError::VariantUnavailable(_)) => {
                // The plot stays on screen but can no longer be refreshed.
                self.series = None;
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        let window = series
            .default_window()
            .ok_or(RenderError::EmptySelection)?;

        self.bjd_min = window.min().to_string();
        self.bjd_max = window.max().to_string();
        let series: &ObservationSeries = self.series.insert(series);
        self.renderer
            .render(series, &window, series.variant().label(), &series.title())?;
        Ok(())
    }

    /// Re-plot the held series over the BJD range in the text fields.
    pub fn refresh(&mut self) -> Result<(), ActionError> {
        let series = self.series.as_ref().ok_or(RenderError::NoData)?;
        let window = DisplayWindow::parse(&self.bjd_min, &self.bjd_max).map_err(RenderError::from)?;
        self.renderer
            .render(series, &window, series.variant().label(), &series.title())?;
        Ok(())
    }

    /// Button handler: run `generate`, turn a failure into a notification.
    pub fn on_generate(&mut self, source: &dyn LightCurveSource) {
        if let Err(e) = self.generate(source) {
            log::error!("Generate failed: {e}");
            self.notify(&e);
        }
    }

    /// Button handler: run `refresh`, turn a failure into a notification.
    pub fn on_refresh(&mut self) {
        if let Err(e) = self.refresh() {
            log::error!("Refresh failed: {e}");
            self.notify(&e);
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.series.is_some()
    }

    pub fn notify(&mut self, err: &ActionError) {
        self.notification = Some(Notification::from(err));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fetch::tests::{sample_product, FakeSource};
    use crate::error::InputError;

    fn generated(source: &FakeSource) -> AppState {
        let mut state = AppState::default();
        state.tic_input = "38846515".to_string();
        state.generate(source).unwrap();
        state
    }

    #[test]
    fn generate_sets_default_window_and_plots_everything() {
        let source = FakeSource::with(sample_product(false));
        let state = generated(&source);

        let series = state.series.as_ref().unwrap();
        let max_time = series.time().iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(state.bjd_min, "1325");
        assert_eq!(state.bjd_max.parse::<f64>().unwrap(), max_time.ceil());

        let plot = state.renderer.current().unwrap();
        assert_eq!(plot.points.len(), series.len());
        assert_eq!(plot.label, "Corrected Flux");
        assert_eq!(plot.title, "Light Curve for TIC 38846515");
    }

    #[test]
    fn missing_pca_keeps_plot_and_disables_refresh() {
        let source = FakeSource::with(sample_product(false));
        let mut state = generated(&source);
        let before = state.renderer.current().cloned();

        state.variant = FluxVariant::Pca;
        let err = state.generate(&source).unwrap_err();
        assert!(matches!(
            err,
            ActionError::Fetch(FetchError::VariantUnavailable(FluxVariant::Pca))
        ));
        assert_eq!(state.renderer.current().cloned(), before);
        assert!(!state.can_refresh());
        assert!(matches!(
            state.refresh().unwrap_err(),
            ActionError::Render(RenderError::NoData)
        ));
    }

    #[test]
    fn inverted_range_is_rejected_and_plot_unchanged() {
        let source = FakeSource::with(sample_product(false));
        let mut state = generated(&source);
        let before = state.renderer.current().cloned();

        state.bjd_min = "5".to_string();
        state.bjd_max = "3".to_string();
        let err = state.refresh().unwrap_err();
        assert!(matches!(
            err,
            ActionError::Render(RenderError::Input(InputError::InvertedWindow))
        ));
        assert_eq!(state.renderer.current().cloned(), before);
    }

    #[test]
    fn empty_tic_is_rejected_without_fetching() {
        let source = FakeSource::with(sample_product(true));
        let mut state = AppState::default();
        state.on_generate(&source);

        assert_eq!(source.calls.get(), 0);
        assert!(state.series.is_none());
        let note = state.notification.clone().unwrap();
        assert_eq!(note.title, "Input Error");
        assert_eq!(note.message, InputError::MissingIdentifier.to_string());
        state.dismiss_notification();
        assert!(state.notification.is_none());
    }

    #[test]
    fn refresh_narrows_without_refetching() {
        let source = FakeSource::with(sample_product(false));
        let mut state = generated(&source);

        state.bjd_min = "1327".to_string();
        state.bjd_max = "1331".to_string();
        state.refresh().unwrap();

        assert_eq!(source.calls.get(), 1);
        let plot = state.renderer.current().unwrap();
        assert_eq!(plot.generation, 2);
        assert!(plot.points.iter().all(|[t, _]| (1327.0..=1331.0).contains(t)));
        assert!(plot.points.len() < plot.total);
    }

    #[test]
    fn range_outside_the_data_is_a_range_error() {
        let source = FakeSource::with(sample_product(false));
        let mut state = generated(&source);

        state.bjd_min = "2000".to_string();
        state.bjd_max = "2100".to_string();
        state.on_refresh();
        assert_eq!(state.notification.as_ref().unwrap().title, "Range Error");
        assert_eq!(state.renderer.current().unwrap().generation, 1);
    }

    #[test]
    fn failed_fetch_keeps_previous_series() {
        let good = FakeSource::with(sample_product(false));
        let mut state = generated(&good);

        let failing = FakeSource::failing();
        state.on_generate(&failing);
        assert!(state.can_refresh());
        assert_eq!(state.notification.as_ref().unwrap().title, "Error");
        state.refresh().unwrap();
    }

    #[test]
    fn unknown_default_variant_is_reported_at_start_up() {
        let ui = UiConfig {
            default_variant: "SAP Flux".to_string(),
            ..UiConfig::default()
        };
        let state = AppState::new(&ui);
        assert_eq!(state.variant, FluxVariant::Corrected);
        assert_eq!(state.notification.as_ref().unwrap().title, "Flux Error");

        let ui = UiConfig {
            default_variant: "Raw Flux".to_string(),
            ..UiConfig::default()
        };
        assert_eq!(AppState::new(&ui).variant, FluxVariant::Raw);
    }
}
