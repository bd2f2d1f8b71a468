use eframe::egui::{self, Align2, Button, Context, RichText, TextEdit, Ui};

use crate::data::fetch::LightCurveSource;
use crate::data::model::FluxVariant;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top panel – target, channel and range controls
// ---------------------------------------------------------------------------

/// Render the control rows. Button handlers run synchronously, so the window
/// is unresponsive while a fetch is in flight.
pub fn controls(ui: &mut Ui, state: &mut AppState, source: &dyn LightCurveSource) {
    ui.add_space(6.0);

    // ---- Target ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Enter TIC ID:");
        let field = ui.add(
            TextEdit::singleline(&mut state.tic_input)
                .desired_width(140.0)
                .hint_text("e.g. 38846515"),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Generate Light Curve").clicked() || submitted {
            state.on_generate(source);
        }
    });

    // ---- Flux channel ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Flux Type:");
        egui::ComboBox::from_id_salt("flux_variant")
            .selected_text(state.variant.label())
            .show_ui(ui, |ui: &mut Ui| {
                for v in FluxVariant::ALL {
                    ui.selectable_value(&mut state.variant, v, v.label());
                }
            });
    });

    // ---- BJD range ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("BJD Min:");
        ui.add(TextEdit::singleline(&mut state.bjd_min).desired_width(80.0));
        ui.label("BJD Max:");
        ui.add(TextEdit::singleline(&mut state.bjd_max).desired_width(80.0));

        if ui
            .add_enabled(state.can_refresh(), Button::new("Refresh Plot"))
            .clicked()
        {
            state.on_refresh();
        }

        ui.separator();

        if let Some(plot) = state.renderer.current() {
            ui.label(format!(
                "{} of {} cadences shown",
                plot.points.len(),
                plot.total
            ));
        }
    });

    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Notification window
// ---------------------------------------------------------------------------

/// Show the pending notification, if any, centred over the window.
pub fn notification(ctx: &Context, state: &mut AppState) {
    let Some(note) = state.notification.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(note.title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(&note.message).color(egui::Color32::RED));
            ui.add_space(8.0);
            ui.vertical_centered(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        state.dismiss_notification();
    }
}
