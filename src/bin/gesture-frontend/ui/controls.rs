use egui::{Color32, RichText, Ui};
use hand_gestures::tracker::TrackerState;

use crate::model::Model;

use super::SPACING_AMOUNT;

pub fn render_controls(model: &mut Model, ui: &mut Ui) {
    ui.heading("Gesture Tracking");
    ui.label(format!("Recording: {}", model.recording_path.display()));
    ui.add_space(SPACING_AMOUNT);

    let (label, enabled) = match model.tracker.state() {
        TrackerState::Tracking => ("Stop", true),
        TrackerState::Ready | TrackerState::Stopped => ("Start", true),
        TrackerState::Error(e) => ("Retry", e.is_user_recoverable()),
        TrackerState::Idle | TrackerState::Loading => ("Start", false),
    };
    if ui
        .add_enabled(enabled, egui::Button::new(RichText::new(label).heading()))
        .clicked()
    {
        model.toggle_tracking();
    }

    ui.add_space(SPACING_AMOUNT);

    match model.tracker.state() {
        TrackerState::Idle => {
            ui.label("Idle");
        }
        TrackerState::Loading => {
            ui.label("Loading detector...");
        }
        TrackerState::Ready => {
            ui.label("Ready");
        }
        TrackerState::Tracking => {
            ui.label(RichText::new("Tracking").color(Color32::LIGHT_GREEN));
        }
        TrackerState::Stopped => {
            ui.label("Stopped");
        }
        TrackerState::Error(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::LIGHT_RED));
            if !e.is_user_recoverable() {
                ui.label("Restart the application to try again");
            }
        }
    }
}
