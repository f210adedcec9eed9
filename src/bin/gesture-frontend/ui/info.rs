use egui::{Grid, RichText, Ui};
use hand_gestures::render::style::gesture_colour;

use crate::model::Model;

use super::canvas::to_color32;

pub fn render_info(model: &mut Model, ui: &mut Ui) {
    ui.heading("Detection");

    Grid::new("gesture_grid").show(ui, |ui| {
        let size = model.tracker.frame_size();
        ui.label("Frame size: ");
        ui.label(format!("{}x{}", size.width, size.height));
        ui.end_row();

        ui.label("Frames processed: ");
        ui.label(format!("{}", model.tracker.frames_processed()));
        ui.end_row();

        ui.label("Hands count: ");
        ui.label(format!("{}", model.tracker.gestures().len()));
        ui.end_row();

        for (slot, gesture) in model.tracker.gestures().iter() {
            ui.label(format!("Hand #{}:", slot + 1));
            if gesture.is_none() {
                ui.label(gesture.to_string());
            } else {
                ui.label(RichText::new(gesture.to_string()).color(to_color32(&gesture_colour(gesture))));
            }
            ui.end_row();
        }
    });
}
