mod canvas;
mod controls;
mod info;

use canvas::render_canvas;
use controls::render_controls;
use hand_gestures::animation::AnimationClock;
use info::render_info;

use crate::model::Model;

pub const SPACING_AMOUNT: f32 = 16.0;

pub fn render_ui(ctx: &egui::Context, model: &mut Model) {
    egui::SidePanel::left("controls").show(ctx, |ui| {
        ui.add_space(SPACING_AMOUNT);
        render_controls(model, ui);
    });

    egui::SidePanel::right("stats").show(ctx, |ui| {
        render_info(model, ui);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        let frame = model.tracker.render_at(model.clock.now());
        render_canvas(&frame, ui);
    });
}
