use std::f32::consts::TAU;

use egui::{
    epaint::Mesh, pos2, vec2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui,
};
use hand_gestures::{
    render::commands::{Colour, DrawCommand, RenderedFrame, TextAlign},
    Point2D,
};

const GLOW_SEGMENTS: u32 = 32;

pub fn to_color32(colour: &Colour) -> Color32 {
    let [r, g, b, a] = colour.to_rgba8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Paint a display list, scaled to fit the available space while keeping the
/// video aspect ratio
pub fn render_canvas(frame: &RenderedFrame, ui: &mut Ui) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }

    let available = ui.available_size();
    let scale = (available.x / frame.width as f32)
        .min(available.y / frame.height as f32)
        .max(0.01);
    let (response, painter) = ui.allocate_painter(
        vec2(frame.width as f32 * scale, frame.height as f32 * scale),
        Sense::hover(),
    );
    let origin = response.rect.min;
    let to_pos = |(x, y): Point2D| pos2(origin.x + x * scale, origin.y + y * scale);

    for command in &frame.commands {
        match command {
            DrawCommand::Clear { colour } => {
                painter.rect_filled(response.rect, 0.0, to_color32(colour));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                colour,
            } => {
                painter.line_segment(
                    [to_pos(*from), to_pos(*to)],
                    Stroke::new(width * scale, to_color32(colour)),
                );
            }
            DrawCommand::Dot {
                centre,
                radius,
                colour,
            } => {
                painter.circle_filled(to_pos(*centre), radius * scale, to_color32(colour));
            }
            DrawCommand::Glow {
                centre,
                radius,
                colour,
            } => {
                painter.add(radial_gradient(
                    to_pos(*centre),
                    radius * scale,
                    to_color32(colour),
                ));
            }
            DrawCommand::Badge {
                anchor,
                align,
                text,
                font_size,
                text_colour,
                background,
                padding,
                rounding,
            } => {
                let galley = painter.layout_no_wrap(
                    text.clone(),
                    FontId::proportional(font_size * scale),
                    to_color32(text_colour),
                );
                let padding = padding * scale;
                let size = galley.size() + vec2(2. * padding, 2. * padding);
                let anchor = to_pos(*anchor);
                let min = match align {
                    TextAlign::Left => anchor,
                    TextAlign::Right => anchor - vec2(size.x, 0.),
                };
                painter.rect_filled(
                    Rect::from_min_size(min, size),
                    rounding * scale,
                    to_color32(background),
                );
                painter.galley(min + vec2(padding, padding), galley);
            }
        }
    }
}

/// Triangle fan fading from `colour` at the centre to transparent at the rim
fn radial_gradient(centre: Pos2, radius: f32, colour: Color32) -> Shape {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(centre, colour);
    for i in 0..=GLOW_SEGMENTS {
        let angle = TAU * i as f32 / GLOW_SEGMENTS as f32;
        mesh.colored_vertex(
            centre + radius * vec2(angle.cos(), angle.sin()),
            Color32::TRANSPARENT,
        );
    }
    for i in 1..=GLOW_SEGMENTS {
        mesh.add_triangle(0, i, i + 1);
    }
    Shape::mesh(mesh)
}
