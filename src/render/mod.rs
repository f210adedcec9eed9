//! Turns landmarks, gestures and the animation clock into a display list.
//!
//! The video is shown mirrored ("selfie" view), so every position is flipped
//! horizontally on its way to the screen. Text is the exception: glyphs are
//! never flipped, and label offsets are applied in screen space after the
//! flip, so labels read left-to-right and sit on the expected side.
//!
//! Each frame is cleared and drawn from scratch; output depends only on the
//! arguments to [`FrameRenderer::render`].

pub mod commands;
pub mod style;

use std::time::Duration;

use crate::{
    classifier::GestureLabel,
    config::TrackerConfig,
    geometry_utils::{lerp, oscillate_between},
    gesture_state::PerHandState,
    interfaces::FrameSize,
    landmarks::{
        HandLandmarkerResult, HandLandmarks, Landmark, FINGERTIPS, HAND_CONNECTIONS,
        INDEX_FINGER_TIP,
    },
    Point2D,
};

use commands::{Colour, DrawCommand, RenderedFrame, TextAlign};
use style::*;

/// Maps normalised landmark coordinates to screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    width: f32,
    height: f32,
    mirrored: bool,
}

impl ScreenTransform {
    pub fn new(size: FrameSize, mirrored: bool) -> Self {
        ScreenTransform {
            width: size.width as f32,
            height: size.height as f32,
            mirrored,
        }
    }

    pub fn to_screen(&self, landmark: &Landmark) -> Point2D {
        let x = landmark.x * self.width;
        let y = landmark.y * self.height;
        if self.mirrored {
            (self.width - x, y)
        } else {
            (x, y)
        }
    }

    /// Offsets for text are given as seen on screen, so they are not flipped
    pub fn offset_text(&self, anchor: Point2D, offset: (f32, f32)) -> Point2D {
        (anchor.0 + offset.0, anchor.1 + offset.1)
    }
}

pub struct FrameRenderer {
    mirrored: bool,
    label_font_size: f32,
    banner_font_size: f32,
}

impl FrameRenderer {
    pub fn new(config: &TrackerConfig) -> Self {
        FrameRenderer {
            mirrored: config.mirror_view,
            label_font_size: config.label_font_size,
            banner_font_size: config.banner_font_size,
        }
    }

    /// A frame with nothing on it but the background
    pub fn cleared(size: FrameSize) -> RenderedFrame {
        RenderedFrame {
            width: size.width,
            height: size.height,
            commands: vec![DrawCommand::Clear { colour: BACKGROUND }],
        }
    }

    pub fn render(
        &self,
        size: FrameSize,
        result: &HandLandmarkerResult,
        gestures: &PerHandState,
        now: Duration,
    ) -> RenderedFrame {
        let transform = ScreenTransform::new(size, self.mirrored);
        let mut frame = FrameRenderer::cleared(size);

        for (slot, hand) in result.hands.iter().enumerate() {
            let gesture = gestures.get(slot).unwrap_or_default();
            let commands = &mut frame.commands;
            draw_connectors(commands, &transform, hand, gesture, now);
            draw_glows(commands, &transform, hand, gesture, now);
            draw_dots(commands, &transform, hand);
            self.draw_finger_labels(commands, &transform, hand);
        }

        for (slot, gesture) in gestures.iter().filter(|(_, g)| !g.is_none()) {
            self.draw_banner(&mut frame.commands, size, slot, gesture);
        }

        frame
    }

    fn draw_finger_labels(
        &self,
        commands: &mut Vec<DrawCommand>,
        transform: &ScreenTransform,
        hand: &HandLandmarks,
    ) {
        for (tip, name) in FINGERTIPS {
            let anchor =
                transform.offset_text(transform.to_screen(hand.get(tip)), FINGER_LABEL_OFFSET);
            commands.push(DrawCommand::Badge {
                anchor,
                align: TextAlign::Left,
                text: String::from(name),
                font_size: self.label_font_size,
                text_colour: Colour::WHITE,
                background: FINGER_LABEL_BACKGROUND.with_alpha(FINGER_LABEL_OPACITY),
                padding: FINGER_LABEL_PADDING,
                rounding: FINGER_LABEL_ROUNDING,
            });
        }
    }

    /// The first hand's banner sits top-left, any others top-right (stacked)
    fn draw_banner(
        &self,
        commands: &mut Vec<DrawCommand>,
        size: FrameSize,
        slot: usize,
        gesture: GestureLabel,
    ) {
        let row_height = self.banner_font_size + 2. * BANNER_PADDING + BANNER_MARGIN / 2.;
        let (anchor, align) = if slot == 0 {
            ((BANNER_MARGIN, BANNER_MARGIN), TextAlign::Left)
        } else {
            (
                (
                    size.width as f32 - BANNER_MARGIN,
                    BANNER_MARGIN + (slot - 1) as f32 * row_height,
                ),
                TextAlign::Right,
            )
        };

        commands.push(DrawCommand::Badge {
            anchor,
            align,
            text: gesture.to_string(),
            font_size: self.banner_font_size,
            text_colour: Colour::WHITE,
            background: gesture_colour(gesture).with_alpha(BANNER_OPACITY),
            padding: BANNER_PADDING,
            rounding: BANNER_ROUNDING,
        });
    }
}

fn draw_connectors(
    commands: &mut Vec<DrawCommand>,
    transform: &ScreenTransform,
    hand: &HandLandmarks,
    gesture: GestureLabel,
    now: Duration,
) {
    let (width, colour) = connector_style(gesture, now);
    for (a, b) in HAND_CONNECTIONS {
        commands.push(DrawCommand::Line {
            from: transform.to_screen(hand.get(a)),
            to: transform.to_screen(hand.get(b)),
            width,
            colour,
        });
    }
}

/// Static, except while a fist is held: then width and lightness pulse
pub fn connector_style(gesture: GestureLabel, now: Duration) -> (f32, Colour) {
    match gesture {
        GestureLabel::Fist => {
            let (min_w, max_w) = FIST_CONNECTOR_WIDTH;
            let (min_l, max_l) = FIST_CONNECTOR_LIGHTNESS;
            let width = oscillate_between(now, FIST_PULSE_PERIOD, min_w, max_w);
            let lightness = oscillate_between(now, FIST_PULSE_PERIOD, min_l, max_l);
            (width, Colour::hsl(FIST_CONNECTOR_HUE, 100., lightness as f64))
        }
        _ => (
            CONNECTOR_WIDTH,
            Colour::hsl(CONNECTOR_HUE, 100., CONNECTOR_LIGHTNESS),
        ),
    }
}

/// Nearer landmarks (smaller z) are drawn bigger and lighter
fn draw_dots(commands: &mut Vec<DrawCommand>, transform: &ScreenTransform, hand: &HandLandmarks) {
    let (min_z, max_z) = hand.depth_range();
    let range = if max_z == min_z { 1. } else { max_z - min_z };

    for landmark in hand.iter() {
        let depth = (landmark.z - min_z) / range;
        commands.push(DrawCommand::Dot {
            centre: transform.to_screen(landmark),
            radius: lerp(DOT_RADIUS.0, DOT_RADIUS.1, depth),
            colour: Colour::hsl(DOT_HUE, 100., lerp(DOT_LIGHTNESS.0, DOT_LIGHTNESS.1, depth) as f64),
        });
    }
}

/// Which fingertips glow for a gesture
pub fn glowing_fingertips(gesture: GestureLabel) -> Vec<usize> {
    match gesture {
        GestureLabel::OpenPalm => FINGERTIPS.iter().map(|(tip, _)| *tip).collect(),
        GestureLabel::Pointing => vec![INDEX_FINGER_TIP],
        GestureLabel::Fist | GestureLabel::None => Vec::new(),
    }
}

fn draw_glows(
    commands: &mut Vec<DrawCommand>,
    transform: &ScreenTransform,
    hand: &HandLandmarks,
    gesture: GestureLabel,
    now: Duration,
) {
    let tips = glowing_fingertips(gesture);
    if tips.is_empty() {
        return;
    }

    let radius = oscillate_between(now, GLOW_PULSE_PERIOD, GLOW_RADIUS.0, GLOW_RADIUS.1);
    let opacity = oscillate_between(now, GLOW_PULSE_PERIOD, GLOW_OPACITY.0, GLOW_OPACITY.1);
    let colour = gesture_colour(gesture).with_alpha(opacity);

    for tip in tips {
        commands.push(DrawCommand::Glow {
            centre: transform.to_screen(hand.get(tip)),
            radius,
            colour,
        });
    }
}
