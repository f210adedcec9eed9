//! Fixed visual constants. Sizes are in screen pixels.

use std::time::Duration;

use crate::classifier::GestureLabel;

use super::commands::Colour;

pub const BACKGROUND: Colour = Colour::rgb(16, 16, 20);

// -------- SKELETON
pub const CONNECTOR_HUE: f64 = 160.;
pub const CONNECTOR_LIGHTNESS: f64 = 50.;
pub const CONNECTOR_WIDTH: f32 = 2.;

pub const FIST_PULSE_PERIOD: Duration = Duration::from_millis(150);
pub const FIST_CONNECTOR_HUE: f64 = 0.;
pub const FIST_CONNECTOR_WIDTH: (f32, f32) = (3., 6.);
pub const FIST_CONNECTOR_LIGHTNESS: (f32, f32) = (45., 65.);

// -------- LANDMARK DOTS
/// (nearest, furthest)
pub const DOT_RADIUS: (f32, f32) = (7., 3.);
pub const DOT_LIGHTNESS: (f32, f32) = (85., 45.);
pub const DOT_HUE: f64 = 200.;

// -------- FINGERTIP GLOW
pub const GLOW_PULSE_PERIOD: Duration = Duration::from_millis(200);
pub const GLOW_RADIUS: (f32, f32) = (18., 26.);
pub const GLOW_OPACITY: (f32, f32) = (0.5, 0.9);

// -------- TEXT
pub const FINGER_LABEL_OFFSET: (f32, f32) = (10., -22.);
pub const FINGER_LABEL_BACKGROUND: Colour = Colour::BLACK;
pub const FINGER_LABEL_OPACITY: f32 = 0.6;
pub const FINGER_LABEL_PADDING: f32 = 3.;
pub const FINGER_LABEL_ROUNDING: f32 = 4.;

pub const BANNER_MARGIN: f32 = 20.;
pub const BANNER_PADDING: f32 = 8.;
pub const BANNER_ROUNDING: f32 = 10.;
pub const BANNER_OPACITY: f32 = 0.85;

/// Colour of the glow and banner associated with a gesture
pub fn gesture_colour(gesture: GestureLabel) -> Colour {
    match gesture {
        GestureLabel::Pointing => Colour::hsl(190., 100., 55.),
        GestureLabel::OpenPalm => Colour::hsl(48., 100., 55.),
        GestureLabel::Fist => Colour::hsl(FIST_CONNECTOR_HUE, 90., 55.),
        GestureLabel::None => Colour::hsl(0., 0., 60.),
    }
}
