use colorsys::{Hsl, Rgb};
use serde::Serialize;

use crate::Point2D;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub rgb: [u8; 3],
    /// Opacity in [0;1]
    pub alpha: f32,
}

impl Colour {
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Colour {
            rgb: [r, g, b],
            alpha: 1.0,
        }
    }

    /// Hue in degrees, saturation and lightness in percent
    pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let rgb: [u8; 3] = Rgb::from(Hsl::new(hue, saturation, lightness, None)).into();
        Colour { rgb, alpha: 1.0 }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Colour {
            alpha: alpha.clamp(0., 1.),
            ..self
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.rgb;
        [r, g, b, (self.alpha * 255.).round() as u8]
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// One drawing primitive, in screen pixels (mirroring already applied).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { colour: Colour },
    Line {
        from: Point2D,
        to: Point2D,
        width: f32,
        colour: Colour,
    },
    Dot {
        centre: Point2D,
        radius: f32,
        colour: Colour,
    },
    /// Radial gradient: `colour` at the centre, fully transparent at `radius`
    Glow {
        centre: Point2D,
        radius: f32,
        colour: Colour,
    },
    /// Text on a rounded background. `anchor` is the top corner on the side
    /// given by `align`; glyphs are always drawn unmirrored.
    Badge {
        anchor: Point2D,
        align: TextAlign,
        text: String,
        font_size: f32,
        text_colour: Colour,
        background: Colour,
        padding: f32,
        rounding: f32,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RenderedFrame {
    pub fn is_blank(&self) -> bool {
        self.commands
            .iter()
            .all(|c| matches!(c, DrawCommand::Clear { .. }))
    }

    pub fn glows(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glow { .. }))
    }

    pub fn badge_texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Badge { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
