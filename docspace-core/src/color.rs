//! Color types for derived point colors

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color with each channel in `[0, 255]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Quantize to 8-bit channels
    pub fn to_bytes(&self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

fn quantize(channel: f32) -> u8 {
    channel.round().clamp(0.0, 255.0) as u8
}

/// An HSL color: hue in `[0, 360)`, saturation and lightness in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }
}

/// CSS notation, e.g. `hsl(120, 100%, 50%)`
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h.round(), self.s.round(), self.l.round())
    }
}

/// The color assigned to a point: the blended RGB and its HSL presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedColor {
    pub rgb: Rgb,
    pub hsl: Hsl,
}

/// Neutral color used for points sitting exactly on the centroid
pub const NEUTRAL_COLOR: DerivedColor = DerivedColor {
    rgb: Rgb::new(255.0, 255.0, 255.0),
    hsl: Hsl::new(0.0, 0.0, 100.0),
};
