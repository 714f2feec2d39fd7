//! Position-derived colors
//!
//! Each axis owns a primary: X is red, Y is green, Z is blue. A point's color
//! blends the three primaries by the absolute components of its unit
//! direction from the centroid, so points sharing a dominant axis share a
//! dominant hue and mirrored points get identical colors.

use docspace_core::{DerivedColor, Hsl, NormalizedPosition, Rgb, NEUTRAL_COLOR};

const AXIS_X_PRIMARY: Rgb = Rgb::new(255.0, 0.0, 0.0);
const AXIS_Y_PRIMARY: Rgb = Rgb::new(0.0, 255.0, 0.0);
const AXIS_Z_PRIMARY: Rgb = Rgb::new(0.0, 0.0, 255.0);

/// Derive the display color of a normalized position
///
/// Points at the centroid (zero norm) and non-finite positions fall back to
/// [`NEUTRAL_COLOR`].
///
/// # Example
/// ```rust
/// use docspace_core::{Point3f, NEUTRAL_COLOR};
/// use docspace_layout::color_of;
///
/// assert_eq!(color_of(&Point3f::origin()), NEUTRAL_COLOR);
///
/// let color = color_of(&Point3f::new(-50.0, 0.0, 0.0));
/// assert_eq!(color.rgb.to_bytes(), [255, 0, 0]);
/// assert_eq!(color.hsl.h, 0.0);
/// ```
pub fn color_of(position: &NormalizedPosition) -> DerivedColor {
    let norm = position.coords.norm();
    if norm == 0.0 || !norm.is_finite() {
        return NEUTRAL_COLOR;
    }

    let wx = position.x.abs() / norm;
    let wy = position.y.abs() / norm;
    let wz = position.z.abs() / norm;

    let blend = |x: f32, y: f32, z: f32| (x * wx + y * wy + z * wz).clamp(0.0, 255.0);
    let rgb = Rgb::new(
        blend(AXIS_X_PRIMARY.r, AXIS_Y_PRIMARY.r, AXIS_Z_PRIMARY.r),
        blend(AXIS_X_PRIMARY.g, AXIS_Y_PRIMARY.g, AXIS_Z_PRIMARY.g),
        blend(AXIS_X_PRIMARY.b, AXIS_Y_PRIMARY.b, AXIS_Z_PRIMARY.b),
    );

    DerivedColor {
        rgb,
        hsl: rgb_to_hsl(&rgb),
    }
}

/// Convert RGB (channels in `[0, 255]`) to HSL
pub fn rgb_to_hsl(rgb: &Rgb) -> Hsl {
    let r = rgb.r / 255.0;
    let g = rgb.g / 255.0;
    let b = rgb.b / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new((h * 60.0) % 360.0, s * 100.0, l * 100.0)
}

/// Convert HSL back to RGB (channels in `[0, 255]`)
pub fn hsl_to_rgb(hsl: &Hsl) -> Rgb {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    if s == 0.0 {
        let v = l * 255.0;
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
