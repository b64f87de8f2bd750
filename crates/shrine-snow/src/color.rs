//! Color utilities for compositing the snowfall over the backdrop.

use ratatui::style::Color;

/// A paint color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Construct a new [`Rgba`].
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composite `self` on top of `below`, returning the combined paint.
    pub fn over(self, below: Rgba) -> Rgba {
        let a = self.a + below.a * (1.0 - self.a);
        if a <= 0.0 {
            return Rgba::new(0, 0, 0, 0.0);
        }
        let mix = |top: u8, bottom: u8| -> u8 {
            let top = top as f32 * self.a;
            let bottom = bottom as f32 * below.a * (1.0 - self.a);
            ((top + bottom) / a).round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            mix(self.r, below.r),
            mix(self.g, below.g),
            mix(self.b, below.b),
            a,
        )
    }
}

/// Soft disc marking the repulsion zone around the pointer.
pub const HALO: Rgba = Rgba::new(255, 255, 255, 0.2);

/// Snowflake fill.
pub const FLAKE: Rgba = Rgba::new(255, 255, 255, 0.8);

/// Blend `paint` over an opaque `base` color.
pub fn blend(base: (u8, u8, u8), paint: Rgba) -> (u8, u8, u8) {
    let a = paint.a.clamp(0.0, 1.0);
    let channel = |under: u8, over: u8| -> u8 {
        (under as f32 + (over as f32 - under as f32) * a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (
        channel(base.0, paint.r),
        channel(base.1, paint.g),
        channel(base.2, paint.b),
    )
}

/// RGB components of a terminal color, treating anything that isn't true
/// color as black.
pub fn rgb_of(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::White => (255, 255, 255),
        Color::Gray => (192, 192, 192),
        Color::DarkGray => (128, 128, 128),
        _ => (0, 0, 0),
    }
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;

    let channel = |t: f32| (hue_to_rgb(p, q, t) * 255.0) as u8;
    Color::Rgb(
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend() {
        assert_eq!(blend((0, 0, 0), FLAKE), (204, 204, 204));
        assert_eq!(blend((100, 50, 0), HALO), (131, 91, 51));
        assert_eq!(blend((10, 20, 30), Rgba::new(255, 0, 0, 0.0)), (10, 20, 30));
        assert_eq!(blend((10, 20, 30), Rgba::new(255, 0, 0, 1.0)), (255, 0, 0));
    }

    #[test]
    fn test_over_accumulates_alpha() {
        let twice = HALO.over(HALO);
        assert!((twice.a - 0.36).abs() < 1e-6);
        assert_eq!((twice.r, twice.g, twice.b), (255, 255, 255));

        let clear = Rgba::new(0, 0, 0, 0.0);
        assert_eq!(HALO.over(clear), HALO);
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_rgb_of() {
        assert_eq!(rgb_of(Color::Rgb(1, 2, 3)), (1, 2, 3));
        assert_eq!(rgb_of(Color::Reset), (0, 0, 0));
    }
}
