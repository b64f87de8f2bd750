//! Glyphs used to draw snowflakes.

/// Flake glyphs from smallest to largest.
pub const SNOW_CHARS: &[char] = &['·', '•', '*', '❄'];

/// Pick a glyph for a flake of the given pixel radius.
pub fn flake_glyph(radius: f32) -> char {
    let idx = if radius < 1.75 {
        0
    } else if radius < 2.5 {
        1
    } else if radius < 3.25 {
        2
    } else {
        3
    };
    SNOW_CHARS[idx]
}
