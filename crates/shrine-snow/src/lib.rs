//! Snowfall animation for the shrine hero.
//!
//! A fixed population of flakes falls through pixel space, sways sideways,
//! wraps at the edges and is pushed out of a zone around the pointer. Each
//! frame is painted onto a [`Surface`]; [`SnowRaster`] is the terminal one,
//! and it composites translucently over whatever was drawn underneath.

mod chars;
mod color;
mod particle;
mod raster;
mod state;

pub use color::{FLAKE, HALO, Rgba, blend, hsl_to_rgb, rgb_of};
pub use particle::{RESPAWN_Y, Snowflake};
pub use raster::{FlakeMark, RasterCell, SnowRaster, Surface};
pub use state::SnowfallState;
