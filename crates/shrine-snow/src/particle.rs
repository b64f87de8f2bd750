//! A single snowflake and the per-frame physics applied to it.

use rand::Rng;
use shrine_config::SnowConfig;
use shrine_core::{Point, Viewport};

/// Height recycled flakes re-enter at, just above the top edge.
pub const RESPAWN_Y: f32 = -10.0;

/// Spatial frequency of the sideways sway.
const DRIFT_FREQUENCY: f32 = 0.01;

/// Pixels of sideways sway per frame at most.
const DRIFT_AMPLITUDE: f32 = 0.5;

/// A snowflake. Radius and fall speed are fixed for its whole life.
#[derive(Debug, Clone, PartialEq)]
pub struct Snowflake {
    position: Point,
    radius: f32,
    fall_speed: f32,
}

impl Snowflake {
    /// Construct a new [`Snowflake`].
    pub fn new(position: Point, radius: f32, fall_speed: f32) -> Self {
        Self {
            position,
            radius,
            fall_speed,
        }
    }

    /// A flake anywhere in the viewport with random size and speed.
    ///
    /// The viewport must not be empty.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, snow: &SnowConfig) -> Self {
        Self {
            position: Point::new(
                rng.gen_range(0.0..viewport.width),
                rng.gen_range(0.0..viewport.height),
            ),
            radius: rng.gen_range(snow.min_radius..=snow.max_radius),
            fall_speed: rng.gen_range(snow.min_fall_speed..=snow.max_fall_speed),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    /// Advance the flake by one frame.
    ///
    /// Falls, sways, recycles at the bottom, wraps sideways, then gets pushed
    /// out of the pointer's repulsion zone. The flake ends inside
    /// `[0, width) x [RESPAWN_Y, height]`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        pointer: Point,
        repulsion_radius: f32,
    ) {
        self.fall();
        self.recycle_if_below(rng, viewport);
        self.wrap_horizontal(viewport.width);
        if self.repel_from(pointer, repulsion_radius) {
            self.settle(viewport);
        }
    }

    fn fall(&mut self) {
        self.position.y += self.fall_speed;
        self.position.x += (self.position.y * DRIFT_FREQUENCY).sin() * DRIFT_AMPLITUDE;
    }

    /// Send the flake back to the top at a random column once it has dropped
    /// past the bottom edge.
    fn recycle_if_below<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport) -> bool {
        if self.position.y <= viewport.height {
            return false;
        }
        self.position.y = RESPAWN_Y;
        self.position.x = rng.gen_range(0.0..viewport.width);
        true
    }

    fn wrap_horizontal(&mut self, width: f32) {
        if self.position.x >= width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = right_edge(width);
        }
    }

    /// Push the flake straight away from `pointer`, by half of how far it
    /// sits inside the zone. A flake exactly on the pointer goes along +x.
    fn repel_from(&mut self, pointer: Point, radius: f32) -> bool {
        let dx = self.position.x - pointer.x;
        let dy = self.position.y - pointer.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance >= radius {
            return false;
        }
        let angle = dy.atan2(dx);
        let push = (radius - distance) / 2.0;
        self.position.x += angle.cos() * push;
        self.position.y += angle.sin() * push;
        true
    }

    /// Pull a displaced flake back inside the frame bounds.
    fn settle(&mut self, viewport: Viewport) {
        self.wrap_horizontal(viewport.width);
        self.position.y = self.position.y.clamp(RESPAWN_Y, viewport.height.max(RESPAWN_Y));
    }
}

/// Largest position strictly left of `width`.
fn right_edge(width: f32) -> f32 {
    (width * (1.0 - f32::EPSILON)).max(0.0)
}
