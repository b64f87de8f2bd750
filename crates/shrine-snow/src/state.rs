//! Snowfall animation state management.

use rand::Rng;
use shrine_config::{PointerConfig, SnowConfig};
use shrine_core::{Point, PointerState, Viewport};

use crate::color::{FLAKE, HALO};
use crate::particle::Snowflake;
use crate::raster::Surface;

/// Everything the snowfall needs between frames.
///
/// Input handlers and the frame loop all work through one `&mut` to this
/// state, strictly one after another.
#[derive(Debug)]
pub struct SnowfallState {
    /// Live flakes. Recycled at the bottom, never dropped.
    flakes: Vec<Snowflake>,
    /// Where the pointer was last seen.
    pointer: PointerState,
    /// Current bounds for wrapping and spawning.
    viewport: Viewport,
    /// Population and size ranges.
    snow: SnowConfig,
    /// Radius of the zone flakes are pushed out of.
    repulsion_radius: f32,
}

impl SnowfallState {
    /// Create the snowfall and scatter the initial flakes over `viewport`.
    ///
    /// With an empty viewport the flakes are created on the first update
    /// that has somewhere to put them.
    pub fn new<R: Rng + ?Sized>(
        viewport: Viewport,
        snow: SnowConfig,
        pointer: &PointerConfig,
        rng: &mut R,
    ) -> Self {
        let mut state = Self {
            flakes: Vec::with_capacity(snow.flake_count),
            pointer: PointerState::default(),
            viewport,
            snow,
            repulsion_radius: pointer.repulsion_radius,
        };
        state.populate(rng);
        state
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    #[cfg(test)]
    pub(crate) fn flakes_mut(&mut self) -> &mut Vec<Snowflake> {
        &mut self.flakes
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Adopt new bounds. Existing flakes stay where they are.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "Snowfall viewport resized"
        );
        self.viewport = viewport;
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.pointer.move_to(position);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }

    /// Run one whole frame: clear, halo, advance, flakes.
    pub fn frame<S: Surface, R: Rng + ?Sized>(&mut self, surface: &mut S, rng: &mut R) {
        if surface.is_empty() {
            return;
        }
        surface.clear();
        self.draw_halo(surface);
        self.update(rng);
        self.draw_flakes(surface);
    }

    /// Advance every flake by one frame.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.viewport.is_empty() {
            return;
        }
        self.populate(rng);

        let viewport = self.viewport;
        let pointer = self.pointer.position();
        let radius = self.repulsion_radius;
        for flake in &mut self.flakes {
            flake.step(rng, viewport, pointer, radius);
        }
    }

    /// Paint the current state without advancing it.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        if surface.is_empty() {
            return;
        }
        surface.clear();
        self.draw_halo(surface);
        self.draw_flakes(surface);
    }

    fn draw_halo<S: Surface>(&self, surface: &mut S) {
        surface.fill_disc(self.pointer.position(), self.repulsion_radius, HALO);
    }

    fn draw_flakes<S: Surface>(&self, surface: &mut S) {
        for flake in &self.flakes {
            surface.fill_disc(flake.position(), flake.radius(), FLAKE);
        }
    }

    fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.viewport.is_empty() || self.flakes.len() >= self.snow.flake_count {
            return;
        }
        let missing = self.snow.flake_count - self.flakes.len();
        let viewport = self.viewport;
        let snow = &self.snow;
        self.flakes
            .extend((0..missing).map(|_| Snowflake::spawn(rng, viewport, snow)));
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use shrine_core::CellMetrics;

    use super::*;
    use crate::particle::RESPAWN_Y;
    use crate::raster::SnowRaster;

    const VIEWPORT: Viewport = Viewport::new(640.0, 384.0);

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn state(rng: &mut StdRng) -> SnowfallState {
        SnowfallState::new(
            VIEWPORT,
            SnowConfig::default(),
            &PointerConfig::default(),
            rng,
        )
    }

    fn assert_in_bounds(state: &SnowfallState) {
        let viewport = state.viewport();
        for flake in state.flakes() {
            let p = flake.position();
            assert!(p.x >= 0.0 && p.x < viewport.width, "x out of bounds: {p:?}");
            assert!(p.y >= RESPAWN_Y && p.y <= viewport.height, "y out of bounds: {p:?}");
        }
    }

    #[test]
    fn test_initial_population() {
        let mut rng = rng();
        let state = state(&mut rng);
        assert_eq!(state.flakes().len(), 200);
        assert!(!state.pointer().is_present());
        for flake in state.flakes() {
            let p = flake.position();
            assert!((0.0..640.0).contains(&p.x));
            assert!((0.0..384.0).contains(&p.y));
        }
    }

    #[test]
    fn test_flakes_stay_in_bounds_over_many_frames() {
        let mut rng = rng();
        let mut state = state(&mut rng);
        let pointers = [
            Point::new(320.0, 192.0),
            Point::new(0.0, 0.0),
            Point::new(639.0, 383.0),
            Point::new(5.0, 380.0),
        ];
        for frame in 0..2000 {
            if frame % 100 == 0 {
                state.pointer_moved(pointers[(frame / 100) % pointers.len()]);
            }
            if frame % 350 == 0 {
                state.pointer_left();
            }
            state.update(&mut rng);
            assert_in_bounds(&state);
        }
        assert_eq!(state.flakes().len(), 200);
    }

    #[test]
    fn test_recycled_flake_reenters_at_top() {
        let mut rng = rng();
        let mut state = state(&mut rng);
        state.flakes_mut()[0] = Snowflake::new(Point::new(100.0, 400.0), 2.0, 1.0);
        state.update(&mut rng);

        let p = state.flakes()[0].position();
        assert_eq!(p.y, RESPAWN_Y);
        assert!((0.0..640.0).contains(&p.x));
        assert_eq!(state.flakes()[0].radius(), 2.0);
        assert_eq!(state.flakes()[0].fall_speed(), 1.0);
    }

    #[test]
    fn test_sentinel_pointer_repels_nothing() {
        let mut rng = rng();
        let mut with_sentinel = state(&mut rng);
        let mut without_pointer = SnowfallState::new(
            VIEWPORT,
            SnowConfig::default(),
            &PointerConfig {
                repulsion_radius: 0.0,
            },
            &mut rng,
        );
        *without_pointer.flakes_mut() = with_sentinel.flakes().to_vec();

        // Same seed for both so recycled flakes land in the same place.
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            with_sentinel.update(&mut rng_a);
            without_pointer.update(&mut rng_b);
        }
        assert_eq!(with_sentinel.flakes(), without_pointer.flakes());
    }

    #[test]
    fn test_pointer_pushes_flakes_out_of_the_zone() {
        let mut rng = rng();
        let mut state = state(&mut rng);
        let pointer = Point::new(320.0, 192.0);
        state.flakes_mut()[0] = Snowflake::new(Point::new(320.0, 150.0), 2.0, 1.0);
        state.pointer_moved(pointer);
        state.update(&mut rng);

        let before = Point::new(320.0, 151.0).distance_to(pointer);
        let after = state.flakes()[0].position().distance_to(pointer);
        assert!(after > before);
        assert!((after - (before + (100.0 - before) / 2.0)).abs() < 0.5);
    }

    #[test]
    fn test_resize_leaves_flakes_in_place() {
        let mut rng = rng();
        let mut state = state(&mut rng);
        let before = state.flakes().to_vec();

        state.resize(Viewport::new(160.0, 96.0));
        assert_eq!(state.flakes(), before.as_slice());
        assert_eq!(state.viewport(), Viewport::new(160.0, 96.0));

        // The next update wraps them into the new bounds.
        state.update(&mut rng);
        assert_in_bounds(&state);
    }

    #[test]
    fn test_empty_viewport_defers_population() {
        let mut rng = rng();
        let mut state = SnowfallState::new(
            Viewport::default(),
            SnowConfig::default(),
            &PointerConfig::default(),
            &mut rng,
        );
        assert!(state.flakes().is_empty());

        state.update(&mut rng);
        assert!(state.flakes().is_empty());

        state.resize(VIEWPORT);
        state.update(&mut rng);
        assert_eq!(state.flakes().len(), 200);
    }

    #[test]
    fn test_frame_skips_missing_surface() {
        let mut rng = rng();
        let mut state = state(&mut rng);
        let before = state.flakes().to_vec();

        let mut nothing = SnowRaster::new(0, 0, CellMetrics::default());
        state.frame(&mut nothing, &mut rng);
        assert_eq!(state.flakes(), before.as_slice());
    }

    #[test]
    fn test_frame_paints_halo_and_flakes() {
        let mut rng = rng();
        let mut state = state(&mut rng);
        let metrics = CellMetrics::default();
        let mut raster = SnowRaster::new(80, 24, metrics);

        state.pointer_moved(metrics.cell_center(40, 12));
        state.frame(&mut raster, &mut rng);

        assert!(raster.cell(40, 12).unwrap().tint.is_some());
        assert!(raster.cell(0, 0).unwrap().tint.is_none());

        let painted = (0..24)
            .flat_map(|row| (0..80).map(move |col| (col, row)))
            .filter(|&(col, row)| raster.cell(col, row).unwrap().flake.is_some())
            .count();
        assert!(painted > 0);
        assert!(painted <= 200);
    }

    #[test]
    fn test_render_does_not_advance() {
        let mut rng = rng();
        let state = state(&mut rng);
        let before = state.flakes().to_vec();
        let mut raster = SnowRaster::new(80, 24, CellMetrics::default());
        state.render(&mut raster);
        assert_eq!(state.flakes(), before.as_slice());
    }
}
