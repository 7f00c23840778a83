use rapier2d::prelude::*;

use crate::physics::ARENA_SIZE;

/// Pre-decoded input stream consumed by the interaction loop. Pointer
/// coordinates are in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Closed,
    PointerPressed { x: f32, y: f32 },
    PointerReleased,
}

/// Maps window coordinates onto the fixed 100x100 world-unit arena.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn screen_to_world(&self, x: f32, y: f32) -> Point<Real> {
        point![
            x / self.width * ARENA_SIZE,
            y / self.height * ARENA_SIZE
        ]
    }

    pub fn world_to_screen(&self, point: [f32; 2]) -> [f32; 2] {
        [
            point[0] / ARENA_SIZE * self.width,
            point[1] / ARENA_SIZE * self.height,
        ]
    }

    /// Scale factor from world units to pixels along x.
    pub fn pixels_per_unit(&self) -> f32 {
        self.width / ARENA_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_the_window_onto_the_arena() {
        let viewport = Viewport::new(200.0, 400.0);
        let p = viewport.screen_to_world(100.0, 80.0);
        assert!((p.x - 50.0).abs() < 1e-5);
        assert!((p.y - 20.0).abs() < 1e-5);
    }

    #[test]
    fn round_trips_through_both_mappings() {
        let viewport = Viewport::new(640.0, 480.0);
        let world = viewport.screen_to_world(321.0, 123.0);
        let screen = viewport.world_to_screen([world.x, world.y]);
        assert!((screen[0] - 321.0).abs() < 1e-3);
        assert!((screen[1] - 123.0).abs() < 1e-3);
    }
}
