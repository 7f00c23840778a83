use rapier2d::prelude::*;

// Simulation constants
pub const FIXED_TIME_STEP: Real = 1.0 / 60.0;
pub const SOLVER_ITERATIONS: usize = 8;

// Arena layout, world units. The y axis points down (screen convention),
// so the ground sits at y = 100 and the ceiling at y = 0.
pub const ARENA_SIZE: Real = 100.0;
pub const WALL_THICKNESS: Real = 10.0;
pub const GRAVITY_Y: Real = 9.8;

// Seeded ball
pub const BALL_RADIUS: Real = 5.0;
pub const BALL_DENSITY: Real = 1.0;
pub const BALL_FRICTION: Real = 0.5;
pub const BALL_RESTITUTION: Real = 0.1;
pub const BALL_SPAWN: [Real; 2] = [50.0, 40.0];

// Ceiling tether
pub const TETHER_REST_LENGTH: Real = 10.0;
pub const TETHER_FREQUENCY_HZ: Real = 0.1;
pub const TETHER_DAMPING_RATIO: Real = 1.0;

// Mouse drag
pub const DRAG_MAX_FORCE_FACTOR: Real = 50_000.0;
pub const DRAG_FREQUENCY_HZ: Real = 5.0;
pub const DRAG_DAMPING_RATIO: Real = 0.7;

// Half extent of the quasi point-query box used when picking
pub const PICK_HALF_EXTENT: Real = 0.001;

/// Convert the frequency/damping-ratio spring parameterization into
/// stiffness and damping coefficients for the given mass.
pub fn spring_params(mass: Real, frequency_hz: Real, damping_ratio: Real) -> (Real, Real) {
    let omega = 2.0 * std::f32::consts::PI * frequency_hz;
    let stiffness = mass * omega * omega;
    let damping = 2.0 * mass * damping_ratio * omega;
    (stiffness, damping)
}

#[derive(Debug, Clone)]
pub struct RigidBodySnapshot {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub rotation: f32,
}
