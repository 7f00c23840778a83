mod app;
mod drag;
mod input;
mod physics;
mod picker;
mod world;

// Re-export public items
pub use app::{DebugRenderer, Sandbox};
pub use drag::{DragController, DragJoint};
pub use input::{InputEvent, Viewport};
pub use physics::{
    spring_params, RigidBodySnapshot, ARENA_SIZE, BALL_RADIUS, BALL_SPAWN, DRAG_MAX_FORCE_FACTOR,
    FIXED_TIME_STEP, GRAVITY_Y, PICK_HALF_EXTENT, SOLVER_ITERATIONS, TETHER_REST_LENGTH,
    WALL_THICKNESS,
};
pub use picker::pick_dynamic_body;
pub use world::{BodyVisualShape, SandboxWorld};
