use macroquad::prelude::*;
use tetherbox::{
    BodyVisualShape, DebugRenderer, InputEvent, RigidBodySnapshot, Sandbox, SandboxWorld, Viewport,
    GRAVITY_Y,
};

use rapier2d::prelude::{nalgebra, vector};

/// Draws every collider and joint of the world. Visualization only, never
/// touches the simulation.
struct MacroquadRenderer {
    viewport: Viewport,
}

impl DebugRenderer for MacroquadRenderer {
    fn render_debug(&mut self, world: &SandboxWorld) {
        clear_background(Color::from_rgba(12, 16, 24, 255));

        for (shape, snapshot) in world.debug_shapes() {
            match shape {
                BodyVisualShape::Circle { radius } => {
                    self.draw_circle_body(&snapshot, radius as f32)
                }
                BodyVisualShape::Box { half_extents } => {
                    self.draw_box_body(&snapshot, [half_extents[0] as f32, half_extents[1] as f32])
                }
            }
        }

        for (anchor1, anchor2) in world.debug_joints() {
            let a = self.viewport.world_to_screen(anchor1);
            let b = self.viewport.world_to_screen(anchor2);
            draw_line(a[0], a[1], b[0], b[1], 2.0, SKYBLUE);
        }

        draw_text(
            &format!("t {:.1}s  fps {}", world.time(), get_fps()),
            20.0,
            32.0,
            24.0,
            LIGHTGRAY,
        );
        draw_text(
            "drag the ball with the left mouse button, Esc to quit",
            20.0,
            screen_height() - 20.0,
            20.0,
            GRAY,
        );
    }
}

impl MacroquadRenderer {
    fn draw_circle_body(&self, snapshot: &RigidBodySnapshot, radius: f32) {
        let center = self.viewport.world_to_screen(snapshot.position);
        draw_circle(
            center[0],
            center[1],
            radius * self.viewport.pixels_per_unit(),
            YELLOW,
        );
    }

    fn draw_box_body(&self, snapshot: &RigidBodySnapshot, half_extents: [f32; 2]) {
        let local_corners = [
            vec2(-half_extents[0], -half_extents[1]),
            vec2(half_extents[0], -half_extents[1]),
            vec2(half_extents[0], half_extents[1]),
            vec2(-half_extents[0], half_extents[1]),
        ];

        let rotation = Mat2::from_angle(snapshot.rotation);
        let translation = vec2(snapshot.position[0], snapshot.position[1]);

        let mut screen_points = [Vec2::ZERO; 4];
        for (idx, corner) in local_corners.iter().enumerate() {
            let world = translation + rotation * *corner;
            let screen = self.viewport.world_to_screen([world.x, world.y]);
            screen_points[idx] = vec2(screen[0], screen[1]);
        }

        draw_triangle(screen_points[0], screen_points[1], screen_points[2], DARKGRAY);
        draw_triangle(screen_points[0], screen_points[2], screen_points[3], DARKGRAY);
    }
}

fn poll_events() -> Vec<InputEvent> {
    let mut events = Vec::new();
    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        events.push(InputEvent::PointerPressed { x, y });
    }
    if is_mouse_button_released(MouseButton::Left) {
        events.push(InputEvent::PointerReleased);
    }
    if is_key_pressed(KeyCode::Escape) {
        events.push(InputEvent::Closed);
    }
    events
}

#[macroquad::main("Tethered ball sandbox")]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    request_new_screen_size(800.0, 800.0);

    let mut sandbox = Sandbox::new(
        vector![0.0, GRAVITY_Y],
        Viewport::new(screen_width(), screen_height()),
    );
    let mut renderer = MacroquadRenderer {
        viewport: sandbox.viewport(),
    };

    loop {
        // Keep pointer mapping in sync with the window size.
        let viewport = Viewport::new(screen_width(), screen_height());
        sandbox.set_viewport(viewport);
        renderer.viewport = viewport;

        let events = poll_events();
        if !sandbox.run_frame(events, mouse_position(), &mut renderer) {
            break;
        }

        next_frame().await;
    }
}
