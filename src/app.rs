use rapier2d::prelude::*;
use tracing::debug;

use crate::drag::DragController;
use crate::input::{InputEvent, Viewport};
use crate::world::SandboxWorld;

/// Render collaborator: draws the current world state once per frame and
/// never mutates it.
pub trait DebugRenderer {
    fn render_debug(&mut self, world: &SandboxWorld);
}

/// Top-level per-frame orchestrator. Owns the world, the drag controller
/// and the screen-to-world mapping; every frame drains input, steps the
/// simulation by one fixed timestep and hands the result to the renderer.
pub struct Sandbox {
    world: SandboxWorld,
    drag: DragController,
    viewport: Viewport,
    close_requested: bool,
}

impl Sandbox {
    pub fn new(gravity: Vector<Real>, viewport: Viewport) -> Self {
        Self {
            world: SandboxWorld::new(gravity),
            drag: DragController::new(),
            viewport,
            close_requested: false,
        }
    }

    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Track window resizes so pointer mapping stays correct.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Closed => {
                debug!("close requested");
                self.close_requested = true;
            }
            InputEvent::PointerPressed { x, y } => {
                // Map to world space exactly once per press, then pick.
                let point = self.viewport.screen_to_world(x, y);
                self.drag.try_begin(&mut self.world, point);
            }
            InputEvent::PointerReleased => {
                self.drag.release(&mut self.world);
            }
        }
    }

    /// Run one frame: drain input, drive the drag target from the current
    /// pointer reading, step the physics, render. Returns `false` once a
    /// close was requested; the closing frame still completes, and any live
    /// drag is torn down before the loop stops.
    pub fn run_frame(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        pointer: (f32, f32),
        renderer: &mut impl DebugRenderer,
    ) -> bool {
        for event in events {
            self.handle_event(event);
        }

        if self.drag.is_dragging() {
            let point = self.viewport.screen_to_world(pointer.0, pointer.1);
            self.drag.update_target(&mut self.world, point);
        }

        self.world.step();
        renderer.render_debug(&self.world);

        if self.close_requested {
            self.drag.release(&mut self.world);
            return false;
        }
        true
    }
}
