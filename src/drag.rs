use rapier2d::prelude::*;
use tracing::debug;

use crate::physics::{spring_params, DRAG_DAMPING_RATIO, DRAG_FREQUENCY_HZ, DRAG_MAX_FORCE_FACTOR};
use crate::picker::pick_dynamic_body;
use crate::world::SandboxWorld;

/// Live drag: a kinematic pointer body that follows the cursor, joined to
/// the grabbed body by a force-limited spring.
#[derive(Debug, Clone)]
pub struct DragJoint {
    pointer_body: RigidBodyHandle,
    joint: ImpulseJointHandle,
    body: RigidBodyHandle,
    max_force: Real,
    target: Point<Real>,
}

impl DragJoint {
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn max_force(&self) -> Real {
        self.max_force
    }

    pub fn target(&self) -> Point<Real> {
        self.target
    }
}

/// Owns the at-most-one drag constraint and its Idle/Dragging lifecycle.
#[derive(Default)]
pub struct DragController {
    active: Option<DragJoint>,
}

impl DragController {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&DragJoint> {
        self.active.as_ref()
    }

    /// Try to start a drag at the given world point. Returns `true` when a
    /// dynamic body was picked and a constraint created. A press while a
    /// drag is already live is a no-op, so at most one constraint ever
    /// exists.
    pub fn try_begin(&mut self, world: &mut SandboxWorld, point: Point<Real>) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(body_handle) = pick_dynamic_body(world, point) else {
            return false;
        };
        let Some(body) = world.rigid_body_set.get(body_handle) else {
            return false;
        };

        // Anchor the grabbed body at the exact hit point.
        let local_anchor = body.position().inverse() * point;
        let mass = body.mass();
        let max_force = DRAG_MAX_FORCE_FACTOR * mass;
        let (stiffness, damping) = spring_params(mass, DRAG_FREQUENCY_HZ, DRAG_DAMPING_RATIO);

        let pointer_body = RigidBodyBuilder::kinematic_position_based()
            .translation(point.coords)
            .build();
        let pointer_handle = world.rigid_body_set.insert(pointer_body);

        // Soft pull toward the pointer origin, clamped to max_force so
        // heavier bodies feel equally stiff under the cursor.
        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .local_anchor1(Point::origin())
            .local_anchor2(local_anchor)
            .motor_model(JointAxis::LinX, MotorModel::ForceBased)
            .motor_model(JointAxis::LinY, MotorModel::ForceBased)
            .motor_position(JointAxis::LinX, 0.0, stiffness, damping)
            .motor_position(JointAxis::LinY, 0.0, stiffness, damping)
            .motor_max_force(JointAxis::LinX, max_force)
            .motor_max_force(JointAxis::LinY, max_force)
            .build();
        let joint_handle = world
            .impulse_joint_set
            .insert(pointer_handle, body_handle, joint, true);

        if let Some(body) = world.rigid_body_set.get_mut(body_handle) {
            body.wake_up(true);
        }

        debug!(?body_handle, max_force, "drag started");
        self.active = Some(DragJoint {
            pointer_body: pointer_handle,
            joint: joint_handle,
            body: body_handle,
            max_force,
            target: point,
        });
        true
    }

    /// Move the drag target to the current pointer position. No re-pick
    /// happens while dragging; a call while idle is ignored.
    pub fn update_target(&mut self, world: &mut SandboxWorld, point: Point<Real>) {
        if let Some(drag) = &mut self.active {
            drag.target = point;
            if let Some(pointer) = world.rigid_body_set.get_mut(drag.pointer_body) {
                pointer.set_next_kinematic_translation(point.coords);
            }
        }
    }

    /// Tear down the drag constraint, waking the dragged body first so its
    /// residual velocity keeps simulating. Releasing while idle is a no-op.
    pub fn release(&mut self, world: &mut SandboxWorld) {
        if let Some(drag) = self.active.take() {
            if let Some(body) = world.rigid_body_set.get_mut(drag.body) {
                body.wake_up(true);
            }
            world.impulse_joint_set.remove(drag.joint, true);
            world.rigid_body_set.remove(
                drag.pointer_body,
                &mut world.island_manager,
                &mut world.collider_set,
                &mut world.impulse_joint_set,
                &mut world.multibody_joint_set,
                true,
            );
            debug!(body_handle = ?drag.body, "drag released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BALL_SPAWN, GRAVITY_Y};

    fn world() -> SandboxWorld {
        SandboxWorld::new(vector![0.0, GRAVITY_Y])
    }

    #[test]
    fn press_on_the_ball_creates_one_constraint() {
        let mut world = world();
        let mut drag = DragController::new();
        assert!(drag.try_begin(&mut world, point![BALL_SPAWN[0], BALL_SPAWN[1]]));
        assert!(drag.is_dragging());
        // Tether plus the drag joint.
        assert_eq!(world.constraint_count(), 2);
    }

    #[test]
    fn second_press_while_dragging_is_a_no_op() {
        let mut world = world();
        let mut drag = DragController::new();
        assert!(drag.try_begin(&mut world, point![BALL_SPAWN[0], BALL_SPAWN[1]]));
        assert!(!drag.try_begin(&mut world, point![10.0, 10.0]));
        assert_eq!(world.constraint_count(), 2);
        // Target untouched until the next explicit update.
        let target = drag.active().unwrap().target();
        assert_eq!([target.x, target.y], BALL_SPAWN);
    }

    #[test]
    fn release_restores_the_world() {
        let mut world = world();
        let mut drag = DragController::new();
        let bodies_before = world.body_count();
        assert!(drag.try_begin(&mut world, point![BALL_SPAWN[0], BALL_SPAWN[1]]));
        drag.release(&mut world);
        assert!(!drag.is_dragging());
        assert_eq!(world.constraint_count(), 1);
        assert_eq!(world.body_count(), bodies_before);
    }

    #[test]
    fn release_while_idle_is_a_no_op() {
        let mut world = world();
        let mut drag = DragController::new();
        drag.release(&mut world);
        assert_eq!(world.constraint_count(), 1);

        // Press on empty space, then release: still nothing to tear down.
        assert!(!drag.try_begin(&mut world, point![99.0, 99.0]));
        drag.release(&mut world);
        assert_eq!(world.constraint_count(), 1);
    }

    #[test]
    fn max_force_scales_with_body_mass() {
        let mut world = world();
        let light = world.spawn_ball(point![20.0, 70.0], 3.0, 1.0);
        let heavy = world.spawn_ball(point![80.0, 70.0], 3.0, 2.0);
        let light_mass = world.rigid_body_set[light].mass();
        let heavy_mass = world.rigid_body_set[heavy].mass();
        assert!((heavy_mass - 2.0 * light_mass).abs() < 1e-3);

        let mut drag = DragController::new();
        assert!(drag.try_begin(&mut world, point![20.0, 70.0]));
        let light_force = drag.active().unwrap().max_force();
        drag.release(&mut world);

        assert!(drag.try_begin(&mut world, point![80.0, 70.0]));
        let heavy_force = drag.active().unwrap().max_force();
        drag.release(&mut world);

        assert!((heavy_force - 2.0 * light_force).abs() / heavy_force < 1e-4);
        assert!((light_force - DRAG_MAX_FORCE_FACTOR * light_mass).abs() < 1e-2);
    }

    #[test]
    fn dragged_ball_moves_toward_the_target() {
        let mut world = world();
        let mut drag = DragController::new();
        assert!(drag.try_begin(&mut world, point![BALL_SPAWN[0], BALL_SPAWN[1]]));
        for _ in 0..120 {
            drag.update_target(&mut world, point![70.0, 40.0]);
            world.step();
        }
        let ball = world.body_snapshot(world.ball()).unwrap();
        assert!(ball.position[0] > BALL_SPAWN[0] + 1.0);
    }
}
