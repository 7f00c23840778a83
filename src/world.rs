use rapier2d::parry::bounding_volume::{Aabb, BoundingVolume};
use rapier2d::{geometry::DefaultBroadPhase, prelude::*};
use std::num::NonZeroUsize;
use tracing::debug;

use crate::physics::{
    spring_params, RigidBodySnapshot, ARENA_SIZE, BALL_DENSITY, BALL_FRICTION, BALL_RADIUS,
    BALL_RESTITUTION, BALL_SPAWN, FIXED_TIME_STEP, SOLVER_ITERATIONS, TETHER_DAMPING_RATIO,
    TETHER_FREQUENCY_HZ, TETHER_REST_LENGTH, WALL_THICKNESS,
};

#[derive(Debug, Clone, Copy)]
pub enum BodyVisualShape {
    Circle { radius: Real },
    Box { half_extents: [Real; 2] },
}

/// The authoritative simulation state: every body, collider and joint of the
/// arena, plus the stepping machinery. Built once at startup and mutated only
/// between steps.
pub struct SandboxWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pub(crate) island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) rigid_body_set: RigidBodySet,
    pub(crate) collider_set: ColliderSet,
    pub(crate) impulse_joint_set: ImpulseJointSet,
    pub(crate) multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    ground: RigidBodyHandle,
    ball: RigidBodyHandle,
    tether: ImpulseJointHandle,
    time: Real,
}

impl SandboxWorld {
    /// Build the arena: ground, side walls, ceiling, one dynamic ball near
    /// mid-height, and a soft distance joint tethering the ball to the
    /// ceiling center.
    pub fn new(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FIXED_TIME_STEP;
        if let Some(iterations) = NonZeroUsize::new(SOLVER_ITERATIONS) {
            integration_parameters.num_solver_iterations = iterations;
        }

        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();
        let mut impulse_joint_set = ImpulseJointSet::new();

        let half = ARENA_SIZE * 0.5;
        let half_thickness = WALL_THICKNESS * 0.5;

        let ground = Self::insert_static_box(
            &mut rigid_body_set,
            &mut collider_set,
            [half, half_thickness],
            point![half, ARENA_SIZE],
        );
        Self::insert_static_box(
            &mut rigid_body_set,
            &mut collider_set,
            [half_thickness, half],
            point![0.0, half],
        );
        Self::insert_static_box(
            &mut rigid_body_set,
            &mut collider_set,
            [half_thickness, half],
            point![ARENA_SIZE, half],
        );
        let ceiling = Self::insert_static_box(
            &mut rigid_body_set,
            &mut collider_set,
            [half, half_thickness],
            point![half, 0.0],
        );

        let ball = Self::insert_ball(
            &mut rigid_body_set,
            &mut collider_set,
            point![BALL_SPAWN[0], BALL_SPAWN[1]],
            BALL_RADIUS,
            BALL_DENSITY,
        );

        // Soft tether from the ball center to the ceiling center.
        let ball_mass = rigid_body_set[ball].mass();
        let (stiffness, damping) =
            spring_params(ball_mass, TETHER_FREQUENCY_HZ, TETHER_DAMPING_RATIO);
        let tether_joint = SpringJointBuilder::new(TETHER_REST_LENGTH, stiffness, damping)
            .local_anchor1(Point::origin())
            .local_anchor2(Point::origin())
            .build();
        let tether = impulse_joint_set.insert(ceiling, ball, tether_joint, true);

        let world = Self {
            pipeline: PhysicsPipeline::new(),
            gravity,
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set,
            collider_set,
            impulse_joint_set,
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            ground,
            ball,
            tether,
            time: 0.0,
        };

        debug!(
            bodies = world.body_count(),
            constraints = world.constraint_count(),
            "arena built"
        );
        world
    }

    fn insert_static_box(
        rigid_body_set: &mut RigidBodySet,
        collider_set: &mut ColliderSet,
        half_extents: [Real; 2],
        position: Point<Real>,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().translation(position.coords).build();
        let handle = rigid_body_set.insert(body);
        let collider = ColliderBuilder::cuboid(half_extents[0], half_extents[1])
            .friction(BALL_FRICTION)
            .restitution(0.0)
            .build();
        collider_set.insert_with_parent(collider, handle, rigid_body_set);
        handle
    }

    fn insert_ball(
        rigid_body_set: &mut RigidBodySet,
        collider_set: &mut ColliderSet,
        position: Point<Real>,
        radius: Real,
        density: Real,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic().translation(position.coords).build();
        let handle = rigid_body_set.insert(body);
        let collider = ColliderBuilder::ball(radius)
            .density(density)
            .friction(BALL_FRICTION)
            .restitution(BALL_RESTITUTION)
            .build();
        collider_set.insert_with_parent(collider, handle, rigid_body_set);
        handle
    }

    /// Insert an extra static rectangular body at the given center position.
    pub fn spawn_static_box(
        &mut self,
        half_extents: [Real; 2],
        position: Point<Real>,
    ) -> RigidBodyHandle {
        Self::insert_static_box(
            &mut self.rigid_body_set,
            &mut self.collider_set,
            half_extents,
            position,
        )
    }

    /// Insert an extra dynamic circular body; its mass derives from the density.
    pub fn spawn_ball(
        &mut self,
        position: Point<Real>,
        radius: Real,
        density: Real,
    ) -> RigidBodyHandle {
        Self::insert_ball(
            &mut self.rigid_body_set,
            &mut self.collider_set,
            position,
            radius,
            density,
        )
    }

    /// Advance the simulation by exactly one fixed timestep, then clear the
    /// forces accumulated on every body so event-time forces never persist
    /// across frames.
    pub fn step(&mut self) {
        let physics_hooks = ();
        let event_handler = ();
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &event_handler,
        );
        self.time += self.integration_parameters.dt;

        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    /// Broad-phase region query: invokes `on_candidate` for every collider
    /// whose AABB overlaps `aabb`, stopping as soon as the callback returns
    /// `false`.
    pub fn query_aabb(
        &self,
        aabb: &Aabb,
        mut on_candidate: impl FnMut(ColliderHandle, &Collider) -> bool,
    ) {
        for (handle, collider) in self.collider_set.iter() {
            if collider.compute_aabb().intersects(aabb) && !on_candidate(handle, collider) {
                return;
            }
        }
    }

    pub fn ground(&self) -> RigidBodyHandle {
        self.ground
    }

    pub fn ball(&self) -> RigidBodyHandle {
        self.ball
    }

    pub fn tether(&self) -> ImpulseJointHandle {
        self.tether
    }

    pub fn time(&self) -> Real {
        self.time
    }

    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.impulse_joint_set.len()
    }

    pub fn body_snapshot(&self, handle: RigidBodyHandle) -> Option<RigidBodySnapshot> {
        self.rigid_body_set.get(handle).map(|body| RigidBodySnapshot {
            position: [body.translation().x as f32, body.translation().y as f32],
            velocity: [body.linvel().x as f32, body.linvel().y as f32],
            rotation: body.rotation().angle() as f32,
        })
    }

    /// Query an approximate visual shape (circle/box) for the given body handle,
    /// based on the collider shape attached to that body.
    pub fn body_visual_shape(&self, handle: RigidBodyHandle) -> Option<BodyVisualShape> {
        for (_collider_handle, collider) in self.collider_set.iter() {
            if collider.parent() == Some(handle) {
                let shape = collider.shape();
                if let Some(ball) = shape.as_ball() {
                    return Some(BodyVisualShape::Circle { radius: ball.radius });
                }
                if let Some(cuboid) = shape.as_cuboid() {
                    let he = cuboid.half_extents;
                    return Some(BodyVisualShape::Box { half_extents: [he.x, he.y] });
                }
            }
        }
        None
    }

    /// Snapshot of every collider for debug drawing.
    pub fn debug_shapes(&self) -> Vec<(BodyVisualShape, RigidBodySnapshot)> {
        self.collider_set
            .iter()
            .filter_map(|(_, collider)| {
                let parent = collider.parent()?;
                let shape = self.body_visual_shape(parent)?;
                let snapshot = self.body_snapshot(parent)?;
                Some((shape, snapshot))
            })
            .collect()
    }

    /// World-space anchor pairs of every joint, for debug drawing.
    pub fn debug_joints(&self) -> Vec<([f32; 2], [f32; 2])> {
        self.impulse_joint_set
            .iter()
            .filter_map(|(_, joint)| {
                let body1 = self.rigid_body_set.get(joint.body1)?;
                let body2 = self.rigid_body_set.get(joint.body2)?;
                let anchor1 = body1.position() * joint.data.local_anchor1();
                let anchor2 = body2.position() * joint.data.local_anchor2();
                Some(([anchor1.x, anchor1.y], [anchor2.x, anchor2.y]))
            })
            .collect()
    }
}
