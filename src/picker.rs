use rapier2d::parry::bounding_volume::Aabb;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

use crate::physics::PICK_HALF_EXTENT;
use crate::world::SandboxWorld;

/// Find the dynamic body whose shape contains the given world point.
///
/// Two-phase lookup: a tiny AABB centered on the point drives the
/// broad-phase region query, then each candidate is checked for exact
/// point containment. Static bodies are skipped even when their shape
/// contains the point, and the query stops at the first dynamic hit.
pub fn pick_dynamic_body(world: &SandboxWorld, point: Point<Real>) -> Option<RigidBodyHandle> {
    let epsilon = vector![PICK_HALF_EXTENT, PICK_HALF_EXTENT];
    let aabb = Aabb::new(point - epsilon, point + epsilon);

    let mut hit = None;
    world.query_aabb(&aabb, |_, collider| {
        let Some(parent) = collider.parent() else {
            return true;
        };
        let Some(body) = world.rigid_body_set.get(parent) else {
            return true;
        };
        if !body.is_dynamic() {
            return true;
        }
        if collider.shape().contains_point(collider.position(), &point) {
            hit = Some(parent);
            return false;
        }
        true
    });
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BALL_SPAWN, GRAVITY_Y};

    fn world() -> SandboxWorld {
        SandboxWorld::new(vector![0.0, GRAVITY_Y])
    }

    #[test]
    fn picks_the_ball_at_its_center() {
        let world = world();
        let hit = pick_dynamic_body(&world, point![BALL_SPAWN[0], BALL_SPAWN[1]]);
        assert_eq!(hit, Some(world.ball()));
    }

    #[test]
    fn skips_static_bodies_even_on_containment() {
        let world = world();
        // Inside the ground slab and the right wall, far from the ball.
        assert!(pick_dynamic_body(&world, point![99.0, 99.0]).is_none());
        assert!(pick_dynamic_body(&world, point![50.0, 100.0]).is_none());
    }

    #[test]
    fn misses_points_in_open_space() {
        let world = world();
        assert!(pick_dynamic_body(&world, point![20.0, 20.0]).is_none());
        // Just outside the ball surface.
        assert!(pick_dynamic_body(&world, point![BALL_SPAWN[0] + 5.2, BALL_SPAWN[1]]).is_none());
    }
}
