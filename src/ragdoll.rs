//! Rigid-body ragdoll built on rapier2d.
//!
//! All simulation (integration, collision resolution, constraint solving) is
//! delegated to rapier2d. This module only configures bodies, colliders and
//! revolute joints, and maps engine coordinates to screen pixels. The world
//! uses screen orientation: y grows downward, so gravity points at +y.

use rapier2d::prelude::*;
use raylib::prelude::Vector2;
use tracing::debug;

/// Conversion factor between screen pixels and physics meters.
pub const PIXELS_PER_METER: f32 = 30.0;

/// Fixed simulation time step in seconds.
pub const TIME_STEP: f32 = 1.0 / 60.0;

/// A rapier2d world plus the pipeline state needed to step it.
pub struct World {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    gravity: Vector<Real>,
}

impl World {
    /// Create a world with the given gravity in meters per second squared,
    /// y-down to match screen space.
    pub fn new(gravity: Vector2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = TIME_STEP;
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            gravity: vector![gravity.x, gravity.y],
        }
    }

    fn add_body(&mut self, center_px: Vector2, dynamic: bool, collider: Collider) -> RigidBodyHandle {
        let builder = if dynamic {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let body = builder
            .translation(vector![
                center_px.x / PIXELS_PER_METER,
                center_px.y / PIXELS_PER_METER
            ])
            .build();
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Add a box body with one cuboid collider, dimensions in pixels.
    pub fn add_box(
        &mut self,
        center_px: Vector2,
        size_px: Vector2,
        dynamic: bool,
        density: f32,
        friction: f32,
    ) -> RigidBodyHandle {
        let collider = ColliderBuilder::cuboid(
            size_px.x * 0.5 / PIXELS_PER_METER,
            size_px.y * 0.5 / PIXELS_PER_METER,
        )
        .density(density)
        .friction(friction)
        .build();
        self.add_body(center_px, dynamic, collider)
    }

    /// Add a circular body, radius in pixels.
    pub fn add_circle(
        &mut self,
        center_px: Vector2,
        radius_px: f32,
        dynamic: bool,
        density: f32,
        friction: f32,
    ) -> RigidBodyHandle {
        let collider = ColliderBuilder::ball(radius_px / PIXELS_PER_METER)
            .density(density)
            .friction(friction)
            .build();
        self.add_body(center_px, dynamic, collider)
    }

    /// Join two bodies with a revolute joint, anchors in body-local pixels
    /// and enabled rotation limits in degrees.
    pub fn connect(
        &mut self,
        first: RigidBodyHandle,
        second: RigidBodyHandle,
        anchor_first_px: Vector2,
        anchor_second_px: Vector2,
        lower_deg: f32,
        upper_deg: f32,
    ) -> ImpulseJointHandle {
        let joint = RevoluteJointBuilder::new()
            .local_anchor1(point![
                anchor_first_px.x / PIXELS_PER_METER,
                anchor_first_px.y / PIXELS_PER_METER
            ])
            .local_anchor2(point![
                anchor_second_px.x / PIXELS_PER_METER,
                anchor_second_px.y / PIXELS_PER_METER
            ])
            .limits([lower_deg.to_radians(), upper_deg.to_radians()]);
        self.impulse_joints.insert(first, second, joint, true)
    }

    /// Advance the simulation by one fixed time step.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Body center in pixels plus rotation in degrees.
    pub fn pose(&self, handle: RigidBodyHandle) -> (Vector2, f32) {
        let body = &self.bodies[handle];
        let translation = body.translation();
        (
            Vector2::new(
                translation.x * PIXELS_PER_METER,
                translation.y * PIXELS_PER_METER,
            ),
            body.rotation().angle().to_degrees(),
        )
    }
}

/// Head radius in pixels.
pub const HEAD_RADIUS: f32 = 15.0;
/// Torso dimensions in pixels.
pub const TORSO_SIZE: Vector2 = Vector2 { x: 30.0, y: 100.0 };
/// Arm dimensions in pixels.
pub const ARM_SIZE: Vector2 = Vector2 { x: 80.0, y: 20.0 };
/// Leg dimensions in pixels.
pub const LEG_SIZE: Vector2 = Vector2 { x: 20.0, y: 100.0 };

const PART_DENSITY: f32 = 1.0;
const PART_FRICTION: f32 = 0.3;

/// Handles for the six ragdoll parts.
pub struct Ragdoll {
    /// Circular head.
    pub head: RigidBodyHandle,
    /// Central torso the limbs hang from.
    pub torso: RigidBodyHandle,
    /// Left arm.
    pub left_arm: RigidBodyHandle,
    /// Right arm.
    pub right_arm: RigidBodyHandle,
    /// Left leg.
    pub left_leg: RigidBodyHandle,
    /// Right leg.
    pub right_leg: RigidBodyHandle,
}

impl Ragdoll {
    /// Spawn a ragdoll with its torso centered at `origin` (pixels).
    ///
    /// Six dynamic parts joined by five limited revolute joints: neck at
    /// +/-30 degrees, shoulders at +/-90, hips at +/-45. Parts are placed so
    /// every joint starts unstretched.
    pub fn spawn(world: &mut World, origin: Vector2) -> Self {
        let half_torso = Vector2::new(TORSO_SIZE.x * 0.5, TORSO_SIZE.y * 0.5);

        let torso = world.add_box(origin, TORSO_SIZE, true, PART_DENSITY, PART_FRICTION);
        let head = world.add_circle(
            origin + Vector2::new(0.0, -half_torso.y - HEAD_RADIUS),
            HEAD_RADIUS,
            true,
            PART_DENSITY,
            PART_FRICTION,
        );
        let left_arm = world.add_box(
            origin + Vector2::new(-half_torso.x - ARM_SIZE.x * 0.5, -30.0),
            ARM_SIZE,
            true,
            PART_DENSITY,
            PART_FRICTION,
        );
        let right_arm = world.add_box(
            origin + Vector2::new(half_torso.x + ARM_SIZE.x * 0.5, -30.0),
            ARM_SIZE,
            true,
            PART_DENSITY,
            PART_FRICTION,
        );
        let left_leg = world.add_box(
            origin + Vector2::new(-10.0, half_torso.y + LEG_SIZE.y * 0.5),
            LEG_SIZE,
            true,
            PART_DENSITY,
            PART_FRICTION,
        );
        let right_leg = world.add_box(
            origin + Vector2::new(10.0, half_torso.y + LEG_SIZE.y * 0.5),
            LEG_SIZE,
            true,
            PART_DENSITY,
            PART_FRICTION,
        );

        world.connect(
            torso,
            head,
            Vector2::new(0.0, -half_torso.y),
            Vector2::new(0.0, HEAD_RADIUS),
            -30.0,
            30.0,
        );
        world.connect(
            torso,
            left_arm,
            Vector2::new(-half_torso.x, -30.0),
            Vector2::new(ARM_SIZE.x * 0.5, 0.0),
            -90.0,
            90.0,
        );
        world.connect(
            torso,
            right_arm,
            Vector2::new(half_torso.x, -30.0),
            Vector2::new(-ARM_SIZE.x * 0.5, 0.0),
            -90.0,
            90.0,
        );
        world.connect(
            torso,
            left_leg,
            Vector2::new(-10.0, half_torso.y),
            Vector2::new(0.0, -LEG_SIZE.y * 0.5),
            -45.0,
            45.0,
        );
        world.connect(
            torso,
            right_leg,
            Vector2::new(10.0, half_torso.y),
            Vector2::new(0.0, -LEG_SIZE.y * 0.5),
            -45.0,
            45.0,
        );

        debug!(origin_x = origin.x, origin_y = origin.y, "spawned ragdoll");

        Self {
            head,
            torso,
            left_arm,
            right_arm,
            left_leg,
            right_leg,
        }
    }

    /// Rectangular limbs with their drawing sizes, torso first.
    pub fn limbs(&self) -> [(RigidBodyHandle, Vector2); 5] {
        [
            (self.torso, TORSO_SIZE),
            (self.left_arm, ARM_SIZE),
            (self.right_arm, ARM_SIZE),
            (self.left_leg, LEG_SIZE),
            (self.right_leg, LEG_SIZE),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN_GRAVITY: Vector2 = Vector2 { x: 0.0, y: 9.8 };

    fn world_with_ground() -> World {
        let mut world = World::new(SCREEN_GRAVITY);
        world.add_box(
            Vector2::new(400.0, 590.0),
            Vector2::new(800.0, 40.0),
            false,
            1.0,
            0.3,
        );
        world
    }

    #[test]
    fn test_fixed_body_stays_put() {
        let mut world = world_with_ground();
        let slab = world.add_box(
            Vector2::new(100.0, 100.0),
            Vector2::new(50.0, 50.0),
            false,
            1.0,
            0.3,
        );

        for _ in 0..60 {
            world.step();
        }

        let (pose, angle) = world.pose(slab);
        assert!((pose.x - 100.0).abs() < 1e-3);
        assert!((pose.y - 100.0).abs() < 1e-3);
        assert!(angle.abs() < 1e-3);
    }

    #[test]
    fn test_dynamic_circle_falls() {
        let mut world = world_with_ground();
        let ball = world.add_circle(Vector2::new(400.0, 100.0), 15.0, true, 1.0, 0.3);

        for _ in 0..60 {
            world.step();
        }

        let (pose, _) = world.pose(ball);
        assert!(pose.y > 100.0);
    }

    #[test]
    fn test_ragdoll_falls_and_settles_above_ground() {
        let mut world = world_with_ground();
        let doll = Ragdoll::spawn(&mut world, Vector2::new(400.0, 150.0));

        // Ten simulated seconds is plenty for the drop to settle.
        for _ in 0..600 {
            world.step();
        }

        let (torso, _) = world.pose(doll.torso);
        assert!(torso.y > 150.0, "torso never fell: y = {}", torso.y);
        assert!(torso.y < 575.0, "torso sank into the ground: y = {}", torso.y);
    }

    #[test]
    fn test_joints_keep_the_ragdoll_together() {
        let mut world = world_with_ground();
        let doll = Ragdoll::spawn(&mut world, Vector2::new(400.0, 150.0));

        for _ in 0..600 {
            world.step();
        }

        let (torso, _) = world.pose(doll.torso);
        for (handle, _) in doll.limbs() {
            let (part, _) = world.pose(handle);
            assert!(
                (part - torso).length() < 200.0,
                "limb drifted away from the torso"
            );
        }
        let (head, _) = world.pose(doll.head);
        assert!((head - torso).length() < 150.0, "head came off");
    }

    #[test]
    fn test_parts_keep_finite_poses() {
        let mut world = world_with_ground();
        let doll = Ragdoll::spawn(&mut world, Vector2::new(400.0, 150.0));

        for _ in 0..120 {
            world.step();
        }

        for (handle, _) in doll.limbs() {
            let (pose, angle) = world.pose(handle);
            assert!(pose.x.is_finite() && pose.y.is_finite());
            assert!(angle.is_finite());
        }
    }
}
