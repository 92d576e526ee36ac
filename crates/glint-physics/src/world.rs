//! Physics world wrapping Rapier 3D

use glint_core::{EntityId, LayerMask, RayHit, Raycaster, Vec3};
use rapier3d::prelude::*;

/// Wraps Rapier's physics pipeline and body/collider sets
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    /// Collision events from the last step
    collision_recv: crossbeam::channel::Receiver<CollisionEvent>,
    _contact_force_recv: crossbeam::channel::Receiver<ContactForceEvent>,
    event_handler: ChannelEventCollector,
}

impl PhysicsWorld {
    /// Create a new physics world with standard gravity
    pub fn new() -> Self {
        let (collision_send, collision_recv) = crossbeam::channel::unbounded();
        let (contact_force_send, contact_force_recv) = crossbeam::channel::unbounded();
        let event_handler = ChannelEventCollector::new(collision_send, contact_force_send);

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collision_recv,
            _contact_force_recv: contact_force_recv,
            event_handler,
        }
    }

    /// Step the physics simulation by dt seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
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
            Some(&mut self.query_pipeline),
            &(),
            &self.event_handler,
        );
    }

    /// Rebuild the query acceleration structure after inserting colliders outside a step
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Drain collision events from the last step
    pub fn drain_collision_events(&self) -> Vec<CollisionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.collision_recv.try_recv() {
            events.push(event);
        }
        events
    }

    /// Insert a rigid body and return its handle
    pub fn insert_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Insert a collider attached to a rigid body
    pub fn insert_collider_with_parent(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Insert a collider that belongs to no rigid body (static scenery, triggers)
    pub fn insert_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Entity stored in a collider's user data
    pub fn collider_entity(&self, handle: ColliderHandle) -> Option<EntityId> {
        self.collider_set
            .get(handle)
            .map(|c| EntityId::from_raw(c.user_data as u64))
    }

    /// Is the collider a sensor (trigger volume)?
    pub fn is_sensor(&self, handle: ColliderHandle) -> bool {
        self.collider_set
            .get(handle)
            .map(|c| c.is_sensor())
            .unwrap_or(false)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision groups for a solid collider living on `layer`
pub fn layer_groups(layer: u8) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(LayerMask::from_layer(layer).bits()),
        Group::ALL,
    )
}

impl Raycaster for PhysicsWorld {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.normalized();
        if mask.is_empty() || dir == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![dir.x, dir.y, dir.z],
        );
        // Trigger volumes never block the gaze
        let filter = QueryFilter::default()
            .exclude_sensors()
            .groups(InteractionGroups::new(
                Group::ALL,
                Group::from_bits_truncate(mask.bits()),
            ));

        let (handle, distance) = self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true,
            filter,
        )?;

        self.collider_entity(handle)
            .map(|entity| RayHit { entity, distance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAY_LAYER: u8 = 2;

    fn cube(world: &mut PhysicsWorld, entity: EntityId, at: Vec3, layer: u8) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(0.5, 0.5, 0.5)
            .translation(vector![at.x, at.y, at.z])
            .collision_groups(layer_groups(layer))
            .user_data(entity.raw() as u128)
            .build();
        world.insert_static_collider(collider)
    }

    #[test]
    fn test_create_physics_world() {
        let world = PhysicsWorld::new();
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
    }

    #[test]
    fn test_raycast_hits_masked_layer() {
        let mut world = PhysicsWorld::new();
        let desk = EntityId::from_raw(7);
        cube(&mut world, desk, Vec3::new(0.0, 0.0, -2.0), RAY_LAYER);
        world.refresh_queries();

        let hit = world
            .cast_ray(
                Vec3::ZERO,
                Vec3::FORWARD,
                5.0,
                LayerMask::from_layer(RAY_LAYER),
            )
            .expect("ray should hit the cube");
        assert_eq!(hit.entity, desk);
        assert!((hit.distance - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_raycast_respects_reach_and_mask() {
        let mut world = PhysicsWorld::new();
        cube(&mut world, EntityId::from_raw(1), Vec3::new(0.0, 0.0, -2.0), RAY_LAYER);
        world.refresh_queries();

        // Too short to reach the near face at 1.5
        assert!(world
            .cast_ray(Vec3::ZERO, Vec3::FORWARD, 1.0, LayerMask::from_layer(RAY_LAYER))
            .is_none());
        // Wrong layer
        assert!(world
            .cast_ray(Vec3::ZERO, Vec3::FORWARD, 5.0, LayerMask::from_layer(0))
            .is_none());
        assert!(world
            .cast_ray(Vec3::ZERO, Vec3::FORWARD, 5.0, LayerMask::NONE)
            .is_none());
    }

    #[test]
    fn test_raycast_returns_closest() {
        let mut world = PhysicsWorld::new();
        let near = EntityId::from_raw(10);
        let far = EntityId::from_raw(11);
        cube(&mut world, far, Vec3::new(0.0, 0.0, -4.0), RAY_LAYER);
        cube(&mut world, near, Vec3::new(0.0, 0.0, -2.0), RAY_LAYER);
        world.refresh_queries();

        let hit = world
            .cast_ray(Vec3::ZERO, Vec3::FORWARD, 10.0, LayerMask::ALL)
            .unwrap();
        assert_eq!(hit.entity, near);
    }

    #[test]
    fn test_raycast_ignores_sensors() {
        let mut world = PhysicsWorld::new();
        let sensor = ColliderBuilder::cuboid(1.0, 1.0, 1.0)
            .translation(vector![0.0, 0.0, -2.0])
            .sensor(true)
            .user_data(99)
            .build();
        world.insert_static_collider(sensor);
        world.refresh_queries();

        assert!(world
            .cast_ray(Vec3::ZERO, Vec3::FORWARD, 10.0, LayerMask::ALL)
            .is_none());
    }
}
