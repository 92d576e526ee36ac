//! Synchronization between GlintWorld components and Rapier colliders

use crate::world::{layer_groups, PhysicsWorld};
use glint_core::{EntityId, Vec3};
use glint_ecs::{BodyKind, ColliderDef, ColliderShape, GlintWorld, TriggerVolume};
use rapier3d::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Bridges typed collider components with Rapier's body and collider sets
///
/// Every collider carries its owning `EntityId` in `user_data`, so query and
/// event handles map straight back to entities.
pub struct PhysicsSync {
    /// EntityId -> RigidBodyHandle mapping (kinematic bodies only)
    pub body_map: HashMap<EntityId, RigidBodyHandle>,
    /// EntityId -> solid ColliderHandle mapping
    pub collider_map: HashMap<EntityId, ColliderHandle>,
    /// EntityId -> trigger sensor ColliderHandle mapping
    pub trigger_map: HashMap<EntityId, ColliderHandle>,
    /// Track which entities we've already synced
    synced_entities: HashSet<EntityId>,
}

impl Default for PhysicsSync {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsSync {
    pub fn new() -> Self {
        Self {
            body_map: HashMap::new(),
            collider_map: HashMap::new(),
            trigger_map: HashMap::new(),
            synced_entities: HashSet::new(),
        }
    }

    /// Push entities with collider or trigger components into Rapier.
    /// Returns the number of newly synced entities.
    pub fn sync_to_rapier(&mut self, world: &GlintWorld, physics: &mut PhysicsWorld) -> usize {
        let mut candidates = world.entities_with::<ColliderDef>();
        candidates.extend(world.entities_with::<TriggerVolume>());
        candidates.sort();
        candidates.dedup();

        let mut added = 0;
        for entity_id in candidates {
            if self.synced_entities.contains(&entity_id) {
                continue;
            }

            let position = world.position(entity_id).unwrap_or(Vec3::ZERO);

            let solid = world.get::<ColliderDef>(entity_id).map(|c| *c);
            if let Some(def) = solid {
                let collider = ColliderBuilder::new(shared_shape(&def.shape))
                    .collision_groups(layer_groups(def.layer))
                    .user_data(entity_id.raw() as u128);

                let handle = match def.body {
                    BodyKind::Fixed => physics.insert_static_collider(
                        collider
                            .translation(vector![position.x, position.y, position.z])
                            .build(),
                    ),
                    BodyKind::Kinematic => {
                        let body = RigidBodyBuilder::kinematic_position_based()
                            .translation(vector![position.x, position.y, position.z])
                            .build();
                        let body_handle = physics.insert_rigid_body(body);
                        self.body_map.insert(entity_id, body_handle);
                        // Kinematic bodies must also report overlaps with static triggers
                        let collider = collider
                            .active_collision_types(
                                ActiveCollisionTypes::default()
                                    | ActiveCollisionTypes::KINEMATIC_FIXED,
                            )
                            .build();
                        physics.insert_collider_with_parent(collider, body_handle)
                    }
                };
                self.collider_map.insert(entity_id, handle);
            }

            let trigger = world.get::<TriggerVolume>(entity_id).map(|t| *t);
            if let Some(volume) = trigger {
                let sensor = ColliderBuilder::new(shared_shape(&volume.shape))
                    .translation(vector![position.x, position.y, position.z])
                    .sensor(true)
                    .active_events(ActiveEvents::COLLISION_EVENTS)
                    .active_collision_types(
                        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_FIXED,
                    )
                    .user_data(entity_id.raw() as u128)
                    .build();
                let handle = physics.insert_static_collider(sensor);
                self.trigger_map.insert(entity_id, handle);
            }

            debug!(entity = %entity_id, "synced entity to physics");
            self.synced_entities.insert(entity_id);
            added += 1;
        }

        if added > 0 {
            physics.refresh_queries();
        }
        added
    }

    /// Move kinematic bodies to their entities' current positions.
    /// The move takes effect during the next physics step.
    pub fn update_kinematic_bodies(&self, world: &GlintWorld, physics: &mut PhysicsWorld) {
        for (entity_id, body_handle) in &self.body_map {
            let Some(position) = world.position(*entity_id) else {
                continue;
            };
            if let Some(body) = physics.get_rigid_body_mut(*body_handle) {
                body.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
                body.wake_up(true);
            }
        }
    }

    /// Get the rigid body handle for an entity
    pub fn get_body_handle(&self, entity_id: EntityId) -> Option<RigidBodyHandle> {
        self.body_map.get(&entity_id).copied()
    }

    /// Check if an entity has been synced to physics
    pub fn is_synced(&self, entity_id: EntityId) -> bool {
        self.synced_entities.contains(&entity_id)
    }
}

fn shared_shape(shape: &ColliderShape) -> SharedShape {
    match *shape {
        ColliderShape::Cuboid { half_extents } => {
            SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        ColliderShape::Ball { radius } => SharedShape::ball(radius),
        ColliderShape::Capsule {
            half_height,
            radius,
        } => SharedShape::capsule_y(half_height, radius),
    }
}
