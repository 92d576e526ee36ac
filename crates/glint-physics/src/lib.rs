//! Glint Physics - Rapier 3D integration
//!
//! Provides the physics services the interaction layer consumes:
//! - `PhysicsWorld`: wraps Rapier pipeline, body/collider sets; implements `Raycaster`
//! - `PhysicsSync`: bridges typed collider components with Rapier colliders
//! - `PhysicsSystem`: implements `RuntimeSystem`, turning sensor overlaps into trigger events

pub mod sync;
pub mod world;

use glint_core::{EntityId, Result};
use glint_ecs::GlintWorld;
use glint_runtime::{EventBus, GameEvent, RuntimeSystem};
use rapier3d::prelude::{ColliderHandle, CollisionEvent};
use sync::PhysicsSync;
use tracing::{debug, info};
use world::PhysicsWorld;

/// Physics system implementing RuntimeSystem for the host loop
pub struct PhysicsSystem {
    pub physics_world: PhysicsWorld,
    pub sync: PhysicsSync,
    pub event_bus: EventBus,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsSystem {
    pub fn new() -> Self {
        Self {
            physics_world: PhysicsWorld::new(),
            sync: PhysicsSync::new(),
            event_bus: EventBus::new(),
        }
    }

    /// Map a sensor/other collider pair back to (trigger owner, other entity)
    fn trigger_pair(
        &self,
        h1: ColliderHandle,
        h2: ColliderHandle,
    ) -> Option<(EntityId, EntityId)> {
        let (sensor, other) = if self.physics_world.is_sensor(h1) {
            (h1, h2)
        } else if self.physics_world.is_sensor(h2) {
            (h2, h1)
        } else {
            return None;
        };
        let trigger = self.physics_world.collider_entity(sensor)?;
        let other = self.physics_world.collider_entity(other)?;
        Some((trigger, other))
    }
}

impl RuntimeSystem for PhysicsSystem {
    fn initialize(&mut self, world: &mut GlintWorld) -> Result<()> {
        let count = self.sync.sync_to_rapier(world, &mut self.physics_world);
        info!(entities = count, "physics initialized");
        Ok(())
    }

    fn fixed_update(&mut self, world: &mut GlintWorld, dt: f64) -> Result<()> {
        // Sync any new entities to Rapier
        self.sync.sync_to_rapier(world, &mut self.physics_world);

        // Kinematic bodies (the player) follow their ECS positions
        self.sync
            .update_kinematic_bodies(world, &mut self.physics_world);

        self.physics_world.step(dt as f32);

        for event in self.physics_world.drain_collision_events() {
            let game_event = match event {
                CollisionEvent::Started(h1, h2, _) => self
                    .trigger_pair(h1, h2)
                    .map(|(trigger, other)| GameEvent::TriggerEntered { trigger, other }),
                CollisionEvent::Stopped(h1, h2, _) => self
                    .trigger_pair(h1, h2)
                    .map(|(trigger, other)| GameEvent::TriggerExited { trigger, other }),
            };
            if let Some(game_event) = game_event {
                debug!(?game_event, "trigger event");
                self.event_bus.push(game_event);
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "physics"
    }
}
