//! Glint ECS - Entity arena with stable IDs
//!
//! This crate wraps hecs with stable entity identifiers, unique names and
//! child -> parent links, plus the typed components the interaction layer
//! looks up (positions, tags, the moveable capability, the player's movement
//! controller and collider definitions).

mod component;
mod world;

pub use component::{
    BodyKind, ColliderDef, ColliderShape, Moveable, MovementController, Position, Tags,
    TriggerVolume,
};
pub use world::GlintWorld;
