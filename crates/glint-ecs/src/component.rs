//! Typed components stored in the hecs world

use glint_core::Vec3;
use serde::{Deserialize, Serialize};

/// World-space position of an entity
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position(pub Vec3);

/// Free-form tags ("Player", ...)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tags(pub Vec<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn has(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }
}

/// Capability marker: this object can be picked up or moved by an interaction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Moveable;

/// First-person movement controller; disabled while the player is busy interacting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementController {
    pub enabled: bool,
}

impl Default for MovementController {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Collider shape, in meters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ColliderShape {
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
    Capsule { half_height: f32, radius: f32 },
}

/// How the collider's body moves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Static scenery, no rigid body
    #[default]
    Fixed,
    /// Moved by setting its position (the player)
    Kinematic,
}

/// A solid collider on a physics layer; what gaze rays hit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderDef {
    pub shape: ColliderShape,
    pub layer: u8,
    pub body: BodyKind,
}

/// A non-solid trigger region attached to an entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerVolume {
    pub shape: ColliderShape,
}
