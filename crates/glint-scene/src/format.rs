//! Scene file format definitions

use glint_core::{Camera, GlintError, Result, Vec3};
use glint_ecs::{BodyKind, ColliderShape};
use glint_interact::InteractConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a scene TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub scene: SceneMetadata,
    #[serde(default)]
    pub layers: LayerTable,
    /// Settings shared by every interactable in the scene
    #[serde(default)]
    pub interact: InteractConfig,
    /// Extra key and mouse bindings for actions
    #[serde(default)]
    pub input: InputTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraDef>,
    /// Entities by name. Sorted so spawn order (and entity IDs) are stable.
    #[serde(default)]
    pub entities: BTreeMap<String, EntityDef>,
    /// Scripted input for headless simulation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepDef>,
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Named physics layers, in index order after the built-in "Default"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerTable {
    #[serde(default)]
    pub names: Vec<String>,
}

/// Action bindings added on top of the built-in `interact` (E) and `fire`
/// (left mouse). Binding an existing action replaces its keys or buttons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputTable {
    /// Action name -> key names ("F", "KeyF", "Space", ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keys: BTreeMap<String, Vec<String>>,
    /// Action name -> mouse button indices
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mouse: BTreeMap<String, Vec<u32>>,
}

/// Definition of an entity in a scene file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDef {
    /// Optional parent entity name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// World-space position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Attach the moveable capability
    #[serde(default)]
    pub moveable: bool,
    /// Attach a movement controller with this initial state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<ColliderEntry>,
    /// Trigger volume shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<ColliderShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactable: Option<InteractableDef>,
}

/// A solid collider, with its layer given by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderEntry {
    #[serde(flatten)]
    pub shape: ColliderShape,
    #[serde(default = "default_layer")]
    pub layer: String,
    #[serde(default)]
    pub body: BodyKind,
}

fn default_layer() -> String {
    "Default".to_string()
}

/// Which ready-made behavior an interactable uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    #[default]
    Examine,
    Toggle,
}

/// An interactable living on an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractableDef {
    #[serde(default)]
    pub kind: BehaviorKind,
    /// Text after the verb in the prompt; defaults to the entity name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Examine duration in seconds
    #[serde(default = "default_dwell")]
    pub dwell: f64,
    /// Initial state of a toggle
    #[serde(default)]
    pub open: bool,
    /// Overrides the scene-wide reach range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach_range: Option<f32>,
    /// Names of the interactions offered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<String>,
}

fn default_dwell() -> f64 {
    1.0
}

/// Camera placement: either a forward vector or a point to look at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDef {
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_at: Option<Vec3>,
}

impl CameraDef {
    /// Build the camera. `look_at` wins over `forward`; neither means -Z.
    pub fn to_camera(&self) -> Result<Camera> {
        let direction = match (self.look_at, self.forward) {
            (Some(target), _) => target - self.position,
            (None, Some(forward)) => forward,
            (None, None) => Vec3::FORWARD,
        };
        if direction.length() <= f32::EPSILON {
            return Err(GlintError::SceneError(
                "camera direction has zero length".to_string(),
            ));
        }
        Ok(Camera::new(self.position, direction))
    }
}

/// One step of a simulation script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDef {
    /// Frames to run with this step's state
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Move the player before the first frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_position: Option<Vec3>,
    /// Re-aim the camera before the first frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraDef>,
    /// Keys pressed before the first frame
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub press: Vec<String>,
    /// Keys released before the first frame
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub release: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mouse_press: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mouse_release: Vec<u32>,
    /// End the running interaction on this entity before the first frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_interaction: Option<String>,
}

fn default_frames() -> u32 {
    1
}

impl SceneFile {
    /// Create an empty scene file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: SceneMetadata {
                name: name.into(),
                version: default_version(),
                description: None,
            },
            layers: LayerTable::default(),
            interact: InteractConfig::default(),
            input: InputTable::default(),
            camera: None,
            entities: BTreeMap::new(),
            steps: Vec::new(),
        }
    }

    /// Add an entity to the scene
    pub fn add_entity(&mut self, name: impl Into<String>, entity: EntityDef) {
        self.entities.insert(name.into(), entity);
    }
}
