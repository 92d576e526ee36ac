//! Glint Scene - TOML scene loading
//!
//! A scene file declares named layers, entities with their hierarchy,
//! colliders and trigger volumes, the interactables living on them, action
//! bindings, a camera and an optional scripted sequence of input steps for
//! headless runs.

mod format;
mod loader;

pub use format::{
    BehaviorKind, CameraDef, ColliderEntry, EntityDef, InputTable, InteractableDef, LayerTable,
    SceneFile, SceneMetadata, StepDef,
};
pub use loader::{load_scene, load_scene_string, LoadedScene};
