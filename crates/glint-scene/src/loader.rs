//! Scene loading from TOML files

use crate::format::{BehaviorKind, EntityDef, InputTable, InteractableDef, SceneFile};
use glint_core::{Camera, EntityId, GlintError, LayerRegistry, Result};
use glint_ecs::{
    ColliderDef, GlintWorld, Moveable, MovementController, Position, Tags, TriggerVolume,
};
use glint_interact::behaviors::{ExamineBehavior, ToggleBehavior};
use glint_interact::{
    InteractConfig, InteractableObject, InteractionBehavior, InteractionSystem, Lifecycle,
    NamedInteraction,
};
use glint_runtime::{parse_key_code, InputState};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Everything a scene file produces, ready to run
pub struct LoadedScene {
    pub file: SceneFile,
    pub world: GlintWorld,
    pub layers: LayerRegistry,
    pub config: InteractConfig,
    pub camera: Option<Camera>,
    /// Input with the scene's bindings applied
    pub input: InputState,
    /// Interactables, registered but not yet started
    pub interactions: InteractionSystem,
}

/// Load a scene from a TOML file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<LoadedScene> {
    let content = fs::read_to_string(path)?;
    load_scene_string(&content)
}

/// Load a scene from a TOML string
pub fn load_scene_string(content: &str) -> Result<LoadedScene> {
    let file: SceneFile = toml::from_str(content)?;

    let layers = LayerRegistry::from_names(file.layers.names.iter().cloned())?;
    let config = file.interact.clone();
    config.validate()?;
    let input = build_input(&file.input)?;
    for action in [&config.interact_action, &config.alt_action] {
        if !input.has_action(action) {
            warn!(action = %action, "action has no key or mouse binding");
        }
    }

    let mut world = GlintWorld::new();

    // First pass: create all entities
    for name in file.entities.keys() {
        world.spawn(name.clone())?;
    }

    // Second pass: components and relationships
    for (name, def) in &file.entities {
        let id = world.require_id(name)?;
        apply_components(&mut world, &layers, id, name, def)?;

        if let Some(parent) = &def.parent {
            world.set_parent_by_name(name, parent)?;
        }
    }

    let mut interactions = InteractionSystem::new();
    for (name, def) in &file.entities {
        if let Some(interactable) = &def.interactable {
            let id = world.require_id(name)?;
            interactions.register(build_interactable(id, name, interactable, &config)?);
        }
    }

    let camera = file.camera.as_ref().map(|c| c.to_camera()).transpose()?;

    validate_steps(&file, &world)?;

    debug!(
        scene = %file.scene.name,
        entities = world.entity_count(),
        interactables = interactions.len(),
        "scene loaded"
    );

    Ok(LoadedScene {
        file,
        world,
        layers,
        config,
        camera,
        input,
        interactions,
    })
}

fn build_input(table: &InputTable) -> Result<InputState> {
    let mut input = InputState::new();
    for (action, names) in &table.keys {
        let keys = names
            .iter()
            .map(|name| {
                parse_key_code(name).ok_or_else(|| {
                    GlintError::SceneError(format!(
                        "action '{}' is bound to unknown key '{}'",
                        action, name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        input.bind_action(action.clone(), keys);
    }
    for (action, buttons) in &table.mouse {
        input.bind_mouse_action(action.clone(), buttons.clone());
    }
    Ok(input)
}

fn apply_components(
    world: &mut GlintWorld,
    layers: &LayerRegistry,
    id: EntityId,
    name: &str,
    def: &EntityDef,
) -> Result<()> {
    if let Some(position) = def.position {
        world.insert(id, Position(position))?;
    }
    if !def.tags.is_empty() {
        world.insert(id, Tags::new(def.tags.iter().cloned()))?;
    }
    if def.moveable {
        world.insert(id, Moveable)?;
    }
    if let Some(enabled) = def.movement {
        world.insert(id, MovementController { enabled })?;
    }
    if let Some(collider) = &def.collider {
        let layer = layers.require(&collider.layer).map_err(|_| {
            GlintError::SceneError(format!(
                "entity '{}' uses unknown layer '{}'",
                name, collider.layer
            ))
        })?;
        world.insert(
            id,
            ColliderDef {
                shape: collider.shape,
                layer,
                body: collider.body,
            },
        )?;
    }
    if let Some(shape) = def.trigger {
        world.insert(id, TriggerVolume { shape })?;
    }
    Ok(())
}

fn build_interactable(
    id: EntityId,
    name: &str,
    def: &InteractableDef,
    config: &InteractConfig,
) -> Result<Box<dyn Lifecycle>> {
    let label = def.label.clone().unwrap_or_else(|| name.to_string());
    let reach_range = def.reach_range.unwrap_or(config.reach_range);
    if !reach_range.is_finite() || reach_range <= 0.0 {
        return Err(GlintError::SceneError(format!(
            "interactable '{}' has invalid reach_range {}",
            name, reach_range
        )));
    }

    Ok(match def.kind {
        BehaviorKind::Examine => {
            if !def.dwell.is_finite() || def.dwell < 0.0 {
                return Err(GlintError::SceneError(format!(
                    "interactable '{}' has invalid dwell {}",
                    name, def.dwell
                )));
            }
            boxed(id, ExamineBehavior::new(label, def.dwell), def, reach_range, config)
        }
        BehaviorKind::Toggle => boxed(
            id,
            ToggleBehavior::new(label).with_open(def.open),
            def,
            reach_range,
            config,
        ),
    })
}

fn boxed<B: InteractionBehavior + 'static>(
    id: EntityId,
    behavior: B,
    def: &InteractableDef,
    reach_range: f32,
    config: &InteractConfig,
) -> Box<dyn Lifecycle> {
    let mut object = InteractableObject::new(id, behavior, config).with_reach_range(reach_range);
    for interaction in &def.interactions {
        object = object.with_interaction(NamedInteraction::new(interaction.clone()));
    }
    Box::new(object)
}

/// Check that scripted steps only name keys and entities that exist
fn validate_steps(file: &SceneFile, world: &GlintWorld) -> Result<()> {
    for (index, step) in file.steps.iter().enumerate() {
        for key in step.press.iter().chain(&step.release) {
            if parse_key_code(key).is_none() {
                return Err(GlintError::SceneError(format!(
                    "step {}: unknown key '{}'",
                    index, key
                )));
            }
        }
        if let Some(target) = &step.end_interaction {
            if !world.contains_name(target) {
                return Err(GlintError::SceneError(format!(
                    "step {}: unknown entity '{}'",
                    index, target
                )));
            }
        }
        if let Some(camera) = &step.camera {
            camera.to_camera()?;
        }
    }
    Ok(())
}
