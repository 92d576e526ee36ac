//! Scene validation command

use crate::OutputFormat;
use anyhow::{Context, Result};
use glint_ecs::{ColliderDef, GlintWorld, TriggerVolume};
use glint_interact::owned_by;
use glint_scene::{load_scene, LoadedScene};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ValidationReport {
    pub scene: String,
    pub entities: usize,
    pub interactables: usize,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.findings.iter().all(|f| f.severity != Severity::Error)
    }
}

pub fn run(scene: &str, format: OutputFormat) -> Result<()> {
    let loaded = load_scene(scene).with_context(|| format!("failed to load scene {}", scene))?;
    let report = check(&loaded);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report_text(&report),
    }

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

/// Look for setups that load fine but can never show a prompt
pub fn check(scene: &LoadedScene) -> ValidationReport {
    let world = &scene.world;
    let config = &scene.config;
    let mut findings = Vec::new();

    if world.find_tagged(&config.player_tag).is_none() {
        findings.push(Finding {
            severity: Severity::Error,
            entity: None,
            message: format!("no entity is tagged '{}'", config.player_tag),
        });
    }

    let raycast_layer = scene.layers.index_of(&config.raycast_layer);
    if raycast_layer.is_none() {
        findings.push(Finding {
            severity: Severity::Error,
            entity: None,
            message: format!("raycast layer '{}' is not declared", config.raycast_layer),
        });
    }

    if !scene.input.has_action(&config.interact_action) {
        findings.push(Finding {
            severity: Severity::Error,
            entity: None,
            message: format!(
                "interact action '{}' has no key or mouse binding",
                config.interact_action
            ),
        });
    }
    if !scene.input.has_action(&config.alt_action) {
        findings.push(Finding {
            severity: Severity::Warning,
            entity: None,
            message: format!(
                "alternate action '{}' has no key or mouse binding",
                config.alt_action
            ),
        });
    }

    if scene.camera.is_none() {
        findings.push(Finding {
            severity: Severity::Warning,
            entity: None,
            message: "no camera; gaze raycasts are disabled".to_string(),
        });
    }

    let triggers = world.entities_with::<TriggerVolume>();
    let gaze_colliders: Vec<_> = world
        .entities_with::<ColliderDef>()
        .into_iter()
        .filter(|id| {
            let layer = world.get::<ColliderDef>(*id).map(|c| c.layer);
            layer.is_some() && layer == raycast_layer
        })
        .collect();

    for object in scene.interactions.objects() {
        let entity = object.entity();
        let name = entity_name(world, entity);

        let has_trigger = triggers
            .iter()
            .any(|t| world.self_and_ancestors(*t).any(|a| a == entity));
        if !has_trigger {
            findings.push(Finding {
                severity: Severity::Warning,
                entity: Some(name.clone()),
                message: "no trigger volume on this entity or its children".to_string(),
            });
        }

        let gazeable = gaze_colliders
            .iter()
            .any(|c| owned_by(world, *c, entity).is_some());
        if !gazeable {
            findings.push(Finding {
                severity: Severity::Warning,
                entity: Some(name),
                message: format!(
                    "no collider on layer '{}' resolves to this entity",
                    config.raycast_layer
                ),
            });
        }
    }

    ValidationReport {
        scene: scene.file.scene.name.clone(),
        entities: world.entity_count(),
        interactables: scene.interactions.len(),
        findings,
    }
}

fn entity_name(world: &GlintWorld, id: glint_core::EntityId) -> String {
    world
        .get_name(id)
        .map(String::from)
        .unwrap_or_else(|| id.to_string())
}

fn print_report_text(report: &ValidationReport) {
    println!(
        "Scene: {} ({} entities, {} interactables)",
        report.scene, report.entities, report.interactables
    );
    if report.findings.is_empty() {
        println!("No problems found.");
        return;
    }
    for finding in &report.findings {
        let level = match finding.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &finding.entity {
            Some(entity) => println!("  {}: {}: {}", level, entity, finding.message),
            None => println!("  {}: {}", level, finding.message),
        }
    }
}
