//! Headless simulation: scripted input driving physics and interactables

use crate::OutputFormat;
use anyhow::{anyhow, Context, Result};
use glint_core::{Camera, EntityId, LayerRegistry};
use glint_ecs::{GlintWorld, Position};
use glint_interact::{
    FrameContext, InteractConfig, InteractionState, InteractionSystem, RecordingCanvas,
    StartContext,
};
use glint_physics::PhysicsSystem;
use glint_runtime::{parse_key_code, GameEvent, InputState, RuntimeSystem};
use glint_scene::{load_scene, LoadedScene, StepDef};
use serde::Serialize;
use tracing::{debug, info};

/// Fixed frame time for headless runs
pub const FRAME_DT: f64 = 1.0 / 60.0;

/// Screen size prompts are laid out against
const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;

pub struct SimulateArgs {
    pub scene: String,
    pub frames: u32,
    pub format: OutputFormat,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let loaded = load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene))?;
    let mut sim = Simulation::new(loaded)?;
    sim.run_script()?;
    sim.run_frames(args.frames)?;
    let report = sim.report();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report_text(&sim, &report),
    }
    Ok(())
}

/// Something that happened on a given frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoggedEvent {
    pub frame: u64,
    #[serde(flatten)]
    pub event: GameEvent,
}

/// The visible prompt text changed (`None` means hidden)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PromptChange {
    pub frame: u64,
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinalState {
    pub entity: String,
    pub state: InteractionState,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub scene: String,
    pub frames: u64,
    pub events: Vec<LoggedEvent>,
    pub prompts: Vec<PromptChange>,
    pub final_states: Vec<FinalState>,
}

/// A scene being stepped frame by frame
pub struct Simulation {
    name: String,
    steps: Vec<StepDef>,
    world: GlintWorld,
    layers: LayerRegistry,
    config: InteractConfig,
    camera: Option<Camera>,
    physics: PhysicsSystem,
    interactions: InteractionSystem,
    input: InputState,
    canvas: RecordingCanvas,
    frame: u64,
    visible_prompt: Option<String>,
    events: Vec<LoggedEvent>,
    prompts: Vec<PromptChange>,
}

impl Simulation {
    pub fn new(scene: LoadedScene) -> Result<Self> {
        let LoadedScene {
            file,
            mut world,
            layers,
            config,
            camera,
            input,
            mut interactions,
        } = scene;

        let mut physics = PhysicsSystem::new();
        physics.initialize(&mut world)?;

        let ctx = StartContext {
            world: &world,
            layers: &layers,
            camera: camera.as_ref(),
        };
        interactions.start(&ctx);

        info!(scene = %file.scene.name, "simulation ready");

        Ok(Self {
            name: file.scene.name,
            steps: file.steps,
            world,
            layers,
            config,
            camera,
            physics,
            interactions,
            input,
            canvas: RecordingCanvas::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            frame: 0,
            visible_prompt: None,
            events: Vec::new(),
            prompts: Vec::new(),
        })
    }

    /// Apply every scripted step, running its frames
    pub fn run_script(&mut self) -> Result<()> {
        let steps = std::mem::take(&mut self.steps);
        for (index, step) in steps.iter().enumerate() {
            debug!(step = index, frames = step.frames, "applying step");
            self.apply_step(step)?;
            self.run_frames(step.frames)?;
        }
        self.steps = steps;
        Ok(())
    }

    pub fn run_frames(&mut self, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.frame()?;
        }
        Ok(())
    }

    /// One host-loop frame: physics, trigger routing, tick, draw
    pub fn frame(&mut self) -> Result<()> {
        self.physics.fixed_update(&mut self.world, FRAME_DT)?;
        for event in self.physics.event_bus.drain() {
            self.interactions.handle_event(&self.world, &event);
            self.log(event);
        }

        for action in self.input.actions_just_pressed() {
            self.log(GameEvent::ActionPressed { action });
        }

        let mut frame = FrameContext {
            world: &mut self.world,
            input: &self.input,
            raycaster: &self.physics.physics_world,
            camera: self.camera.as_ref(),
            dt: FRAME_DT,
        };
        self.interactions.tick(&mut frame);
        self.drain_interaction_events();

        self.interactions.draw(&mut self.canvas);
        let drawn = self.canvas.take();
        let text = drawn.first().map(|command| command.text.clone());
        if text != self.visible_prompt {
            self.prompts.push(PromptChange {
                frame: self.frame,
                text: text.clone(),
            });
            self.visible_prompt = text;
        }

        self.input.end_frame();
        self.frame += 1;
        Ok(())
    }

    fn apply_step(&mut self, step: &StepDef) -> Result<()> {
        if let Some(position) = step.player_position {
            let player = self
                .world
                .find_tagged(&self.config.player_tag)
                .ok_or_else(|| anyhow!("no entity tagged '{}' to move", self.config.player_tag))?;
            self.world.insert(player, Position(position))?;
        }
        if let Some(camera) = &step.camera {
            self.camera = Some(camera.to_camera()?);
        }
        for key in &step.press {
            let code = parse_key_code(key).ok_or_else(|| anyhow!("unknown key '{}'", key))?;
            self.input.process_key_down(code);
        }
        for key in &step.release {
            let code = parse_key_code(key).ok_or_else(|| anyhow!("unknown key '{}'", key))?;
            self.input.process_key_up(code);
        }
        for button in &step.mouse_press {
            self.input.process_mouse_button_down(*button);
        }
        for button in &step.mouse_release {
            self.input.process_mouse_button_up(*button);
        }
        if let Some(name) = &step.end_interaction {
            let entity = self.world.require_id(name)?;
            self.interactions.end_interaction(entity, &mut self.world);
            self.drain_interaction_events();
        }
        Ok(())
    }

    fn drain_interaction_events(&mut self) {
        for event in self.interactions.event_bus.drain() {
            self.log(event);
        }
    }

    fn log(&mut self, event: GameEvent) {
        debug!(frame = self.frame, ?event, "event");
        self.events.push(LoggedEvent {
            frame: self.frame,
            event,
        });
    }

    pub fn state_of(&self, entity: EntityId) -> Option<InteractionState> {
        self.interactions.state_of(entity)
    }

    pub fn world(&self) -> &GlintWorld {
        &self.world
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn report(&self) -> SimulationReport {
        let final_states = self
            .interactions
            .objects()
            .iter()
            .map(|object| FinalState {
                entity: self.entity_name(object.entity()),
                state: object.state(),
            })
            .collect();

        SimulationReport {
            scene: self.name.clone(),
            frames: self.frame,
            events: self.events.clone(),
            prompts: self.prompts.clone(),
            final_states,
        }
    }

    fn entity_name(&self, id: EntityId) -> String {
        self.world
            .get_name(id)
            .map(String::from)
            .unwrap_or_else(|| id.to_string())
    }

    /// Human-readable one-liner for an event
    pub fn describe(&self, event: &GameEvent) -> String {
        match event {
            GameEvent::TriggerEntered { trigger, other } => format!(
                "{} entered trigger of {}",
                self.entity_name(*other),
                self.entity_name(*trigger)
            ),
            GameEvent::TriggerExited { trigger, other } => format!(
                "{} left trigger of {}",
                self.entity_name(*other),
                self.entity_name(*trigger)
            ),
            GameEvent::InteractionStarted { entity } => {
                format!("interaction started on {}", self.entity_name(*entity))
            }
            GameEvent::InteractionEnded { entity } => {
                format!("interaction ended on {}", self.entity_name(*entity))
            }
            GameEvent::ActionPressed { action } => format!("action '{}' pressed", action),
        }
    }
}

fn print_report_text(sim: &Simulation, report: &SimulationReport) {
    println!("Scene: {} ({} frames)", report.scene, report.frames);

    println!("\nEvents:");
    if report.events.is_empty() {
        println!("  (none)");
    }
    for logged in &report.events {
        println!("  [{:>5}] {}", logged.frame, sim.describe(&logged.event));
    }

    println!("\nPrompts:");
    if report.prompts.is_empty() {
        println!("  (never shown)");
    }
    for change in &report.prompts {
        match &change.text {
            Some(text) => println!("  [{:>5}] show \"{}\"", change.frame, text),
            None => println!("  [{:>5}] hide", change.frame),
        }
    }

    println!("\nFinal states:");
    for state in &report.final_states {
        println!("  {}: {:?}", state.entity, state.state);
    }
}
