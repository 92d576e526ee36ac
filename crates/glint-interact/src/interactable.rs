//! Interactable objects: trigger presence + gaze -> prompt -> interaction

use crate::behavior::{InteractionBehavior, InteractionFlow};
use crate::config::InteractConfig;
use crate::interaction::ObjectInteraction;
use crate::ownership::owned_by;
use crate::prompt::{PromptCanvas, PromptStyle};
use glint_core::{Camera, EntityId, LayerMask, LayerRegistry, Raycaster};
use glint_ecs::{GlintWorld, MovementController};
use glint_runtime::InputState;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Where an interactable is in its prompt/interaction cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// Player absent, or present but not looking at the object
    Idle,
    /// Player present and looking at the object; prompt shown
    Prompting,
    /// An interaction is running
    Interacting,
}

/// What an interactable may look at when it starts
pub struct StartContext<'a> {
    pub world: &'a GlintWorld,
    pub layers: &'a LayerRegistry,
    pub camera: Option<&'a Camera>,
}

/// Everything an interactable needs for one frame
pub struct FrameContext<'a> {
    pub world: &'a mut GlintWorld,
    pub input: &'a InputState,
    pub raycaster: &'a dyn Raycaster,
    pub camera: Option<&'a Camera>,
    pub dt: f64,
}

/// The callbacks a host loop drives, in place of an engine's component lifecycle.
///
/// Per frame the host calls trigger callbacks for overlap changes first, then
/// `on_tick`, then `on_draw_ui`. Nothing here is called concurrently.
pub trait Lifecycle {
    /// The entity this object belongs to
    fn entity(&self) -> EntityId;

    fn state(&self) -> InteractionState;

    /// Names of the interactions this object offers
    fn interaction_names(&self) -> Vec<&str>;

    /// Called once before the first tick
    fn on_start(&mut self, ctx: &StartContext<'_>);

    /// Called once per frame
    fn on_tick(&mut self, frame: &mut FrameContext<'_>);

    /// `other` entered this object's trigger volume
    fn on_trigger_enter(&mut self, other: EntityId);

    /// `other` left this object's trigger volume
    fn on_trigger_exit(&mut self, other: EntityId);

    /// Draw the prompt, if visible
    fn on_draw_ui(&self, canvas: &mut dyn PromptCanvas);

    /// Finish a running interaction. Returns false if none was running.
    fn end_interaction(&mut self, world: &mut GlintWorld) -> bool;
}

/// An object the player can look at and interact with
pub struct InteractableObject<B> {
    entity: EntityId,
    /// Maximum gaze distance for this object
    pub reach_range: f32,
    /// Interactions this object offers, in display order
    pub interactions: Vec<Box<dyn ObjectInteraction>>,
    settings: InteractConfig,
    behavior: B,

    player: Option<EntityId>,
    player_entered: bool,
    interacting: bool,
    show_prompt: bool,
    msg: String,
    style: PromptStyle,
    layer_mask: LayerMask,
    target_moveable: Option<EntityId>,
}

impl<B: InteractionBehavior> InteractableObject<B> {
    pub fn new(entity: EntityId, behavior: B, settings: &InteractConfig) -> Self {
        Self {
            entity,
            reach_range: settings.reach_range,
            interactions: Vec::new(),
            settings: settings.clone(),
            behavior,
            player: None,
            player_entered: false,
            interacting: false,
            show_prompt: false,
            msg: String::new(),
            style: settings.prompt.clone(),
            layer_mask: LayerMask::NONE,
            target_moveable: None,
        }
    }

    pub fn with_reach_range(mut self, reach_range: f32) -> Self {
        self.reach_range = reach_range;
        self
    }

    pub fn with_interaction(mut self, interaction: impl ObjectInteraction + 'static) -> Self {
        self.interactions.push(Box::new(interaction));
        self
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn player_entered(&self) -> bool {
        self.player_entered
    }

    pub fn prompt_visible(&self) -> bool {
        self.show_prompt
    }

    /// Current prompt text
    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn layer_mask(&self) -> LayerMask {
        self.layer_mask
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// Moveable capability resolved by the most recent successful gaze
    pub fn target_moveable(&self) -> Option<EntityId> {
        self.target_moveable
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    fn hide_prompt(&mut self) {
        self.show_prompt = false;
    }

    fn interact_fired(&self, input: &InputState) -> bool {
        input.is_action_just_released(&self.settings.interact_action)
            || input.is_action_just_pressed(&self.settings.alt_action)
    }

    /// Is the gaze ray currently resolving to this object?
    fn gazed_at(&mut self, frame: &FrameContext<'_>) -> bool {
        // No camera: gaze is an explicit no-op
        let Some(camera) = frame.camera else {
            return false;
        };

        let (origin, direction) = camera.viewport_center_ray();
        let Some(hit) = frame
            .raycaster
            .cast_ray(origin, direction, self.reach_range, self.layer_mask)
        else {
            return false;
        };

        match owned_by(frame.world, hit.entity, self.entity) {
            Some(ownership) => {
                self.target_moveable = ownership.moveable;
                true
            }
            None => false,
        }
    }

    fn start_interaction(&mut self, world: &mut GlintWorld) {
        self.msg.clear();
        self.show_prompt = false;
        self.interacting = true;
        self.set_player_movement(world, false);
        info!(entity = %self.entity, "interaction started");
        self.behavior.on_start_interaction();
    }

    fn set_player_movement(&self, world: &mut GlintWorld, enabled: bool) {
        let Some(player) = self.player else {
            warn!(entity = %self.entity, "no player to toggle movement on");
            return;
        };
        match world.get_mut::<MovementController>(player) {
            Some(mut controller) => controller.enabled = enabled,
            None => warn!(player = %player, "player has no movement controller"),
        }
    }
}

impl<B: InteractionBehavior> Lifecycle for InteractableObject<B> {
    fn entity(&self) -> EntityId {
        self.entity
    }

    fn state(&self) -> InteractionState {
        if self.interacting {
            InteractionState::Interacting
        } else if self.show_prompt {
            InteractionState::Prompting
        } else {
            InteractionState::Idle
        }
    }

    fn interaction_names(&self) -> Vec<&str> {
        self.interactions.iter().map(|i| i.name()).collect()
    }

    fn on_start(&mut self, ctx: &StartContext<'_>) {
        self.player = ctx.world.find_tagged(&self.settings.player_tag);
        if self.player.is_none() {
            warn!(tag = %self.settings.player_tag, "no player entity found");
        }

        if ctx.camera.is_none() {
            error!(entity = %self.entity, "a main camera is missing; gaze raycasts are disabled");
        }

        self.layer_mask = match ctx.layers.mask_for(&self.settings.raycast_layer) {
            Ok(mask) => mask,
            Err(e) => {
                warn!(error = %e, "gaze raycasts will not hit anything");
                LayerMask::NONE
            }
        };

        self.style = self.settings.prompt.clone();
        self.msg.clear();

        self.behavior.on_init(self.player);
    }

    fn on_tick(&mut self, frame: &mut FrameContext<'_>) {
        if self.interacting {
            if self.behavior.interacting_tick(frame.dt) == InteractionFlow::End {
                self.end_interaction(frame.world);
            }
            return;
        }

        if !self.player_entered || !self.gazed_at(frame) {
            self.hide_prompt();
            return;
        }

        self.show_prompt = true;
        self.msg = self.behavior.gui_msg();

        if self.interact_fired(frame.input) {
            self.start_interaction(frame.world);
        }
    }

    fn on_trigger_enter(&mut self, other: EntityId) {
        if self.player == Some(other) {
            debug!(entity = %self.entity, "player entered trigger");
            self.player_entered = true;
        }
    }

    fn on_trigger_exit(&mut self, other: EntityId) {
        if self.player == Some(other) {
            debug!(entity = %self.entity, "player left trigger");
            self.player_entered = false;
            // The player may not have been looking at the object on the way out
            self.hide_prompt();
        }
    }

    fn on_draw_ui(&self, canvas: &mut dyn PromptCanvas) {
        if self.show_prompt {
            let (_, height) = canvas.screen_size();
            canvas.label(self.style.label_rect(height), &self.msg, &self.style);
        }
    }

    fn end_interaction(&mut self, world: &mut GlintWorld) -> bool {
        if !self.interacting {
            debug!(entity = %self.entity, "end_interaction without a running interaction");
            return false;
        }

        self.interacting = false;
        if self.settings.restore_movement_on_end {
            self.set_player_movement(world, true);
        }
        info!(entity = %self.entity, "interaction ended");
        self.behavior.on_end_interaction();
        true
    }
}
