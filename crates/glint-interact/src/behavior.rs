//! Hooks a concrete interactable implements

use glint_core::EntityId;

/// Whether an interaction keeps running after this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionFlow {
    Continue,
    End,
}

/// The behavior-specific half of an interactable.
///
/// `InteractableObject` decides *when* each hook runs; implementors decide
/// what happens.
pub trait InteractionBehavior {
    /// Called once from `on_start`, after the player has been looked up
    fn on_init(&mut self, player: Option<EntityId>);

    /// Called once each time an interaction starts
    fn on_start_interaction(&mut self);

    /// Called once each time an interaction ends
    fn on_end_interaction(&mut self);

    /// Prompt text, asked for every frame the prompt is shown
    fn gui_msg(&self) -> String;

    /// Called every frame while interacting. Returning `End` finishes the interaction.
    fn interacting_tick(&mut self, _dt: f64) -> InteractionFlow {
        InteractionFlow::Continue
    }
}
