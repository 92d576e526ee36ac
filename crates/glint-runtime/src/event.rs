//! Game events

use glint_core::EntityId;
use serde::Serialize;

/// Events exchanged between the physics layer, interactables and the host
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// `other` started overlapping the trigger volume owned by `trigger`
    TriggerEntered { trigger: EntityId, other: EntityId },
    /// `other` stopped overlapping the trigger volume owned by `trigger`
    TriggerExited { trigger: EntityId, other: EntityId },
    /// An interactable entered its Interacting state
    InteractionStarted { entity: EntityId },
    /// An interactable left its Interacting state
    InteractionEnded { entity: EntityId },
    /// A bound action was pressed this frame
    ActionPressed { action: String },
}
