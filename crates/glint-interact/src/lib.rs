//! Glint Interact - objects the player looks at and uses
//!
//! An interactable shows a prompt while the player stands inside its trigger
//! volume and looks at it, and starts an interaction when the interact action
//! fires. Specific interactions plug in through `InteractionBehavior`.
//!
//! - `InteractableObject`: gaze/trigger detection and the Idle/Prompting/Interacting state machine
//! - `Lifecycle`: the explicit per-frame interface a host loop drives
//! - `InteractionSystem`: owns interactables, routes trigger events, reports transitions
//! - `resolve_ownership`: bounded ancestor walk from a hit collider to its interactable

mod behavior;
pub mod behaviors;
mod config;
mod interactable;
mod interaction;
mod ownership;
mod prompt;
mod system;

pub use behavior::{InteractionBehavior, InteractionFlow};
pub use config::InteractConfig;
pub use interactable::{
    FrameContext, InteractableObject, InteractionState, Lifecycle, StartContext,
};
pub use interaction::{NamedInteraction, ObjectInteraction};
pub use ownership::{owned_by, resolve_ownership, Ownership, MAX_OWNERSHIP_DEPTH};
pub use prompt::{DrawCommand, PromptCanvas, PromptStyle, RecordingCanvas};
pub use system::InteractionSystem;
