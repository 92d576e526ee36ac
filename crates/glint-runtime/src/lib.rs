//! Glint Runtime - host loop infrastructure
//!
//! Provides the building blocks the host loop drives every frame:
//! - `InputState`: keyboard and mouse tracking with edge detection and action bindings
//! - `GameEvent` / `EventBus`: typed event queue for trigger and interaction events
//! - `RuntimeSystem`: trait for systems ticked by the host loop

mod event;
mod event_bus;
mod input;
mod system;

pub use event::GameEvent;
pub use event_bus::EventBus;
pub use input::{parse_key_code, InputState, MOUSE_LEFT, MOUSE_RIGHT};
pub use system::RuntimeSystem;
