//! Runtime system trait

use glint_core::Result;
use glint_ecs::GlintWorld;

/// A system that can be ticked by the host loop
///
/// Systems are updated in registration order at a fixed rate.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self, world: &mut GlintWorld) -> Result<()>;

    /// Called at a fixed rate for deterministic simulation
    fn fixed_update(&mut self, world: &mut GlintWorld, dt: f64) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
