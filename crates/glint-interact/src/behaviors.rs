//! Ready-made interaction behaviors used by scene files

use crate::behavior::{InteractionBehavior, InteractionFlow};
use glint_core::EntityId;
use tracing::debug;

/// Look at something for a while. The interaction ends after `dwell` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct ExamineBehavior {
    pub label: String,
    /// Seconds the interaction lasts
    pub dwell: f64,
    elapsed: f64,
    examined: u32,
}

impl ExamineBehavior {
    pub fn new(label: impl Into<String>, dwell: f64) -> Self {
        Self {
            label: label.into(),
            dwell,
            elapsed: 0.0,
            examined: 0,
        }
    }

    /// How many times this object has been examined to completion
    pub fn times_examined(&self) -> u32 {
        self.examined
    }
}

impl InteractionBehavior for ExamineBehavior {
    fn on_init(&mut self, _player: Option<EntityId>) {
        self.elapsed = 0.0;
    }

    fn on_start_interaction(&mut self) {
        self.elapsed = 0.0;
    }

    fn on_end_interaction(&mut self) {
        self.examined += 1;
        debug!(label = %self.label, "examined");
    }

    fn gui_msg(&self) -> String {
        format!("Examine {}", self.label)
    }

    fn interacting_tick(&mut self, dt: f64) -> InteractionFlow {
        self.elapsed += dt;
        if self.elapsed >= self.dwell {
            InteractionFlow::End
        } else {
            InteractionFlow::Continue
        }
    }
}

/// Something that opens and closes. Each interaction flips it once.
#[derive(Clone, Debug, PartialEq)]
pub struct ToggleBehavior {
    pub label: String,
    open: bool,
}

impl ToggleBehavior {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            open: false,
        }
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl InteractionBehavior for ToggleBehavior {
    fn on_init(&mut self, _player: Option<EntityId>) {}

    fn on_start_interaction(&mut self) {
        self.open = !self.open;
        debug!(label = %self.label, open = self.open, "toggled");
    }

    fn on_end_interaction(&mut self) {}

    fn gui_msg(&self) -> String {
        if self.open {
            format!("Close {}", self.label)
        } else {
            format!("Open {}", self.label)
        }
    }

    fn interacting_tick(&mut self, _dt: f64) -> InteractionFlow {
        InteractionFlow::End
    }
}
