//! Interaction settings

use crate::prompt::PromptStyle;
use glint_core::{GlintError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings shared by every interactable in a scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractConfig {
    /// Maximum gaze distance in meters
    pub reach_range: f32,
    /// Physics layer gaze rays are tested against
    pub raycast_layer: String,
    /// Tag identifying the player entity
    pub player_tag: String,
    /// Action that starts an interaction when released. Names other than
    /// `interact` and `fire` need a binding in the scene's `[input]` table.
    pub interact_action: String,
    /// Action that starts an interaction when pressed
    pub alt_action: String,
    /// Re-enable the player's movement controller when an interaction ends
    pub restore_movement_on_end: bool,
    pub prompt: PromptStyle,
}

impl Default for InteractConfig {
    fn default() -> Self {
        Self {
            reach_range: 1.8,
            raycast_layer: "InteractRaycast".to_string(),
            player_tag: "Player".to_string(),
            interact_action: "interact".to_string(),
            alt_action: "fire".to_string(),
            restore_movement_on_end: false,
            prompt: PromptStyle::default(),
        }
    }
}

impl InteractConfig {
    /// Load from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a TOML string; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.reach_range.is_finite() || self.reach_range <= 0.0 {
            return Err(GlintError::ConfigError(format!(
                "reach_range must be a positive distance, got {}",
                self.reach_range
            )));
        }
        if self.raycast_layer.is_empty() {
            return Err(GlintError::ConfigError(
                "raycast_layer must not be empty".to_string(),
            ));
        }
        if self.prompt.font_size <= 0.0 {
            return Err(GlintError::ConfigError(format!(
                "prompt.font_size must be positive, got {}",
                self.prompt.font_size
            )));
        }
        Ok(())
    }
}
