//! First-person camera used as the gaze origin

use crate::types::Vec3;
use serde::{Deserialize, Serialize};

/// The active camera: a position and a unit forward vector.
///
/// The gaze ray starts at the viewport center on the near plane, which for
/// this camera model is the camera position itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalized(),
        }
    }

    /// Camera at `position` looking towards `target`
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    /// Origin and direction of the ray through the viewport center
    pub fn viewport_center_ray(&self) -> (Vec3, Vec3) {
        (self.position, self.forward.normalized())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::FORWARD,
        }
    }
}
