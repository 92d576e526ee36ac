//! Physics query seam

use crate::id::EntityId;
use crate::layer::LayerMask;
use crate::types::Vec3;

/// The closest collider hit by a ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Entity owning the hit collider
    pub entity: EntityId,
    /// Distance from the ray origin along the ray
    pub distance: f32,
}

/// Anything that can answer "what does this ray hit first?"
pub trait Raycaster {
    /// Cast a ray and return the closest hit within `max_distance` on a layer in `mask`.
    /// `direction` need not be normalized.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}
