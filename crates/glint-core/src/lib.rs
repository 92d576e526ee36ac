//! Glint Core - Foundational types for the Glint interaction layer
//!
//! This crate provides the core types that all other Glint crates depend on:
//! - `EntityId` - Stable entity identifiers
//! - `Vec3`, `Color`, `ScreenRect` - Spatial and drawing types
//! - `Camera` - Gaze origin and direction
//! - `LayerMask`, `LayerRegistry` - Named physics layers
//! - `Raycaster` - The physics query seam
//! - Error types and Result alias

mod camera;
mod error;
mod id;
mod layer;
mod query;
mod types;

pub use camera::Camera;
pub use error::{GlintError, Result};
pub use id::EntityId;
pub use layer::{LayerMask, LayerRegistry, MAX_LAYERS};
pub use query::{RayHit, Raycaster};
pub use types::{Color, ScreenRect, Vec3};
