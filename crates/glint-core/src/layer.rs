//! Named physics layers and layer masks

use crate::error::{GlintError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of layers a mask can address
pub const MAX_LAYERS: usize = 32;

/// A bitmask selecting which physics layers a query tests against
#[derive(Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing only the given layer index
    pub fn from_layer(index: u8) -> Self {
        debug_assert!((index as usize) < MAX_LAYERS);
        Self(1u32 << index)
    }

    pub fn contains(&self, index: u8) -> bool {
        (index as usize) < MAX_LAYERS && self.0 & (1u32 << index) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerMask({:#034b})", self.0)
    }
}

/// Layer name table. Index 0 is always "Default".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerRegistry {
    names: Vec<String>,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self {
            names: vec!["Default".to_string()],
        }
    }

    /// Build a registry from an ordered list of names; the list position is the layer index.
    /// "Default" is kept at index 0 if the list does not start with it.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.register(name)?;
        }
        Ok(registry)
    }

    /// Register a layer, returning its index. Registering an existing name is a no-op.
    pub fn register(&mut self, name: impl Into<String>) -> Result<u8> {
        let name = name.into();
        if let Some(index) = self.index_of(&name) {
            return Ok(index);
        }
        if self.names.len() >= MAX_LAYERS {
            return Err(GlintError::LayerTableFull(MAX_LAYERS));
        }
        self.names.push(name);
        Ok((self.names.len() - 1) as u8)
    }

    /// Look up a layer index by name
    pub fn index_of(&self, name: &str) -> Option<u8> {
        self.names.iter().position(|n| n == name).map(|i| i as u8)
    }

    /// Like `index_of`, but an unknown name is an error
    pub fn require(&self, name: &str) -> Result<u8> {
        self.index_of(name)
            .ok_or_else(|| GlintError::LayerNotFound(name.to_string()))
    }

    /// Mask selecting just the named layer
    pub fn mask_for(&self, name: &str) -> Result<LayerMask> {
        self.require(name).map(LayerMask::from_layer)
    }

    pub fn name_of(&self, index: u8) -> Option<&str> {
        self.names.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layer_is_zero() {
        let registry = LayerRegistry::new();
        assert_eq!(registry.index_of("Default"), Some(0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_mask_for_named_layer() {
        let registry = LayerRegistry::from_names(["Default", "Player", "InteractRaycast"]).unwrap();
        let mask = registry.mask_for("InteractRaycast").unwrap();
        assert_eq!(mask, LayerMask(1 << 2));
        assert!(mask.contains(2));
        assert!(!mask.contains(1));
    }

    #[test]
    fn test_unknown_layer() {
        let registry = LayerRegistry::new();
        assert!(matches!(
            registry.mask_for("Nope"),
            Err(GlintError::LayerNotFound(_))
        ));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = LayerRegistry::new();
        let a = registry.register("Water").unwrap();
        let b = registry.register("Water").unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.name_of(a), Some("Water"));
    }

    #[test]
    fn test_table_full() {
        let mut registry = LayerRegistry::new();
        for i in 1..MAX_LAYERS {
            registry.register(format!("layer_{}", i)).unwrap();
        }
        assert!(matches!(
            registry.register("overflow"),
            Err(GlintError::LayerTableFull(32))
        ));
    }
}
