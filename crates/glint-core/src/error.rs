//! Error types for Glint

use thiserror::Error;

/// The main error type for Glint operations
#[derive(Debug, Error)]
pub enum GlintError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),

    #[error("Parenting {child} under {parent} would create a cycle")]
    HierarchyCycle { child: String, parent: String },

    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    #[error("Layer table is full ({0} layers)")]
    LayerTableFull(usize),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Glint operations
pub type Result<T> = std::result::Result<T, GlintError>;

impl From<toml::de::Error> for GlintError {
    fn from(err: toml::de::Error) -> Self {
        GlintError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for GlintError {
    fn from(err: toml::ser::Error) -> Self {
        GlintError::TomlSerError(err.to_string())
    }
}
