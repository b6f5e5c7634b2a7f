//! Error taxonomy for the frame loop, scenes and entities

use thiserror::Error;

use crate::sim::LifecycleState;

/// Resource preload failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// No resource is known under this identifier
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The loader knows the resource but could not produce a handle
    #[error("failed to load {id}: {reason}")]
    Failed { id: String, reason: String },
}

/// Operation attempted on a scene or entity in the wrong lifecycle state
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidStateError {
    #[error("scene has been disposed")]
    SceneDisposed,

    #[error("scene is not started (state: {0:?})")]
    SceneNotStarted(LifecycleState),

    #[error("game object belongs to a disposed scene")]
    GameObjectDisposed,
}

/// Malformed parameters supplied at construction
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("unknown origin mode: {0}")]
    UnknownOrigin(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Umbrella error for scene activation and content setup
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
