//! Error types for slot-reveal.
//!
//! Selection and markup rendering are total and never fail. Errors only come
//! from the animation engine, page layout, configuration loading and
//! terminal output.

use std::io;

use thiserror::Error;

/// Animation engine errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine does not provide the requested plugin.
    #[error("animation plugin unavailable: {0}")]
    PluginUnavailable(&'static str),

    /// The context was never created or has already been reverted.
    #[error("unknown animation context {0}")]
    UnknownContext(u64),

    /// The timeline was never created or its context has been reverted.
    #[error("unknown timeline {0}")]
    UnknownTimeline(u64),

    /// The trigger was never registered or its context has been reverted.
    #[error("unknown scroll trigger {0}")]
    UnknownTrigger(u64),
}

/// Page layout errors.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("layout failed: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid toggle actions {0:?}: expected four of play, pause, resume, reverse, restart, reset, complete, none")]
    ToggleActions(String),
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for slot-reveal operations.
pub type Result<T> = std::result::Result<T, Error>;
