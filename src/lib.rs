//! # mapview
//!
//! Viewport transform controller for a map renderer.
//!
//! The crate keeps the mapping between screen pixels and global map units
//! consistent: it checks a view against the world extent and zoom limits,
//! fits views into rectangles, zooms around an anchor point and describes
//! animated transitions between two views. Rendering and gesture handling
//! are left to the host.

pub mod animation;
pub mod core;
pub mod prelude;
pub mod screen;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{AnimationConfig, DisplayProfile, MapViewConfig, ViewportConfig},
    geo::Point,
    viewport::{GlobalRect, Viewport},
};

pub use crate::screen::{calculate_center, calculate_center_with, calculate_scale, ScreenOperations};

pub use crate::animation::{
    pretty_move_animation, AnimationPhase, PhaseHook, PhaseKind, SequenceAnimation,
    SequencePlayback, TransitionBuilder, ViewFrame,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("Invalid scale: {0}")]
    InvalidScale(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
