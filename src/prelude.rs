//! Prelude module for common mapview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapview::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{AnimationConfig, DisplayProfile, MapViewConfig, ViewportConfig},
    geo::Point,
    viewport::Viewport,
};

pub use crate::screen::{calculate_center, calculate_center_with, calculate_scale, ScreenOperations};

pub use crate::animation::{
    pretty_move_animation, AnimationPhase, EasingFunction, PhaseHook, PhaseKind, PlaybackState,
    SequenceAnimation, SequencePlayback, TransitionBuilder, ViewFrame,
};

pub use crate::{MapError, Result};
