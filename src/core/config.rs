//! Configuration for viewport constraints and transition animations
//!
//! Mirrors the renderer's visual parameters: world extent, tile size, display
//! density and the zoom range that has drawing styles. Configurations can be
//! picked from display profiles or loaded from JSON.

use crate::animation::interpolation::EasingFunction;
use crate::core::bounds::Bounds;
use crate::core::constants::{
    MAX_ANIMATION_TIME_SEC, MIN_ALLOWABLE_IN_3D_SCALE, PRETTY_MOVE_SCALE_RATIO, TILE_SIZE,
    UPPER_STYLE_SCALE, WORLD_HALF_EXTENT,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayProfile {
    Phone,
    HighDensityPhone,
    Tablet,
    Custom(ViewportConfig),
}

impl DisplayProfile {
    pub fn resolve(&self) -> ViewportConfig {
        match self {
            Self::Phone => ViewportConfig::default(),
            Self::HighDensityPhone => ViewportConfig {
                visual_scale: 2.0,
                ..ViewportConfig::default()
            },
            Self::Tablet => ViewportConfig {
                visual_scale: 2.0,
                tablet: true,
                ..ViewportConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for DisplayProfile {
    fn default() -> Self {
        Self::Phone
    }
}

/// Parameters of the constraint checks and zoom operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Valid extent of the dataset in global units
    pub world_rect: Bounds,
    /// Rendering tile size in pixels
    pub tile_size: u32,
    /// Display density multiplier
    pub visual_scale: f64,
    /// Deepest zoom level the view may reach
    pub upper_style_scale: i32,
    /// Lowest zoom level where perspective mode is allowed
    pub min_allowable_in_3d_scale: i32,
    pub tablet: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            world_rect: Bounds::from_coords(
                -WORLD_HALF_EXTENT,
                -WORLD_HALF_EXTENT,
                WORLD_HALF_EXTENT,
                WORLD_HALF_EXTENT,
            ),
            tile_size: TILE_SIZE,
            visual_scale: 1.0,
            upper_style_scale: UPPER_STYLE_SCALE,
            min_allowable_in_3d_scale: MIN_ALLOWABLE_IN_3D_SCALE,
            tablet: false,
        }
    }
}

impl ViewportConfig {
    pub fn with_world_rect(mut self, world_rect: Bounds) -> Self {
        self.world_rect = world_rect;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.world_rect.is_degenerate() {
            return Err(MapError::InvalidConfig(format!(
                "world rect must have positive extent, got {:?}",
                self.world_rect
            )));
        }
        if self.tile_size == 0 {
            return Err(MapError::InvalidConfig("tile size must be non-zero".into()));
        }
        if !(self.visual_scale.is_finite() && self.visual_scale > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "visual scale must be positive, got {}",
                self.visual_scale
            )));
        }
        Ok(())
    }
}

/// Tuning of the pretty-move transition builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Upper bound for a single move phase, in seconds; zoom phases get half
    pub max_animation_time_sec: f64,
    /// Scale ratio (larger / smaller) at which a move becomes multi-phase
    pub pretty_scale_ratio: f64,
    /// Travel, in multiples of the shorter viewport side, at which a move becomes multi-phase
    pub pretty_distance_factor: f64,
    /// Fraction of each viewport side kept free when both endpoints must be visible
    pub fit_margin: f64,
    pub min_move_duration_sec: f64,
    /// Travel below this fraction of the short side uses the minimum duration
    pub min_speed_scalar: f64,
    /// Move speed in short sides per second
    pub max_speed_scalar: f64,
    /// Zoom speed as scale ratio per second
    pub scale_speed: f64,
    pub easing: EasingFunction,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            max_animation_time_sec: MAX_ANIMATION_TIME_SEC,
            pretty_scale_ratio: PRETTY_MOVE_SCALE_RATIO,
            pretty_distance_factor: 1.0,
            fit_margin: 0.1,
            min_move_duration_sec: 0.2,
            min_speed_scalar: 0.2,
            max_speed_scalar: 7.0,
            scale_speed: 2.0 / 0.2,
            easing: EasingFunction::EaseInOutQuad,
        }
    }
}

impl AnimationConfig {
    pub fn max_phase_duration(&self) -> Duration {
        Duration::from_secs_f64(self.max_animation_time_sec)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_animation_time_sec", self.max_animation_time_sec),
            ("pretty_scale_ratio", self.pretty_scale_ratio),
            ("pretty_distance_factor", self.pretty_distance_factor),
            ("max_speed_scalar", self.max_speed_scalar),
            ("scale_speed", self.scale_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MapError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..0.5).contains(&self.fit_margin) {
            return Err(MapError::InvalidConfig(format!(
                "fit_margin must be in [0, 0.5), got {}",
                self.fit_margin
            )));
        }
        if !(self.min_move_duration_sec >= 0.0 && self.min_speed_scalar >= 0.0) {
            return Err(MapError::InvalidConfig(
                "move duration parameters must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Complete configuration of the crate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub viewport: ViewportConfig,
    pub animation: AnimationConfig,
}

impl MapViewConfig {
    pub fn from_profile(profile: &DisplayProfile) -> Self {
        Self {
            viewport: profile.resolve(),
            animation: AnimationConfig::default(),
        }
    }

    /// Parses and validates a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapViewConfig = serde_json::from_str(json)?;
        if let Err(err) = config.validate() {
            log::warn!("rejecting configuration: {}", err);
            return Err(err);
        }
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;
        self.animation.validate()
    }
}
