//! Viewport constraint, fitting and zoom operations
//!
//! Everything that depends on the world extent or on tile parameters hangs
//! off [`ScreenOperations`]; config-independent arithmetic lives in
//! [`arithmetic`] as free functions.

pub mod apply;
pub mod arithmetic;
pub mod checks;
pub mod fit;

use crate::core::config::ViewportConfig;
use crate::Result;

pub use arithmetic::{calculate_center, calculate_center_with, calculate_scale};

/// Constraint checks, fit operations and zoom bound to a [`ViewportConfig`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenOperations {
    config: ViewportConfig,
}

impl ScreenOperations {
    pub fn new(config: ViewportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }
}
