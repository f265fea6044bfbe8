//! Tunables shared by the simulation and the raycaster.
//!
//! The binaries fill these from the command line; everything else takes them
//! by reference so tests can build a world with plain `Default`s.

use std::f32::consts::{FRAC_PI_3, PI};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("screen size must be non-zero, got {0}×{1}")]
    EmptyScreen(usize, usize),

    #[error("field of view must lie in (0°, 180°), got {0}°")]
    BadFov(f32),

    #[error("view distance must be positive, got {0}")]
    BadViewDistance(f32),

    #[error("ray step must be positive and below the view distance, got {0}")]
    BadStep(f32),
}

/// Projection parameters for [`crate::engine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Horizontal field of view, radians.
    pub fov: f32,
    /// Rays give up after this many cells.
    pub view_distance: f32,
    /// Ray-march increment in cells.
    pub step: f32,
    /// Added to the wall distance before dividing.
    pub epsilon: f32,
    /// Horizon shift in pixels per radian of pitch.
    pub look_scale: f32,
    /// Column multiplier in the floor tone pattern.
    pub floor_factor: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov: FRAC_PI_3,
            view_distance: 10.0,
            step: 0.05,
            epsilon: 1e-4,
            look_scale: 200.0,
            floor_factor: 0.1,
        }
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(ConfigError::BadFov(self.fov.to_degrees()));
        }
        if !(self.view_distance > 0.0) {
            return Err(ConfigError::BadViewDistance(self.view_distance));
        }
        if !(self.step > 0.0 && self.step < self.view_distance) {
            return Err(ConfigError::BadStep(self.step));
        }
        Ok(())
    }
}

/// Movement and look parameters for [`crate::sim`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerConfig {
    /// Cells per second.
    pub speed: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    pub max_pitch: f32,
    /// Half-size of the collision box, in cells.
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            mouse_sensitivity: 0.003,
            max_pitch: FRAC_PI_3,
            radius: 0.3,
        }
    }
}
