//! Config domain: controller tuning, validation and file loading.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::CollisionMask;

mod curve;
mod loader;

pub use curve::{Keyframe, SlopeSpeedCurve};
pub use loader::{ConfigLoadError, load_config, parse_json_config, parse_ron_config};

pub const MIN_SKIN_WIDTH: f32 = 0.001;
pub const MAX_SKIN_WIDTH: f32 = 0.3;
pub const MIN_RAYS: usize = 2;
pub const MAX_RAYS: usize = 20;

/// Which side of the box a ray fan is spread along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayAxis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for RayAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RayAxis::Horizontal => write!(f, "horizontal"),
            RayAxis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Rejected controller configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    SkinWidthOutOfRange(f32),
    TooFewRays { axis: RayAxis, count: usize },
    TooManyRays { axis: RayAxis, count: usize },
    SlopeLimitOutOfRange(f32),
    InvalidCurve(&'static str),
    BoxTooSmall { size: Vec2, skin_width: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::SkinWidthOutOfRange(w) => write!(
                f,
                "skin width {} outside ({}..={})",
                w, MIN_SKIN_WIDTH, MAX_SKIN_WIDTH
            ),
            ConfigError::TooFewRays { axis, count } => write!(
                f,
                "{} ray count {} is below the minimum of {}",
                axis, count, MIN_RAYS
            ),
            ConfigError::TooManyRays { axis, count } => write!(
                f,
                "{} ray count {} exceeds the maximum of {}",
                axis, count, MAX_RAYS
            ),
            ConfigError::SlopeLimitOutOfRange(limit) => {
                write!(f, "slope limit {} outside 0..=90 degrees", limit)
            }
            ConfigError::InvalidCurve(reason) => write!(f, "invalid slope speed curve: {}", reason),
            ConfigError::BoxTooSmall { size, skin_width } => write!(
                f,
                "box {}x{} leaves no room for a skin width of {} on each side",
                size.x, size.y, skin_width
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning for a raycast character controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct ControllerConfig {
    /// Inward margin between the box and the ray origins.
    pub skin_width: f32,
    /// Steepest walkable slope, in degrees.
    pub slope_limit: f32,
    /// Slopes are only climbed while `delta.y` is below this.
    pub jump_threshold: f32,
    /// Rays cast sideways, stacked up the box height.
    pub total_horizontal_rays: usize,
    /// Rays cast up or down, spread across the box width.
    pub total_vertical_rays: usize,
    pub platform_mask: CollisionMask,
    /// Always a subset of `platform_mask` once normalized.
    pub one_way_platform_mask: CollisionMask,
    pub trigger_mask: CollisionMask,
    pub slope_speed_multiplier: SlopeSpeedCurve,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            skin_width: 0.02,
            slope_limit: 30.0,
            jump_threshold: 0.07,
            total_horizontal_rays: 8,
            total_vertical_rays: 4,
            platform_mask: CollisionMask::PLATFORM | CollisionMask::ONE_WAY_PLATFORM,
            one_way_platform_mask: CollisionMask::ONE_WAY_PLATFORM,
            trigger_mask: CollisionMask::TRIGGER,
            slope_speed_multiplier: SlopeSpeedCurve::default(),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_skin_width(self.skin_width)?;
        validate_ray_count(RayAxis::Horizontal, self.total_horizontal_rays)?;
        validate_ray_count(RayAxis::Vertical, self.total_vertical_rays)?;
        if !(0.0..=90.0).contains(&self.slope_limit) {
            return Err(ConfigError::SlopeLimitOutOfRange(self.slope_limit));
        }
        self.slope_speed_multiplier.validate()
    }

    /// Fold the one-way layers into the platform mask.
    pub fn normalized(mut self) -> Self {
        self.platform_mask = self.platform_mask | self.one_way_platform_mask;
        self
    }

    /// Validate, then normalize.
    pub fn checked(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self.normalized())
    }

    /// Platform layers minus the one-way ones.
    pub fn solid_mask(&self) -> CollisionMask {
        self.platform_mask.without(self.one_way_platform_mask)
    }

    /// Check that a box of `size` is thick enough for this skin width.
    pub fn validate_box(&self, size: Vec2) -> Result<(), ConfigError> {
        let usable = size - Vec2::splat(2.0 * self.skin_width);
        if usable.x <= 0.0 || usable.y <= 0.0 {
            return Err(ConfigError::BoxTooSmall {
                size,
                skin_width: self.skin_width,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_skin_width(skin_width: f32) -> Result<(), ConfigError> {
    if !skin_width.is_finite() || !(MIN_SKIN_WIDTH..=MAX_SKIN_WIDTH).contains(&skin_width) {
        return Err(ConfigError::SkinWidthOutOfRange(skin_width));
    }
    Ok(())
}

fn validate_ray_count(axis: RayAxis, count: usize) -> Result<(), ConfigError> {
    if count < MIN_RAYS {
        return Err(ConfigError::TooFewRays { axis, count });
    }
    if count > MAX_RAYS {
        return Err(ConfigError::TooManyRays { axis, count });
    }
    Ok(())
}
