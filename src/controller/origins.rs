//! Controller domain: ray-fan anchors and spacing.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::geometry::Aabb2;

/// Corners of the skin-shrunk box that the ray fans start from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
    pub bottom_left: Vec2,
}

impl RaycastOrigins {
    pub fn from_bounds(bounds: Aabb2, skin_width: f32) -> Self {
        let inner = bounds.expanded(-skin_width);
        Self {
            top_left: Vec2::new(inner.min.x, inner.max.y),
            bottom_right: Vec2::new(inner.max.x, inner.min.y),
            bottom_left: inner.min,
        }
    }
}

/// Distance between neighbouring rays of each fan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct RaySpacing {
    /// Gap between the stacked rays of the horizontal sweep.
    pub vertical: f32,
    /// Gap between the side-by-side rays of the vertical sweep.
    pub horizontal: f32,
    /// Box size the spacing was computed for.
    pub box_size: Vec2,
}

impl RaySpacing {
    pub fn new(config: &ControllerConfig, box_size: Vec2) -> Self {
        let usable = (box_size - Vec2::splat(2.0 * config.skin_width)).max(Vec2::ZERO);
        Self {
            vertical: usable.y / (config.total_horizontal_rays - 1) as f32,
            horizontal: usable.x / (config.total_vertical_rays - 1) as f32,
            box_size,
        }
    }
}
