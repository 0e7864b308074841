//! Controller domain: sideways sweep and slope climbing.

use bevy::prelude::*;

use super::state::{SlopeContact, Sweep};
use super::{Resolver, SKIN_WIDTH_FUDGE};
use crate::geometry::{GeometryProvider, surface_angle};

impl<G: GeometryProvider + ?Sized> Resolver<'_, G> {
    pub(super) fn move_horizontally(&mut self, delta: &mut Vec2) {
        let skin_width = self.config.skin_width;
        let going_right = delta.x > 0.0;
        let mut ray_distance = delta.x.abs() + skin_width;
        let direction = if going_right { Dir2::X } else { Dir2::NEG_X };
        let anchor = if going_right {
            self.origins.bottom_right
        } else {
            self.origins.bottom_left
        };

        for i in 0..self.config.total_horizontal_rays {
            let ray = Vec2::new(anchor.x, anchor.y + i as f32 * self.spacing.vertical);

            // Only the foot ray may catch a one-way ledge, and only while grounded
            let mask = if i == 0 && self.input.was_grounded {
                self.config.platform_mask
            } else {
                self.config.solid_mask()
            };

            let Some(hit) = self.cast(ray, direction, ray_distance, mask, Sweep::Horizontal) else {
                continue;
            };

            if i == 0 && self.climb_slope(delta, surface_angle(hit.normal)) {
                self.frame.hits.push(hit);
                break;
            }

            delta.x = hit.point.x - ray.x;
            ray_distance = delta.x.abs();

            if going_right {
                delta.x -= skin_width;
                self.frame.collision.right = true;
            } else {
                delta.x += skin_width;
                self.frame.collision.left = true;
            }

            self.frame.hits.push(hit);
            trace!("Horizontal hit on ray {}: delta.x clamped to {}", i, delta.x);

            if ray_distance < skin_width + SKIN_WIDTH_FUDGE {
                break;
            }
        }
    }

    /// Returns true when the slope owns this frame's horizontal outcome.
    fn climb_slope(&mut self, delta: &mut Vec2, angle: f32) -> bool {
        // Walls are left to the regular sweep
        if angle.round_ties_even() == 90.0 {
            return false;
        }

        if angle >= self.config.slope_limit {
            delta.x = 0.0;
            self.frame.slope = SlopeContact::TooSteep { angle };
            debug!("Slope of {} degrees is too steep, stopping", angle);
            return true;
        }

        // No slope snapping while moving up faster than the threshold
        if delta.y >= self.config.jump_threshold {
            return true;
        }

        let skin_width = self.config.skin_width;
        delta.x *= self.config.slope_speed_multiplier.evaluate(angle);
        delta.y = (angle.to_radians().tan() * delta.x).abs();

        let going_right = delta.x > 0.0;
        let origin = if going_right {
            self.origins.bottom_right
        } else {
            self.origins.bottom_left
        };
        let mask = if self.input.was_grounded {
            self.config.platform_mask
        } else {
            self.config.solid_mask()
        };

        if let Ok(direction) = Dir2::new(*delta) {
            let distance = delta.length();
            if let Some(hit) = self.cast(origin, direction, distance, mask, Sweep::SlopeAscend) {
                *delta = hit.point - origin;
                if going_right {
                    delta.x -= skin_width;
                } else {
                    delta.x += skin_width;
                }
            }
        }

        self.frame.slope = SlopeContact::Ascending { angle };
        self.frame.collision.below = true;
        true
    }
}
