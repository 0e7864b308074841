//! Controller domain: up/down sweep with one-way platform handling.

use bevy::prelude::*;

use super::state::{OneWayPlatforms, Sweep};
use super::{Resolver, SKIN_WIDTH_FUDGE};
use crate::geometry::GeometryProvider;

/// A downward sweep clamped above this is treated as having landed from below.
pub(crate) const LANDING_FLIP_THRESHOLD: f32 = 0.00001;

impl<G: GeometryProvider + ?Sized> Resolver<'_, G> {
    pub(super) fn move_vertically(&mut self, delta: &mut Vec2) {
        let skin_width = self.config.skin_width;
        let mut going_up = delta.y > 0.0;
        let mut ray_distance = delta.y.abs() + skin_width;
        let direction = if going_up { Dir2::Y } else { Dir2::NEG_Y };
        let mut anchor = if going_up {
            self.origins.top_left
        } else {
            self.origins.bottom_left
        };

        // Follow the box to where the horizontal sweep left it
        anchor.x += delta.x;

        let mut mask = self.config.platform_mask;
        if (going_up && !self.input.was_grounded) || self.input.one_way == OneWayPlatforms::Ignore
        {
            mask = mask.without(self.config.one_way_platform_mask);
        }

        for i in 0..self.config.total_vertical_rays {
            let ray = Vec2::new(anchor.x + i as f32 * self.spacing.horizontal, anchor.y);

            let Some(hit) = self.cast(ray, direction, ray_distance, mask, Sweep::Vertical) else {
                continue;
            };

            delta.y = hit.point.y - ray.y;
            ray_distance = delta.y.abs();

            if going_up {
                delta.y -= skin_width;
                self.frame.collision.above = true;
            } else {
                delta.y += skin_width;
                self.frame.collision.below = true;
            }

            self.frame.hits.push(hit);
            trace!("Vertical hit on ray {}: delta.y clamped to {}", i, delta.y);

            // Direction of the rays is unchanged, only the bookkeeping flips
            if !going_up && delta.y > LANDING_FLIP_THRESHOLD {
                going_up = true;
            }

            if ray_distance < skin_width + SKIN_WIDTH_FUDGE {
                break;
            }
        }
    }
}
