//! Controller domain: keep the character glued to slopes it walks down.

use bevy::prelude::*;

use super::Resolver;
use super::state::{SlopeContact, Sweep};
use crate::geometry::{GeometryProvider, direction_sign, surface_angle};

/// Probe reach is the half-width times the tangent of this angle.
pub(crate) const DESCEND_PROBE_ANGLE: f32 = 75.0;

impl<G: GeometryProvider + ?Sized> Resolver<'_, G> {
    pub(super) fn descend_slope(&mut self, delta: &mut Vec2) {
        let bottom_left = self.origins.bottom_left;
        let bottom_right = self.origins.bottom_right;
        let center_x = (bottom_left.x + bottom_right.x) * 0.5;
        let probe_distance = DESCEND_PROBE_ANGLE.to_radians().tan() * (bottom_right.x - center_x);
        let origin = Vec2::new(center_x, bottom_left.y);

        let Some(hit) = self.cast(
            origin,
            Dir2::NEG_Y,
            probe_distance,
            self.config.platform_mask,
            Sweep::SlopeDescend,
        ) else {
            return;
        };

        let angle = surface_angle(hit.normal);
        if angle == 0.0 {
            return;
        }

        // Only when heading downhill; uphill is the horizontal sweep's job
        if direction_sign(hit.normal.x) != direction_sign(delta.x) {
            return;
        }

        delta.y += hit.point.y - origin.y - self.config.skin_width;
        delta.x *= self.config.slope_speed_multiplier.evaluate(-angle);

        self.frame.collision.moving_down_slope = true;
        self.frame.collision.slope_angle = angle;
        self.frame.slope = SlopeContact::Descending { angle };
    }
}
