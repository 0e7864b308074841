//! Geometry domain: the narrow collision-world interface the controller runs against.

use std::ops::{BitAnd, BitOr, Not};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(test)]
pub(crate) mod fixture;
#[cfg(test)]
mod tests;

/// Bitset of collision layers. Bit `n` set means "layer `n` participates".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(transparent)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const NONE: Self = Self(0);

    /// Solid ground and walls.
    pub const PLATFORM: Self = Self(1 << 1);
    /// Platforms that can be jumped through from below.
    pub const ONE_WAY_PLATFORM: Self = Self(1 << 2);
    /// Sensors that raise trigger events but never block.
    pub const TRIGGER: Self = Self(1 << 3);
    /// Characters themselves.
    pub const CHARACTER: Self = Self(1 << 4);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// This mask with every bit of `other` cleared.
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CollisionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for CollisionMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for CollisionMask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// World-space axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink (negative `amount`) or grow the box by `amount` on every side.
    pub fn expanded(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Nearest intersection reported by a ray cast.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct RayHit {
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f32,
    /// Collider that was hit, when the backing world tracks entities.
    pub entity: Option<Entity>,
}

/// The collision world and body transform a controller moves through.
///
/// Implementations must be deterministic: the same query against the same
/// world returns the same answer.
pub trait GeometryProvider {
    /// Current world-space bounds of the character's box.
    fn bounds(&self) -> Aabb2;

    /// Cast a ray and return the nearest hit within `max_distance` against
    /// colliders whose layers intersect `mask`.
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<RayHit>;

    /// Move the character's body by `delta` in world space.
    fn translate(&mut self, delta: Vec2);
}

/// Angle in degrees between a surface normal and world up, in `[0, 180]`.
///
/// A zero-length normal reports 0.
pub fn surface_angle(normal: Vec2) -> f32 {
    let normal = normal.normalize_or_zero();
    if normal == Vec2::ZERO {
        return 0.0;
    }
    normal.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Sign that treats zero as positive.
pub(crate) fn direction_sign(value: f32) -> f32 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}
