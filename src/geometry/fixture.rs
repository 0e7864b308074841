//! Synthetic collision world for tests: a box body and a list of line segments.

use bevy::prelude::*;

use super::{Aabb2, CollisionMask, GeometryProvider, RayHit};

const EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub layers: CollisionMask,
}

#[derive(Clone, Debug)]
pub(crate) struct SegmentWorld {
    pub body: Aabb2,
    pub segments: Vec<Segment>,
}

impl SegmentWorld {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            body: Aabb2::from_center_half_extents(center, half_extents),
            segments: Vec::new(),
        }
    }

    pub fn with_segment(mut self, a: Vec2, b: Vec2, layers: CollisionMask) -> Self {
        self.segments.push(Segment { a, b, layers });
        self
    }

    /// Horizontal solid floor at height `y` spanning `x0..x1`.
    pub fn with_floor(self, y: f32, x0: f32, x1: f32) -> Self {
        self.with_segment(
            Vec2::new(x0, y),
            Vec2::new(x1, y),
            CollisionMask::PLATFORM,
        )
    }

    /// Horizontal one-way platform at height `y` spanning `x0..x1`.
    pub fn with_one_way(self, y: f32, x0: f32, x1: f32) -> Self {
        self.with_segment(
            Vec2::new(x0, y),
            Vec2::new(x1, y),
            CollisionMask::ONE_WAY_PLATFORM,
        )
    }

    /// Vertical solid wall at `x` spanning `y0..y1`.
    pub fn with_wall(self, x: f32, y0: f32, y1: f32) -> Self {
        self.with_segment(
            Vec2::new(x, y0),
            Vec2::new(x, y1),
            CollisionMask::PLATFORM,
        )
    }

    /// Straight ramp starting at `start`, rising at `angle_deg` for `run` units of x.
    /// A negative `run` builds a ramp rising to the left.
    pub fn with_ramp(self, start: Vec2, angle_deg: f32, run: f32) -> Self {
        let rise = angle_deg.to_radians().tan() * run.abs();
        self.with_segment(
            start,
            start + Vec2::new(run, rise),
            CollisionMask::PLATFORM,
        )
    }

    pub fn bottom(&self) -> f32 {
        self.body.min.y
    }
}

impl GeometryProvider for SegmentWorld {
    fn bounds(&self) -> Aabb2 {
        self.body
    }

    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<RayHit> {
        let d = *direction;
        let mut best: Option<RayHit> = None;

        for segment in &self.segments {
            if !segment.layers.intersects(mask) {
                continue;
            }

            let e = segment.b - segment.a;
            let denom = d.perp_dot(e);
            if denom.abs() < EPSILON {
                continue;
            }

            let w = segment.a - origin;
            let t = w.perp_dot(e) / denom;
            let s = w.perp_dot(d) / denom;
            if t < 0.0 || t > max_distance + EPSILON || s < -EPSILON || s > 1.0 + EPSILON {
                continue;
            }

            if best.is_some_and(|hit| hit.distance <= t) {
                continue;
            }

            let mut normal = Vec2::new(-e.y, e.x).normalize();
            if normal.dot(d) > 0.0 {
                normal = -normal;
            }

            best = Some(RayHit {
                point: origin + d * t,
                normal,
                distance: t,
                entity: None,
            });
        }

        best
    }

    fn translate(&mut self, delta: Vec2) {
        self.body = self.body.translated(delta);
    }
}
