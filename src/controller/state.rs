//! Controller domain: collision state and per-frame resolution values.

use bevy::prelude::*;

use crate::geometry::RayHit;

/// What the controller touched during the last move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct CollisionState {
    pub right: bool,
    pub left: bool,
    pub above: bool,
    pub below: bool,
    pub became_grounded_this_frame: bool,
    pub was_grounded_last_frame: bool,
    pub moving_down_slope: bool,
    /// Degrees, set while descending a slope.
    pub slope_angle: f32,
}

impl CollisionState {
    pub fn has_collision(&self) -> bool {
        self.right || self.left || self.above || self.below
    }

    /// Clear everything except `was_grounded_last_frame`.
    pub fn reset(&mut self) {
        *self = Self {
            was_grounded_last_frame: self.was_grounded_last_frame,
            ..Self::default()
        };
    }
}

impl std::fmt::Display for CollisionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[CollisionState] r: {}, l: {}, a: {}, b: {}, movingDownSlope: {}, slopeAngle: {}, \
             becameGroundedThisFrame: {}, wasGroundedLastFrame: {}",
            self.right,
            self.left,
            self.above,
            self.below,
            self.moving_down_slope,
            self.slope_angle,
            self.became_grounded_this_frame,
            self.was_grounded_last_frame
        )
    }
}

/// Whether one-way platforms block the vertical sweep this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum OneWayPlatforms {
    #[default]
    Collide,
    /// Drop through: one-way layers are left out of the vertical sweep.
    Ignore,
}

/// Inputs to a single resolution step that come from the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub was_grounded: bool,
    pub one_way: OneWayPlatforms,
}

/// Slope interaction that shaped this frame's displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub enum SlopeContact {
    #[default]
    None,
    /// Walking up a slope. Lift is positional, so it is kept out of velocity.
    Ascending { angle: f32 },
    /// Hugging a slope on the way down.
    Descending { angle: f32 },
    /// Slope steeper than the limit stopped horizontal motion.
    TooSteep { angle: f32 },
}

impl SlopeContact {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SlopeContact::Ascending { .. })
    }
}

/// How the grounded flag changed across the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum GroundTransition {
    #[default]
    Airborne,
    Landed,
    Grounded,
    LeftGround,
}

impl GroundTransition {
    pub fn between(was_grounded: bool, is_grounded: bool) -> Self {
        match (was_grounded, is_grounded) {
            (false, false) => GroundTransition::Airborne,
            (false, true) => GroundTransition::Landed,
            (true, true) => GroundTransition::Grounded,
            (true, false) => GroundTransition::LeftGround,
        }
    }
}

/// Which part of the resolver issued a ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum Sweep {
    Horizontal,
    Vertical,
    SlopeAscend,
    SlopeDescend,
}

/// A ray the resolver cast, kept for debug drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastRecord {
    pub origin: Vec2,
    pub direction: Dir2,
    pub distance: f32,
    pub sweep: Sweep,
    pub hit: Option<Vec2>,
}

/// Everything one resolution step produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameResolution {
    /// Corrected displacement.
    pub delta: Vec2,
    pub collision: CollisionState,
    pub slope: SlopeContact,
    pub grounding: GroundTransition,
    /// Sweep hits in cast order, horizontal before vertical.
    pub hits: Vec<RayHit>,
    pub casts: Vec<CastRecord>,
}
