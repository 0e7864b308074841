//! Controller domain: the raycast movement resolver.
//!
//! Each frame a desired displacement is swept against the world in a fixed
//! order: an optional slope-descend probe, the horizontal fan (which may hand
//! off to slope climbing on its foot ray), then the vertical fan. The corrected
//! displacement is applied to the body and the contacts are reported.

use bevy::prelude::*;

use crate::config::{ConfigError, ControllerConfig, validate_skin_width};
use crate::geometry::{CollisionMask, GeometryProvider, RayHit};

mod descend;
mod events;
mod horizontal;
mod origins;
mod state;
mod vertical;

pub use events::{ControllerEvent, ControllerListeners, TriggerPhase};
pub use origins::{RaySpacing, RaycastOrigins};
pub use state::{
    CastRecord, CollisionState, FrameInput, FrameResolution, GroundTransition, OneWayPlatforms,
    SlopeContact, Sweep,
};

/// Extra slack on the early-out distance so float noise does not keep a sweep going.
pub const SKIN_WIDTH_FUDGE: f32 = 0.001;

/// Displacement used by each step of [`CharacterController2D::warp_to_ground`].
pub const WARP_PROBE_DELTA: Vec2 = Vec2::new(0.0, -1.0);

/// Runtime failures of controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    NoGroundBelow { steps: u32 },
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::NoGroundBelow { steps } => {
                write!(f, "no ground found below after {} steps", steps)
            }
        }
    }
}

impl std::error::Error for ControllerError {}

/// Kinematic box character moved by raycast sweeps.
#[derive(Component, Debug)]
pub struct CharacterController2D {
    config: ControllerConfig,
    spacing: RaySpacing,
    collision_state: CollisionState,
    velocity: Vec2,
    listeners: ControllerListeners,
    /// Drop through one-way platforms on the next move. Cleared by every move.
    pub ignore_one_way_platforms_this_frame: bool,
}

impl CharacterController2D {
    /// Validate and normalize `config`. Ray spacing is computed on the first move.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        let config = config.checked()?;
        Ok(Self {
            config,
            spacing: RaySpacing::default(),
            collision_state: CollisionState::default(),
            velocity: Vec2::ZERO,
            listeners: ControllerListeners::default(),
            ignore_one_way_platforms_this_frame: false,
        })
    }

    /// Like [`Self::new`], also checking that a box of `box_size` fits the skin width.
    pub fn with_box(config: ControllerConfig, box_size: Vec2) -> Result<Self, ConfigError> {
        let mut controller = Self::new(config)?;
        controller.config.validate_box(box_size)?;
        controller.recalculate_ray_spacing(box_size);
        Ok(controller)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ControllerConfig) -> Result<(), ConfigError> {
        self.config = config.checked()?;
        self.recalculate_ray_spacing(self.spacing.box_size);
        Ok(())
    }

    pub fn skin_width(&self) -> f32 {
        self.config.skin_width
    }

    pub fn set_skin_width(&mut self, skin_width: f32) -> Result<(), ConfigError> {
        validate_skin_width(skin_width)?;
        self.config.skin_width = skin_width;
        self.recalculate_ray_spacing(self.spacing.box_size);
        Ok(())
    }

    /// Recompute the fan spacing for a box of `box_size`. Call after the box,
    /// the skin width or the ray counts change.
    pub fn recalculate_ray_spacing(&mut self, box_size: Vec2) {
        self.spacing = RaySpacing::new(&self.config, box_size);
    }

    pub fn ray_spacing(&self) -> RaySpacing {
        self.spacing
    }

    /// Displacement per second of the last move.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.collision_state.below
    }

    pub fn collision_state(&self) -> &CollisionState {
        &self.collision_state
    }

    /// Whether a sensor on `layers` should raise trigger events for this controller.
    pub fn accepts_trigger(&self, layers: CollisionMask) -> bool {
        self.config.trigger_mask.intersects(layers)
    }

    pub fn on_event(&mut self, listener: impl FnMut(&ControllerEvent) + Send + Sync + 'static) {
        self.listeners.push(listener);
    }

    pub fn listeners_mut(&mut self) -> &mut ControllerListeners {
        &mut self.listeners
    }

    /// Pass an overlap notification from the collision world on to listeners.
    pub fn forward_trigger(&mut self, phase: TriggerPhase, other: Entity) {
        self.listeners
            .dispatch(&ControllerEvent::Trigger { phase, other });
    }

    /// The previous-frame inputs the next move will resolve with.
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            was_grounded: self.collision_state.below,
            one_way: if self.ignore_one_way_platforms_this_frame {
                OneWayPlatforms::Ignore
            } else {
                OneWayPlatforms::Collide
            },
        }
    }

    /// Resolve `delta` against `geometry` without moving anything.
    pub fn resolve<G: GeometryProvider + ?Sized>(
        &self,
        geometry: &G,
        delta: Vec2,
        input: FrameInput,
    ) -> FrameResolution {
        let bounds = geometry.bounds();
        let spacing = if bounds.size() == self.spacing.box_size {
            self.spacing
        } else {
            RaySpacing::new(&self.config, bounds.size())
        };

        Resolver {
            config: &self.config,
            spacing,
            origins: RaycastOrigins::from_bounds(bounds, self.config.skin_width),
            geometry,
            input,
            frame: FrameResolution::default(),
        }
        .run(delta)
    }

    /// Sweep `delta` through the world, move the body and update state.
    ///
    /// `dt` is the frame time used to derive [`Self::velocity`]; a
    /// non-positive `dt` leaves velocity unchanged.
    pub fn move_by<G: GeometryProvider + ?Sized>(
        &mut self,
        geometry: &mut G,
        delta: Vec2,
        dt: f32,
    ) -> FrameResolution {
        let input = self.frame_input();

        let box_size = geometry.bounds().size();
        if box_size != self.spacing.box_size {
            self.recalculate_ray_spacing(box_size);
        }

        let resolution = self.resolve(&*geometry, delta, input);

        geometry.translate(resolution.delta);

        if dt > 0.0 {
            self.velocity = resolution.delta / dt;
        }

        self.collision_state = resolution.collision;

        match resolution.grounding {
            GroundTransition::Landed => debug!("Landed: {}", self.collision_state),
            GroundTransition::LeftGround => debug!("Left ground: {}", self.collision_state),
            _ => {}
        }

        if resolution.slope.is_ascending() {
            self.velocity.y = 0.0;
        }

        for hit in &resolution.hits {
            self.listeners.dispatch(&ControllerEvent::Collided(*hit));
        }

        self.ignore_one_way_platforms_this_frame = false;
        resolution
    }

    /// Step down until grounded, returning the final step.
    ///
    /// Never returns if there is no ground below; use
    /// [`Self::try_warp_to_ground`] when that cannot be guaranteed.
    pub fn warp_to_ground<G: GeometryProvider + ?Sized>(
        &mut self,
        geometry: &mut G,
        dt: f32,
    ) -> FrameResolution {
        loop {
            let last = self.move_by(geometry, WARP_PROBE_DELTA, dt);
            if self.is_grounded() {
                return last;
            }
        }
    }

    /// Step down until grounded, giving up after `max_steps` moves.
    pub fn try_warp_to_ground<G: GeometryProvider + ?Sized>(
        &mut self,
        geometry: &mut G,
        dt: f32,
        max_steps: u32,
    ) -> Result<Warp, ControllerError> {
        for steps in 1..=max_steps {
            let last = self.move_by(geometry, WARP_PROBE_DELTA, dt);
            if self.is_grounded() {
                return Ok(Warp { steps, last });
            }
        }
        Err(ControllerError::NoGroundBelow { steps: max_steps })
    }
}

/// A successful bounded warp.
#[derive(Clone, Debug, PartialEq)]
pub struct Warp {
    /// Moves taken, including the landing one.
    pub steps: u32,
    /// The landing move.
    pub last: FrameResolution,
}

/// One resolution step's working set.
pub(crate) struct Resolver<'a, G: GeometryProvider + ?Sized> {
    config: &'a ControllerConfig,
    spacing: RaySpacing,
    origins: RaycastOrigins,
    geometry: &'a G,
    input: FrameInput,
    frame: FrameResolution,
}

impl<G: GeometryProvider + ?Sized> Resolver<'_, G> {
    fn run(mut self, mut delta: Vec2) -> FrameResolution {
        self.frame.collision.was_grounded_last_frame = self.input.was_grounded;

        if delta.y < 0.0 && self.input.was_grounded {
            self.descend_slope(&mut delta);
        }

        if delta.x != 0.0 {
            self.move_horizontally(&mut delta);
        }

        if delta.y != 0.0 {
            self.move_vertically(&mut delta);
        }

        self.frame.delta = delta;
        self.frame.grounding =
            GroundTransition::between(self.input.was_grounded, self.frame.collision.below);
        self.frame.collision.became_grounded_this_frame =
            self.frame.grounding == GroundTransition::Landed;
        self.frame
    }

    fn cast(
        &mut self,
        origin: Vec2,
        direction: Dir2,
        distance: f32,
        mask: CollisionMask,
        sweep: Sweep,
    ) -> Option<RayHit> {
        let hit = self.geometry.cast_ray(origin, direction, distance, mask);
        self.frame.casts.push(CastRecord {
            origin,
            direction,
            distance,
            sweep,
            hit: hit.map(|h| h.point),
        });
        hit
    }
}
