//! Plugin domain: components, resources and physics layers for controlled bodies.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::{ConfigError, ControllerConfig};
use crate::controller::{CharacterController2D, FrameResolution};
use crate::geometry::CollisionMask;

/// Physics layers for collision filtering. Bit values match the
/// `CollisionMask` constants so the default config masks line up.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerLayer {
    #[default]
    Default,
    /// Solid ground and walls
    Platform,
    /// Can be jumped through from below
    OneWayPlatform,
    /// Sensors that raise trigger events
    Trigger,
    /// Controlled characters
    Character,
}

impl From<ControllerLayer> for CollisionMask {
    fn from(layer: ControllerLayer) -> Self {
        CollisionMask(layer.to_bits())
    }
}

pub fn layer_mask(mask: CollisionMask) -> LayerMask {
    LayerMask(mask.bits())
}

/// Config used when spawning characters without an explicit one.
#[derive(Resource, Debug, Clone, Default)]
pub struct ControllerDefaults(pub ControllerConfig);

/// Displacement to apply this frame. Consumed and cleared by the move system.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct MovementRequest {
    pub delta: Vec2,
    /// Step down until grounded before applying `delta`.
    pub warp_to_ground: bool,
}

impl MovementRequest {
    pub fn add(&mut self, delta: Vec2) {
        self.delta += delta;
    }
}

/// The most recent resolution step for this character.
#[derive(Component, Debug, Default)]
pub struct LastResolution(pub FrameResolution);

#[derive(Bundle)]
pub struct KinematicCharacterBundle {
    pub controller: CharacterController2D,
    pub request: MovementRequest,
    pub last_resolution: LastResolution,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub colliding: CollidingEntities,
}

impl KinematicCharacterBundle {
    /// Box character of `size` centred on `position`.
    pub fn new(config: ControllerConfig, position: Vec2, size: Vec2) -> Result<Self, ConfigError> {
        let collision_layers = CollisionLayers::new(
            ControllerLayer::Character,
            [
                layer_mask(config.platform_mask),
                layer_mask(config.trigger_mask),
            ],
        );

        Ok(Self {
            controller: CharacterController2D::with_box(config, size)?,
            request: MovementRequest::default(),
            last_resolution: LastResolution::default(),
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Kinematic,
            collider: Collider::rectangle(size.x, size.y),
            collision_events: CollisionEventsEnabled,
            collision_layers,
            colliding: CollidingEntities::default(),
        })
    }
}
