//! Kinematic 2D character controller driven by raycast sweeps.
//!
//! The core (`controller`, `config`, `geometry`) only needs a
//! [`geometry::GeometryProvider`]; `plugin` runs it inside a bevy app on top
//! of avian2d spatial queries.

pub mod config;
pub mod controller;
pub mod geometry;
pub mod plugin;

pub mod prelude {
    pub use crate::config::{ConfigError, ControllerConfig, SlopeSpeedCurve};
    pub use crate::controller::{
        CharacterController2D, CollisionState, ControllerError, ControllerEvent, TriggerPhase,
    };
    pub use crate::geometry::{Aabb2, CollisionMask, GeometryProvider, RayHit};
    pub use crate::plugin::{
        ControllerCollided, ControllerDefaults, ControllerLayer, ControllerSet,
        KinematicCharacterBundle, MovementRequest, RaycastControllerPlugin, TriggerEntered,
        TriggerExited, TriggerStayed,
    };
}
